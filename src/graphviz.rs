//! Renders a tree as a Graphviz DOT digraph, for eyeballing rebalancing
//! behavior. Enabled by the `graphviz` cargo feature.

use std::collections::VecDeque;
use std::fmt::{Debug, Write};
use std::fs;
use std::io;
use std::path::Path;

use crate::index::{IndexType, NodeIndex};
use crate::node::{Node, Side};
use crate::ordertree::OrderTree;

impl<T, C, Ix> OrderTree<T, C, Ix>
where
    T: Debug,
    Ix: IndexType,
{
    /// Write the tree to `path` as a DOT digraph, nodes labeled with their
    /// values and filled with their color.
    #[inline]
    pub fn draw<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.dot(true))
    }

    /// Write the tree to `path` as a DOT digraph, nodes labeled with their
    /// arena index only.
    #[inline]
    pub fn draw_without_value<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        fs::write(path, self.dot(false))
    }

    fn dot(&self, with_value: bool) -> String {
        let mut out = String::from("digraph order_tree {\n");
        let mut edges = String::new();
        if let Some(root) = self.root() {
            let mut queue: VecDeque<NodeIndex<Ix>> = VecDeque::new();
            queue.push_back(root);
            while let Some(x) = queue.pop_front() {
                let label = if with_value {
                    format!("{:?}", self.node_ref(x, Node::value)).replace('"', "\\\"")
                } else {
                    x.index().to_string()
                };
                let fill = if self.node_ref(x, Node::is_red) {
                    "red"
                } else {
                    "black"
                };
                let _ignore = writeln!(
                    out,
                    "    n{} [label=\"{label}\" style=filled fillcolor={fill} fontcolor=white];",
                    x.index()
                );
                for side in [Side::Left, Side::Right] {
                    let child = self.node_ref(x, |n| n.child(side));
                    if !self.node_ref(child, Node::is_sentinel) {
                        let _ignore = writeln!(edges, "    n{} -> n{};", x.index(), child.index());
                        queue.push_back(child);
                    }
                }
            }
        }
        out.push_str(&edges);
        out.push_str("}\n");
        out
    }
}
