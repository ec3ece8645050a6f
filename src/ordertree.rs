use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::node::{Color, Node, Side};
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

/// A red-black tree ordered by a caller-supplied comparator.
///
/// The comparator is fixed when the tree is constructed and must stay a
/// total order for the tree's whole lifetime. Equal values are accepted as
/// distinct nodes; see [`OrderTree::insert`].
pub struct OrderTree<T, C, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<T, Ix>>,
    /// Root of the tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of elements in the tree
    pub(crate) len: usize,
    /// Three-way ordering over stored values
    cmp: C,
}

impl<T, C, Ix> OrderTree<T, C, Ix>
where
    C: Fn(&T, &T) -> Ordering,
    Ix: IndexType,
{
    /// Creates a new `OrderTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(cmp: C, capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        OrderTree {
            nodes,
            root: Self::sentinel(),
            len: 0,
            cmp,
        }
    }

    /// Insert a value into the tree and return the index of the node now
    /// holding it.
    ///
    /// Values comparing equal to an already stored value are kept as
    /// distinct nodes, placed after the existing ones in symmetric order.
    ///
    /// Returns `None` without modifying the tree when the index space of
    /// `Ix` is exhausted; the input value is dropped in that case.
    ///
    /// # Example
    /// ```rust
    /// use rb_order_tree::OrderTree;
    ///
    /// let mut tree = OrderTree::natural();
    /// assert!(tree.insert(2).is_some());
    /// assert!(tree.insert(2).is_some());
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[inline]
    pub fn insert(&mut self, value: T) -> Option<NodeIndex<Ix>> {
        let node_idx = NodeIndex::new(self.nodes.len());
        // check for index exhaustion, except if we use usize
        if <Ix as IndexType>::max().index() != !0 && node_idx == NodeIndex::end() {
            return None;
        }
        self.nodes.push(Self::new_node(value));
        Some(self.insert_inner(node_idx))
    }

    /// Return a reference to the first stored value comparing equal to the
    /// probe.
    ///
    /// The probe is only inspected through the comparator; the caller keeps
    /// ownership of it.
    ///
    /// # Example
    /// ```rust
    /// use rb_order_tree::OrderTree;
    ///
    /// let mut tree = OrderTree::natural();
    /// tree.insert(16);
    /// tree.insert(23);
    /// assert_eq!(tree.get(&16), Some(&16));
    /// assert_eq!(tree.get(&99), None);
    /// ```
    #[inline]
    pub fn get(&self, probe: &T) -> Option<&T> {
        self.search_node(probe)
            .map(|idx| self.node_ref(idx, Node::value))
    }

    /// Check if the tree stores a value comparing equal to the probe.
    #[inline]
    pub fn contains(&self, probe: &T) -> bool {
        self.search_node(probe).is_some()
    }
}

impl<T, C> OrderTree<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Create an empty `OrderTree` ordered by `cmp`.
    ///
    /// # Example
    /// ```rust
    /// use rb_order_tree::OrderTree;
    ///
    /// let mut tree = OrderTree::new(|a: &i32, b: &i32| b.cmp(a));
    /// tree.insert(1);
    /// tree.insert(9);
    /// assert_eq!(tree.min(), Some(&9));
    /// ```
    #[inline]
    #[must_use]
    pub fn new(cmp: C) -> Self {
        Self {
            nodes: vec![Self::new_sentinel()],
            root: Self::sentinel(),
            len: 0,
            cmp,
        }
    }
}

impl<T> OrderTree<T, fn(&T, &T) -> Ordering>
where
    T: Ord,
{
    /// Create an empty `OrderTree` ordered by `T`'s own ordering.
    #[inline]
    #[must_use]
    pub fn natural() -> Self {
        Self::new(T::cmp)
    }
}

impl<T> Default for OrderTree<T, fn(&T, &T) -> Ordering>
where
    T: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::natural()
    }
}

impl<T, C, Ix> OrderTree<T, C, Ix>
where
    Ix: IndexType,
{
    /// Return the smallest stored value, or `None` if the tree is empty.
    ///
    /// # Example
    /// ```rust
    /// use rb_order_tree::OrderTree;
    ///
    /// let mut tree = OrderTree::natural();
    /// assert_eq!(tree.min(), None);
    /// tree.insert(2);
    /// tree.insert(1);
    /// assert_eq!(tree.min(), Some(&1));
    /// ```
    #[inline]
    pub fn min(&self) -> Option<&T> {
        if self.node_ref(self.root, Node::is_sentinel) {
            return None;
        }
        let idx = self.descend(self.root, Side::Left);
        Some(self.node_ref(idx, Node::value))
    }

    /// Return the largest stored value, or `None` if the tree is empty.
    #[inline]
    pub fn max(&self) -> Option<&T> {
        if self.node_ref(self.root, Node::is_sentinel) {
            return None;
        }
        let idx = self.descend(self.root, Side::Right);
        Some(self.node_ref(idx, Node::value))
    }

    /// Return the value stored at a node index previously returned by
    /// [`OrderTree::insert`], or `None` if the index is out of range or the
    /// sentinel.
    #[inline]
    pub fn value_at(&self, node: NodeIndex<Ix>) -> Option<&T> {
        self.nodes.get(node.index()).and_then(|n| n.value.as_ref())
    }

    /// Return the index of the root node, or `None` if the tree is empty.
    #[inline]
    pub fn root(&self) -> Option<NodeIndex<Ix>> {
        (!self.node_ref(self.root, Node::is_sentinel)).then_some(self.root)
    }

    /// Remove all elements from the tree
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = Self::sentinel();
        self.len = 0;
    }

    /// Return the number of elements in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T, C, Ix> OrderTree<T, C, Ix>
where
    Ix: IndexType,
{
    /// Create a new sentinel node
    fn new_sentinel() -> Node<T, Ix> {
        Node {
            children: [None, None],
            parent: None,
            color: Color::Black,
            value: None,
        }
    }

    /// Create a new tree node
    fn new_node(value: T) -> Node<T, Ix> {
        Node {
            children: [Some(Self::sentinel()), Some(Self::sentinel())],
            parent: Some(Self::sentinel()),
            color: Color::Red,
            value: Some(value),
        }
    }

    /// Get the sentinel node index
    fn sentinel() -> NodeIndex<Ix> {
        NodeIndex::new(0)
    }
}

impl<T, C, Ix> OrderTree<T, C, Ix>
where
    C: Fn(&T, &T) -> Ordering,
    Ix: IndexType,
{
    /// Insert a node into the tree.
    fn insert_inner(&mut self, z: NodeIndex<Ix>) -> NodeIndex<Ix> {
        let mut y = Self::sentinel();
        let mut x = self.root;

        while !self.node_ref(x, Node::is_sentinel) {
            y = x;
            x = match self.ordering(z, x) {
                Ordering::Less => self.node_ref(x, Node::left),
                _ => self.node_ref(x, Node::right),
            };
        }
        self.node_mut(z, Node::set_parent(y));
        if self.node_ref(y, Node::is_sentinel) {
            self.root = z;
        } else {
            let side = match self.ordering(z, y) {
                Ordering::Less => Side::Left,
                _ => Side::Right,
            };
            self.node_mut(y, Node::set_child(side, z));
        }

        self.insert_fixup(z);

        self.len = self.len.wrapping_add(1);
        z
    }

    /// Search for the node holding the first value equal to the probe.
    fn search_node(&self, probe: &T) -> Option<NodeIndex<Ix>> {
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            x = match (self.cmp)(probe, self.node_ref(x, Node::value)) {
                Ordering::Less => self.node_ref(x, Node::left),
                Ordering::Equal => return Some(x),
                Ordering::Greater => self.node_ref(x, Node::right),
            };
        }
        None
    }

    /// Order two stored values through the tree's comparator.
    fn ordering(&self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) -> Ordering {
        (self.cmp)(self.node_ref(a, Node::value), self.node_ref(b, Node::value))
    }
}

impl<T, C, Ix> OrderTree<T, C, Ix>
where
    Ix: IndexType,
{
    /// Restore red-black tree properties after an insert.
    ///
    /// Both handed cases run through the same body: `side` is the side of
    /// the grandparent holding `z`'s parent, and `!side` mirrors it.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.grand_parent_ref(z, Node::is_sentinel) {
                break;
            }
            let side = self.side_of(self.node_ref(z, Node::parent));
            let aunt = self.grand_parent_ref(z, |g| g.child(!side));
            if self.node_ref(aunt, Node::is_red) {
                self.parent_mut(z, Node::set_color(Color::Black));
                self.node_mut(aunt, Node::set_color(Color::Black));
                self.grand_parent_mut(z, Node::set_color(Color::Red));
                z = self.parent_ref(z, Node::parent);
            } else {
                if self.side_of(z) != side {
                    z = self.node_ref(z, Node::parent);
                    self.rotate(z, side);
                }
                self.parent_mut(z, Node::set_color(Color::Black));
                self.grand_parent_mut(z, Node::set_color(Color::Red));
                self.rotate(self.parent_ref(z, Node::parent), !side);
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Rotate `x` down toward `side`, lifting its `!side` child into `x`'s
    /// place. `rotate(x, Side::Left)` is the classic left-rotation.
    ///
    /// Preserves symmetric order; never touches colors or `len`.
    fn rotate(&mut self, x: NodeIndex<Ix>, side: Side) {
        let up = !side;
        if self.child_ref(x, up, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, |n| n.child(up));
        self.node_mut(x, Node::set_child(up, self.node_ref(y, |n| n.child(side))));
        if !self.child_ref(y, side, Node::is_sentinel) {
            self.child_mut(y, side, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_child(side, x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else {
            let side = self.side_of(x);
            self.parent_mut(x, Node::set_child(side, y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Which side of its parent a node hangs on. The parent must be a real
    /// node.
    fn side_of(&self, node: NodeIndex<Ix>) -> Side {
        if self.parent_ref(node, |p| p.child(Side::Left)) == node {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Walk from `x` as far as possible toward `side`.
    fn descend(&self, mut x: NodeIndex<Ix>, side: Side) -> NodeIndex<Ix> {
        while !self.child_ref(x, side, Node::is_sentinel) {
            x = self.node_ref(x, |n| n.child(side));
        }
        x
    }
}

// Read-only diagnostics so an external suite can certify the red-black
// invariants after arbitrary insertion sequences.
impl<T, C, Ix> OrderTree<T, C, Ix>
where
    Ix: IndexType,
{
    /// Check if the node at `node` is red. Out-of-range indices and the
    /// sentinel count as black.
    #[inline]
    pub fn is_red(&self, node: NodeIndex<Ix>) -> bool {
        self.nodes.get(node.index()).is_some_and(Node::is_red)
    }

    /// Check if the node at `node` is black. Out-of-range indices and the
    /// sentinel count as black.
    #[inline]
    pub fn is_black(&self, node: NodeIndex<Ix>) -> bool {
        !self.is_red(node)
    }

    /// Number of black nodes on every path from the root down to a missing
    /// child, or `None` if the counts disagree anywhere in the tree.
    ///
    /// An empty tree reports `Some(0)`.
    ///
    /// # Example
    /// ```rust
    /// use rb_order_tree::OrderTree;
    ///
    /// let mut tree = OrderTree::natural();
    /// for v in [4, 2, 6, 0, 3, 5, 8, 1, 7] {
    ///     tree.insert(v);
    /// }
    /// assert!(tree.black_height().is_some());
    /// ```
    #[inline]
    pub fn black_height(&self) -> Option<usize> {
        self.black_height_at(self.root)
    }

    /// Black-node count under the subtree rooted at `node`; the node itself
    /// contributes 1 when black. `None` if any two downward paths disagree.
    #[inline]
    pub fn black_height_at(&self, node: NodeIndex<Ix>) -> Option<usize> {
        if self.nodes.get(node.index()).is_none() {
            return Some(0);
        }
        self.black_height_inner(node)
    }

    fn black_height_inner(&self, x: NodeIndex<Ix>) -> Option<usize> {
        if self.node_ref(x, Node::is_sentinel) {
            return Some(0);
        }
        let left = self.black_height_inner(self.node_ref(x, Node::left))?;
        let right = self.black_height_inner(self.node_ref(x, Node::right))?;
        if left != right {
            return None;
        }
        Some(left + usize::from(self.node_ref(x, Node::is_black)))
    }

    /// Check if the node at `node` is red with a red child.
    #[inline]
    pub fn red_violation_at(&self, node: NodeIndex<Ix>) -> bool {
        if self.is_black(node) {
            return false;
        }
        self.left_ref(node, Node::is_red) || self.right_ref(node, Node::is_red)
    }

    /// Check if any red node in the tree has a red child.
    ///
    /// Scans the node arena directly; slots are dense because nodes are
    /// never removed.
    #[inline]
    pub fn has_red_violation(&self) -> bool {
        (1..self.nodes.len()).any(|i| self.red_violation_at(NodeIndex::new(i)))
    }

    /// Node count on the longest path from the root down to a leaf.
    ///
    /// An empty tree has height 0, a single node height 1. The red-black
    /// invariants bound this by `2 * log2(len + 1)`.
    #[inline]
    pub fn height(&self) -> usize {
        if self.node_ref(self.root, Node::is_sentinel) {
            return 0;
        }
        let mut height = 0;
        let mut queue = VecDeque::new();
        queue.push_back((self.root, 1));
        while let Some((x, depth)) = queue.pop_front() {
            height = height.max(depth);
            for side in [Side::Left, Side::Right] {
                let child = self.node_ref(x, |n| n.child(side));
                if !self.node_ref(child, Node::is_sentinel) {
                    queue.push_back((child, depth + 1));
                }
            }
        }
        height
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, T, C, Ix> OrderTree<T, C, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn child_ref<F, R>(&'a self, node: NodeIndex<Ix>, side: Side, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].child(side).index();
        op(&self.nodes[idx])
    }

    pub(crate) fn child_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, side: Side, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].child(side).index();
        op(&mut self.nodes[idx])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        self.child_ref(node, Side::Left, op)
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        self.child_ref(node, Side::Right, op)
    }

    pub(crate) fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    pub(crate) fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<T, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    pub(crate) fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<T, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

impl<T, C, Ix> fmt::Debug for OrderTree<T, C, Ix>
where
    T: fmt::Debug,
    Ix: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderTree")
            .field("nodes", &self.nodes)
            .field("root", &self.root)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}
