use std::ops::Not;

use crate::index::{IndexType, NodeIndex};

/// A child direction. `!side` is the mirror direction, which keeps the
/// left- and right-handed rebalancing cases in a single body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left = 0,
    Right = 1,
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Node of the order tree
#[derive(Debug)]
pub struct Node<T, Ix> {
    /// Children, addressed by `Side`
    pub children: [Option<NodeIndex<Ix>>; 2],
    /// Parent
    pub parent: Option<NodeIndex<Ix>>,
    /// Color of the node
    pub color: Color,

    /// Value of the node, `None` only in the sentinel
    pub value: Option<T>,
}

// Convenient getter/setter methods
impl<T, Ix> Node<T, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn child(&self, side: Side) -> NodeIndex<Ix> {
        self.children[side as usize].unwrap()
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.child(Side::Left)
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.child(Side::Right)
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent.unwrap()
    }

    pub fn is_sentinel(&self) -> bool {
        self.value.is_none()
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn value(&self) -> &T {
        self.value.as_ref().unwrap()
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            node.color = color;
        }
    }

    pub fn set_child(side: Side, child: NodeIndex<Ix>) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            let _ignore = node.children[side as usize].replace(child);
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<T, Ix>) {
        move |node: &mut Node<T, Ix>| {
            let _ignore = node.parent.replace(parent);
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}
