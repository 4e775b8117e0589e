use crate::index::{IndexType, NodeIndex};

/// Arena slot of the red-black tree.
///
/// The slot without a key is the nil sentinel.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, Ix> {
    /// Left child
    pub left: Option<NodeIndex<Ix>>,
    /// Right child
    pub right: Option<NodeIndex<Ix>>,
    /// Parent, a back reference used only for upward traversal
    pub parent: Option<NodeIndex<Ix>>,
    /// Color of the node
    pub color: Color,
    /// Key of the node, `None` for the sentinel
    pub key: Option<K>,
}

// Convenient getter/setter methods
impl<K, Ix> Node<K, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn key(&self) -> &K {
        self.key.as_ref().unwrap()
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left.unwrap()
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right.unwrap()
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent.unwrap()
    }

    pub fn child(side: Side) -> impl FnOnce(&Node<K, Ix>) -> NodeIndex<Ix> {
        move |node: &Node<K, Ix>| match side {
            Side::Left => node.left(),
            Side::Right => node.right(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.key.is_none()
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn take_key(&mut self) -> K {
        self.key.take().unwrap()
    }

    pub fn set_key(key: K) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            let _ignore = node.key.replace(key);
        }
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            node.color = color;
        }
    }

    pub fn set_child(side: Side, child: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            let slot = match side {
                Side::Left => &mut node.left,
                Side::Right => &mut node.right,
            };
            let _ignore = slot.replace(child);
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, Ix>) {
        move |node: &mut Node<K, Ix>| {
            let _ignore = node.parent.replace(parent);
        }
    }
}

/// The color of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}

/// Which child of its parent a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The mirrored side.
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn opposite_side_is_an_involution() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Left.opposite().opposite(), Side::Left);
    }

    #[test]
    fn set_child_targets_the_requested_side() {
        let mut node: Node<i32, u32> = Node {
            left: None,
            right: None,
            parent: None,
            color: Color::Red,
            key: Some(1),
        };
        Node::set_child(Side::Right, NodeIndex::new(5))(&mut node);
        assert_eq!(node.right, Some(NodeIndex::new(5)));
        assert_eq!(node.left, None);
        Node::set_child(Side::Left, NodeIndex::new(2))(&mut node);
        assert_eq!(Node::child(Side::Left)(&node), NodeIndex::new(2));
    }
}
