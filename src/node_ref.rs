use std::fmt;
use std::ptr;

use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::node::{Color, Node, Side};
use crate::rbtree::RbTree;

/// A read-only view of one node of an [`RbTree`].
///
/// Relations that point at the nil sentinel are reported as `None`, and the
/// color of an absent child is [`Color::Black`].
pub struct NodeRef<'a, K, Ix = DefaultIx> {
    /// Reference to the tree
    tree: &'a RbTree<K, Ix>,
    /// The viewed node
    index: NodeIndex<Ix>,
}

impl<'a, K, Ix> NodeRef<'a, K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(tree: &'a RbTree<K, Ix>, index: NodeIndex<Ix>) -> Self {
        debug_assert!(!tree.node_ref(index, Node::is_sentinel));
        NodeRef { tree, index }
    }

    /// Key stored in the node.
    #[inline]
    pub fn key(&self) -> &'a K {
        self.tree.node_ref(self.index, Node::key)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.tree.node_ref(self.index, Node::color)
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.tree.node_ref(self.index, Node::is_red)
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.tree.node_ref(self.index, Node::is_black)
    }

    /// Arena handle of the node, valid until the tree is next mutated.
    #[inline]
    pub fn index(&self) -> NodeIndex<Ix> {
        self.index
    }

    #[inline]
    pub fn parent(&self) -> Option<Self> {
        self.present(self.tree.node_ref(self.index, Node::parent))
    }

    #[inline]
    pub fn left(&self) -> Option<Self> {
        self.child(Side::Left)
    }

    #[inline]
    pub fn right(&self) -> Option<Self> {
        self.child(Side::Right)
    }

    #[inline]
    pub fn child(&self, side: Side) -> Option<Self> {
        self.present(self.tree.node_ref(self.index, Node::child(side)))
    }

    /// Color of the child on `side`; an absent child is black.
    #[inline]
    pub fn child_color(&self, side: Side) -> Color {
        self.tree.child_ref(self.index, side, Node::color)
    }

    /// `true` if the node has no present child.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    fn present(&self, index: NodeIndex<Ix>) -> Option<Self> {
        (!self.tree.node_ref(index, Node::is_sentinel)).then(|| NodeRef::new(self.tree, index))
    }
}

impl<K, Ix: Copy> Clone for NodeRef<'_, K, Ix> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, Ix: Copy> Copy for NodeRef<'_, K, Ix> {}

/// Two views are equal when they view the same slot of the same tree.
impl<K, Ix: PartialEq> PartialEq for NodeRef<'_, K, Ix> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl<K, Ix: Eq> Eq for NodeRef<'_, K, Ix> {}

impl<K, Ix> fmt::Debug for NodeRef<'_, K, Ix>
where
    K: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("index", &self.index)
            .field("key", self.key())
            .field("color", &self.color())
            .finish()
    }
}
