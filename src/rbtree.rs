use std::cmp::Ordering;
use std::collections::VecDeque;

use log::{debug, trace};

use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::{IntoIter, Iter};
use crate::node::{Color, Node, Side};
use crate::node_ref::NodeRef;

/// An ordered set of unique keys, kept balanced as a red-black tree.
#[derive(Debug, Clone)]
pub struct RbTree<K, Ix = DefaultIx> {
    /// Vector that stores nodes, slot 0 is the nil sentinel
    pub(crate) nodes: Vec<Node<K, Ix>>,
    /// Root of the tree, the sentinel when empty
    pub(crate) root: NodeIndex<Ix>,
    /// Number of keys in the tree
    pub(crate) len: usize,
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `RbTree` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = vec![Self::new_sentinel()];
        nodes.reserve(capacity);
        RbTree {
            nodes,
            root: Self::sentinel(),
            len: 0,
        }
    }

    /// Insert a key into the tree.
    ///
    /// Returns `true` together with the new node if the key was absent, or
    /// `false` together with the node already holding the key. A duplicate
    /// insert leaves the tree untouched.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// let (inserted, node) = tree.insert(8);
    /// assert!(inserted);
    /// assert_eq!(node.key(), &8);
    /// let (inserted, node) = tree.insert(8);
    /// assert!(!inserted);
    /// assert_eq!(node.key(), &8);
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K) -> (bool, NodeRef<'_, K, Ix>) {
        let (parent, side) = match self.search_slot(&key) {
            Ok(existing) => return (false, NodeRef::new(self, existing)),
            Err(slot) => slot,
        };
        let node_idx = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != node_idx,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Self::new_node(key));
        self.insert_inner(node_idx, parent, side);
        debug!("inserted node {:?}, len = {}", node_idx, self.len);
        (true, NodeRef::new(self, node_idx))
    }

    /// Insert every key of `keys`, reporting for each whether it was new.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::RbTree;
    ///
    /// let mut tree = RbTree::new();
    /// assert_eq!(tree.insert_all([2, 1, 2]), vec![true, true, false]);
    /// ```
    pub fn insert_all<I>(&mut self, keys: I) -> Vec<bool>
    where
        I: IntoIterator<Item = K>,
    {
        keys.into_iter().map(|key| self.insert(key).0).collect()
    }

    /// Remove a key from the tree, returning `true` if it was present.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::RbTree;
    ///
    /// let mut tree: RbTree<i32> = [5, 14, 7].into_iter().collect();
    /// assert!(tree.remove(&14));
    /// assert!(!tree.remove(&14));
    /// assert!(tree.find(&14).is_none());
    /// ```
    #[inline]
    pub fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }

    /// Remove a key from the tree, returning the stored key if it was present.
    #[inline]
    pub fn take(&mut self, key: &K) -> Option<K> {
        let node_idx = self.search_slot(key).ok()?;
        let spliced = self.remove_inner(node_idx);
        // Swap the spliced node with the last node stored in the vector and update indices
        let node = self.nodes.swap_remove(spliced.index());
        let old = NodeIndex::<Ix>::new(self.nodes.len());
        self.update_idx(old, spliced);
        debug!("removed node {:?}, len = {}", spliced, self.len);
        node.key
    }

    /// Find the node holding `key`.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::RbTree;
    ///
    /// let tree: RbTree<i32> = [5, 14, 7, 8, 2, 12].into_iter().collect();
    /// assert_eq!(tree.find(&8).map(|n| *n.key()), Some(8));
    /// assert!(tree.find(&0).is_none());
    /// ```
    #[inline]
    pub fn find(&self, key: &K) -> Option<NodeRef<'_, K, Ix>> {
        self.search_slot(key)
            .ok()
            .map(|idx| NodeRef::new(self, idx))
    }

    /// Return `true` if the tree holds `key`.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.search_slot(key).is_ok()
    }

    /// The smallest key in the tree.
    #[inline]
    pub fn first(&self) -> Option<&K> {
        self.extreme(Side::Left)
    }

    /// The largest key in the tree.
    #[inline]
    pub fn last(&self) -> Option<&K> {
        self.extreme(Side::Right)
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    Ix: IndexType,
{
    /// Root node, `None` for an empty tree.
    #[inline]
    pub fn root(&self) -> Option<NodeRef<'_, K, Ix>> {
        (!self.node_ref(self.root, Node::is_sentinel)).then(|| NodeRef::new(self, self.root))
    }

    /// Nodes without any present child.
    ///
    /// The order of the returned nodes is unspecified.
    #[inline]
    pub fn leaf_nodes(&self) -> Vec<NodeRef<'_, K, Ix>> {
        self.collect_nodes(|node| node.is_leaf())
    }

    /// Nodes with at least one present child.
    ///
    /// The order of the returned nodes is unspecified.
    #[inline]
    pub fn non_leaf_nodes(&self) -> Vec<NodeRef<'_, K, Ix>> {
        self.collect_nodes(|node| !node.is_leaf())
    }

    /// Get an iterator over the keys of the tree, in ascending order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, Ix> {
        Iter::new(self)
    }

    /// Remove all keys from the tree
    #[inline]
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Self::new_sentinel());
        self.root = Self::sentinel();
        self.len = 0;
        debug!("tree cleared");
    }

    /// Return the number of keys in the tree.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the tree holds no keys.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nodes accepted by `filter`, in breadth-first order.
    pub(crate) fn collect_nodes<F>(&self, filter: F) -> Vec<NodeRef<'_, K, Ix>>
    where
        F: Fn(&NodeRef<'_, K, Ix>) -> bool,
    {
        let mut list = Vec::new();
        let mut queue = VecDeque::new();
        queue.extend(self.root());
        while let Some(node) = queue.pop_front() {
            queue.extend(node.left());
            queue.extend(node.right());
            if filter(&node) {
                list.push(node);
            }
        }
        list
    }

    /// Create a new sentinel node
    fn new_sentinel() -> Node<K, Ix> {
        Node {
            key: None,
            left: None,
            right: None,
            parent: None,
            color: Color::Black,
        }
    }

    /// Create a new tree node
    fn new_node(key: K) -> Node<K, Ix> {
        Node {
            key: Some(key),
            left: Some(Self::sentinel()),
            right: Some(Self::sentinel()),
            parent: Some(Self::sentinel()),
            color: Color::Red,
        }
    }

    /// Get the sentinel node index
    pub(crate) fn sentinel() -> NodeIndex<Ix> {
        NodeIndex::new(0)
    }

    fn extreme(&self, side: Side) -> Option<&K> {
        let mut x = self.root;
        if self.node_ref(x, Node::is_sentinel) {
            return None;
        }
        while !self.child_ref(x, side, Node::is_sentinel) {
            x = self.node_ref(x, Node::child(side));
        }
        Some(self.node_ref(x, Node::key))
    }
}

impl<K> RbTree<K>
where
    K: Ord,
{
    /// Create an empty `RbTree`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Self::new_sentinel()],
            root: Self::sentinel(),
            len: 0,
        }
    }
}

impl<K> Default for RbTree<K>
where
    K: Ord,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, Ix> Extend<K> for RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            let _ignore = self.insert(key);
        }
    }
}

impl<K, Ix> FromIterator<K> for RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = Self::with_capacity(0);
        tree.extend(keys);
        tree
    }
}

impl<'a, K, Ix> IntoIterator for &'a RbTree<K, Ix>
where
    Ix: IndexType,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, Ix> IntoIterator for RbTree<K, Ix>
where
    Ix: IndexType,
{
    type Item = K;
    type IntoIter = IntoIter<K, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Descend from the root looking for `key`.
    ///
    /// Returns the node holding it, or the parent and side a new node for it
    /// would hang from.
    fn search_slot(&self, key: &K) -> Result<NodeIndex<Ix>, (NodeIndex<Ix>, Side)> {
        let mut parent = Self::sentinel();
        let mut side = Side::Left;
        let mut x = self.root;
        while !self.node_ref(x, Node::is_sentinel) {
            parent = x;
            side = match key.cmp(self.node_ref(x, Node::key)) {
                Ordering::Equal => return Ok(x),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            x = self.node_ref(x, Node::child(side));
        }
        Err((parent, side))
    }

    /// Link a fresh red node under `parent` and rebalance.
    fn insert_inner(&mut self, z: NodeIndex<Ix>, parent: NodeIndex<Ix>, side: Side) {
        self.node_mut(z, Node::set_parent(parent));
        if self.node_ref(parent, Node::is_sentinel) {
            self.root = z;
        } else {
            self.node_mut(parent, Node::set_child(side, z));
        }
        self.insert_fixup(z);
        self.len = self.len.wrapping_add(1);
    }

    /// Unlink the node holding the key of `z`, returning the slot that left the tree.
    ///
    /// A node with two children trades keys with its in-order successor and the
    /// successor is spliced out instead.
    fn remove_inner(&mut self, z: NodeIndex<Ix>) -> NodeIndex<Ix> {
        let mut y = z;
        if !self.left_ref(z, Node::is_sentinel) && !self.right_ref(z, Node::is_sentinel) {
            y = self.tree_minimum(self.node_ref(z, Node::right));
            self.swap_keys(z, y);
        }
        let x = if self.left_ref(y, Node::is_sentinel) {
            self.node_ref(y, Node::right)
        } else {
            self.node_ref(y, Node::left)
        };
        let parent = self.node_ref(y, Node::parent);
        let side = if self.node_ref(parent, Node::is_sentinel) {
            Side::Left
        } else {
            self.side_of(y)
        };
        self.transplant(y, x);

        if self.node_ref(y, Node::is_black) {
            self.remove_fixup(x, parent, side);
        }

        self.len = self.len.wrapping_sub(1);
        y
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            let parent = self.node_ref(z, Node::parent);
            let grand_parent = self.node_ref(parent, Node::parent);
            if self.node_ref(grand_parent, Node::is_sentinel) {
                break;
            }
            let parent_side = self.side_of(parent);
            let uncle = self.node_ref(grand_parent, Node::child(parent_side.opposite()));
            if self.node_ref(uncle, Node::is_red) {
                trace!("insert fixup at {:?}: red uncle, recolor", z);
                self.node_mut(parent, Node::set_color(Color::Black));
                self.node_mut(uncle, Node::set_color(Color::Black));
                self.node_mut(grand_parent, Node::set_color(Color::Red));
                z = grand_parent;
            } else {
                if self.side_of(z) != parent_side {
                    trace!("insert fixup at {:?}: inner child, rotate parent", z);
                    z = parent;
                    self.rotate(z, parent_side);
                }
                trace!("insert fixup at {:?}: outer child, rotate grandparent", z);
                self.parent_mut(z, Node::set_color(Color::Black));
                self.node_mut(grand_parent, Node::set_color(Color::Red));
                self.rotate(grand_parent, parent_side.opposite());
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a black node left position
    /// `side` of `parent`, now held by `x`.
    fn remove_fixup(
        &mut self,
        mut x: NodeIndex<Ix>,
        mut parent: NodeIndex<Ix>,
        mut side: Side,
    ) {
        while x != self.root && self.node_ref(x, Node::is_black) {
            let far = side.opposite();
            let mut w = self.node_ref(parent, Node::child(far));
            if self.node_ref(w, Node::is_red) {
                trace!("remove fixup under {:?}: red sibling", parent);
                self.node_mut(w, Node::set_color(Color::Black));
                self.node_mut(parent, Node::set_color(Color::Red));
                self.rotate(parent, side);
                w = self.node_ref(parent, Node::child(far));
            }
            debug_assert!(
                !self.node_ref(w, Node::is_sentinel),
                "double black position without sibling"
            );
            if self.node_ref(w, Node::is_sentinel) {
                break;
            }
            if self.child_ref(w, side, Node::is_black) && self.child_ref(w, far, Node::is_black) {
                trace!("remove fixup under {:?}: black sibling, black nephews", parent);
                self.node_mut(w, Node::set_color(Color::Red));
                x = parent;
                parent = self.node_ref(x, Node::parent);
                if !self.node_ref(parent, Node::is_sentinel) {
                    side = self.side_of(x);
                }
            } else {
                if self.child_ref(w, far, Node::is_black) {
                    trace!("remove fixup under {:?}: red near nephew", parent);
                    self.child_mut(w, side, Node::set_color(Color::Black));
                    self.node_mut(w, Node::set_color(Color::Red));
                    self.rotate(w, far);
                    w = self.node_ref(parent, Node::child(far));
                }
                trace!("remove fixup under {:?}: red far nephew", parent);
                self.node_mut(w, Node::set_color(self.node_ref(parent, Node::color)));
                self.node_mut(parent, Node::set_color(Color::Black));
                self.child_mut(w, far, Node::set_color(Color::Black));
                self.rotate(parent, side);
                x = self.root;
            }
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree rotation moving `x` down towards `dir`.
    ///
    /// `rotate(x, Side::Left)` is the classic left rotation.
    fn rotate(&mut self, x: NodeIndex<Ix>, dir: Side) {
        let rise = dir.opposite();
        if self.child_ref(x, rise, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::child(rise));
        let inner = self.node_ref(y, Node::child(dir));
        self.node_mut(x, Node::set_child(rise, inner));
        if !self.node_ref(inner, Node::is_sentinel) {
            self.node_mut(inner, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_child(dir, x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        let parent = self.node_ref(x, Node::parent);
        self.node_mut(y, Node::set_parent(parent));
        if self.node_ref(parent, Node::is_sentinel) {
            self.root = y;
        } else {
            let side = self.side_of(x);
            self.node_mut(parent, Node::set_child(side, y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Find the node with the minimum key.
    fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Replace one subtree as a child of its parent with another subtree.
    ///
    /// The sentinel never records a parent.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        let parent = self.node_ref(u, Node::parent);
        if self.node_ref(parent, Node::is_sentinel) {
            self.root = v;
        } else {
            let side = self.side_of(u);
            self.node_mut(parent, Node::set_child(side, v));
        }
        if !self.node_ref(v, Node::is_sentinel) {
            self.node_mut(v, Node::set_parent(parent));
        }
    }

    fn swap_keys(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) {
        let key_a = self.node_mut(a, Node::take_key);
        let key_b = self.node_mut(b, Node::take_key);
        self.node_mut(a, Node::set_key(key_b));
        self.node_mut(b, Node::set_key(key_a));
    }

    /// Which child of its parent a non-root node is.
    fn side_of(&self, node: NodeIndex<Ix>) -> Side {
        if self.parent_ref(node, Node::left) == node {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Point every relation that referenced slot `old` at slot `new`.
    ///
    /// Called after `swap_remove` moved the last node into the freed slot.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        if self.root == old {
            self.root = new;
        }
        if self.nodes.get(new.index()).is_none() {
            return;
        }
        let parent = self.node_ref(new, Node::parent);
        if !self.node_ref(parent, Node::is_sentinel) {
            if self.node_ref(parent, Node::left) == old {
                self.node_mut(parent, Node::set_child(Side::Left, new));
            } else {
                debug_assert!(self.node_ref(parent, Node::right) == old);
                self.node_mut(parent, Node::set_child(Side::Right, new));
            }
        }
        for side in [Side::Left, Side::Right] {
            let child = self.node_ref(new, Node::child(side));
            if !self.node_ref(child, Node::is_sentinel) {
                self.node_mut(child, Node::set_parent(new));
            }
        }
    }
}

// Convenient methods for reference or mutate current/parent/child node
impl<'a, K, Ix> RbTree<K, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn child_ref<F, R>(&'a self, node: NodeIndex<Ix>, side: Side, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = Node::child(side)(&self.nodes[node.index()]).index();
        op(&self.nodes[idx])
    }

    fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        self.child_ref(node, Side::Left, op)
    }

    fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        self.child_ref(node, Side::Right, op)
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn child_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, side: Side, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = Node::child(side)(&self.nodes[node.index()]).index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }
}
