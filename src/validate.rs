//! Structural checks of the red-black axioms.
//!
//! None of the tree operations call into this module; it exists so callers
//! and tests can verify a tree after arbitrary operation sequences.

use thiserror::Error;

use crate::index::{IndexType, NodeIndex};
use crate::node::Node;
use crate::rbtree::RbTree;

/// A broken red-black tree property, reported by [`RbTree::validate`].
///
/// Nodes are named by their arena slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Violation {
    /// The nil sentinel, standing for every absent child, is red.
    #[error("nil leaf is red")]
    RedSentinel,
    /// The root is red.
    #[error("root node {node} is red")]
    RedRoot { node: usize },
    /// The root points at a parent.
    #[error("root node {node} has parent {parent}")]
    RootHasParent { node: usize, parent: usize },
    /// A child does not point back at the node holding it.
    #[error("node {child} does not point back to its parent {parent}")]
    BrokenParentLink { parent: usize, child: usize },
    /// A red node has a red child.
    #[error("red node {parent} has red child {child}")]
    RedChildOfRed { parent: usize, child: usize },
    /// The two subtrees of a node have different black heights.
    #[error("node {node} has black height {left} on the left and {right} on the right")]
    BlackHeightMismatch {
        node: usize,
        left: usize,
        right: usize,
    },
    /// A key is not between the keys of its ancestors.
    #[error("key of node {node} is out of order")]
    OutOfOrder { node: usize },
    /// The number of reachable nodes differs from the recorded length.
    #[error("tree records {expected} keys but {found} are reachable")]
    LenMismatch { expected: usize, found: usize },
}

impl<K, Ix> RbTree<K, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Check every red-black and binary search tree property.
    ///
    /// Returns the black height of the tree: the number of black nodes on any
    /// path from the root down to an absent child, root included.
    ///
    /// # Example
    /// ```rust
    /// use rb_key_tree::RbTree;
    ///
    /// let tree: RbTree<i32> = (0..100).collect();
    /// assert!(tree.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<usize, Violation> {
        if self.node_ref(Self::sentinel(), Node::is_red) {
            return Err(Violation::RedSentinel);
        }
        let mut found = 0;
        let black_height = if self.node_ref(self.root, Node::is_sentinel) {
            0
        } else {
            let root = self.root;
            if self.node_ref(root, Node::is_red) {
                return Err(Violation::RedRoot { node: root.index() });
            }
            let parent = self.node_ref(root, Node::parent);
            if !self.node_ref(parent, Node::is_sentinel) {
                return Err(Violation::RootHasParent {
                    node: root.index(),
                    parent: parent.index(),
                });
            }
            self.check_subtree(root, None, None, &mut found)?
        };
        if found != self.len {
            return Err(Violation::LenMismatch {
                expected: self.len,
                found,
            });
        }
        Ok(black_height)
    }

    /// Check the subtree rooted at `x`, whose keys must lie strictly between
    /// `low` and `high`, returning its black height.
    fn check_subtree(
        &self,
        x: NodeIndex<Ix>,
        low: Option<&K>,
        high: Option<&K>,
        found: &mut usize,
    ) -> Result<usize, Violation> {
        if self.node_ref(x, Node::is_sentinel) {
            return Ok(0);
        }
        *found += 1;
        let key = self.node_ref(x, Node::key);
        if low.is_some_and(|low| key <= low) || high.is_some_and(|high| key >= high) {
            return Err(Violation::OutOfOrder { node: x.index() });
        }
        let left = self.node_ref(x, Node::left);
        let right = self.node_ref(x, Node::right);
        for child in [left, right] {
            if self.node_ref(child, Node::is_sentinel) {
                continue;
            }
            if self.node_ref(child, Node::parent) != x {
                return Err(Violation::BrokenParentLink {
                    parent: x.index(),
                    child: child.index(),
                });
            }
            if self.node_ref(x, Node::is_red) && self.node_ref(child, Node::is_red) {
                return Err(Violation::RedChildOfRed {
                    parent: x.index(),
                    child: child.index(),
                });
            }
        }
        let left_height = self.check_subtree(left, low, Some(key), found)?;
        let right_height = self.check_subtree(right, Some(key), high, found)?;
        if left_height != right_height {
            return Err(Violation::BlackHeightMismatch {
                node: x.index(),
                left: left_height,
                right: right_height,
            });
        }
        if self.node_ref(x, Node::is_black) {
            return Ok(left_height + 1);
        }
        Ok(left_height)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::{Color, Side};

    fn sample() -> RbTree<i32> {
        [2, 1, 4, 5].into_iter().collect()
    }

    #[test]
    fn empty_tree_has_zero_black_height() {
        assert_eq!(RbTree::<i32>::new().validate(), Ok(0));
    }

    #[test]
    fn balanced_tree_reports_black_height() {
        let tree = sample();
        // 2 is the black root, 1 and 4 are black, 5 is red under 4.
        assert_eq!(tree.validate(), Ok(2));
    }

    #[test]
    fn red_root_is_reported() {
        let mut tree = sample();
        let root = tree.root;
        tree.node_mut(root, Node::set_color(Color::Red));
        assert_eq!(
            tree.validate(),
            Err(Violation::RedRoot { node: root.index() })
        );
    }

    #[test]
    fn red_sentinel_is_reported() {
        let mut tree = sample();
        tree.node_mut(RbTree::<i32>::sentinel(), Node::set_color(Color::Red));
        assert_eq!(tree.validate(), Err(Violation::RedSentinel));
    }

    #[test]
    fn red_child_of_red_is_reported() {
        let mut tree = sample();
        let four = tree.find(&4).map(|n| n.index()).unwrap();
        let five = tree.find(&5).map(|n| n.index()).unwrap();
        tree.node_mut(four, Node::set_color(Color::Red));
        assert_eq!(
            tree.validate(),
            Err(Violation::RedChildOfRed {
                parent: four.index(),
                child: five.index(),
            })
        );
    }

    #[test]
    fn black_height_mismatch_is_reported() {
        let mut tree = sample();
        let five = tree.find(&5).map(|n| n.index()).unwrap();
        tree.node_mut(five, Node::set_color(Color::Black));
        let four = tree.find(&4).map(|n| n.index()).unwrap();
        assert_eq!(
            tree.validate(),
            Err(Violation::BlackHeightMismatch {
                node: four.index(),
                left: 0,
                right: 1,
            })
        );
    }

    #[test]
    fn out_of_order_key_is_reported() {
        let mut tree = sample();
        let one = tree.find(&1).map(|n| n.index()).unwrap();
        let _ignore = tree.node_mut(one, Node::take_key);
        tree.node_mut(one, Node::set_key(3));
        assert_eq!(
            tree.validate(),
            Err(Violation::OutOfOrder { node: one.index() })
        );
    }

    #[test]
    fn broken_parent_link_is_reported() {
        let mut tree = sample();
        let four = tree.find(&4).map(|n| n.index()).unwrap();
        let five = tree.find(&5).map(|n| n.index()).unwrap();
        let one = tree.find(&1).map(|n| n.index()).unwrap();
        tree.node_mut(five, Node::set_parent(one));
        assert_eq!(
            tree.validate(),
            Err(Violation::BrokenParentLink {
                parent: four.index(),
                child: five.index(),
            })
        );
    }

    #[test]
    fn len_mismatch_is_reported() {
        let mut tree = sample();
        let four = tree.find(&4).map(|n| n.index()).unwrap();
        tree.node_mut(four, Node::set_child(Side::Right, RbTree::<i32>::sentinel()));
        assert_eq!(
            tree.validate(),
            Err(Violation::LenMismatch {
                expected: 4,
                found: 3,
            })
        );
    }

    #[test]
    fn violations_render_readable_messages() {
        let err = Violation::RedChildOfRed {
            parent: 3,
            child: 4,
        };
        assert_eq!(err.to_string(), "red node 3 has red child 4");
    }
}
