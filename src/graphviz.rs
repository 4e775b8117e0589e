use std::fmt::{self, Display, Write};

use crate::index::IndexType;
use crate::node::{Color, Side};
use crate::rbtree::RbTree;

impl<K, Ix> RbTree<K, Ix>
where
    K: Display,
    Ix: IndexType,
{
    /// Render the tree shape in graphviz DOT format.
    ///
    /// Absent children are drawn as small black points.
    pub fn write_dot<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "digraph rbtree {{")?;
        writeln!(out, "    node [style=filled, fontcolor=white];")?;
        for node in self.collect_nodes(|_| true) {
            let id = node.index().index();
            let fill = match node.color() {
                Color::Red => "red",
                Color::Black => "black",
            };
            writeln!(out, "    n{id} [label=\"{}\", fillcolor={fill}];", node.key())?;
            for (side, tag) in [(Side::Left, 'L'), (Side::Right, 'R')] {
                match node.child(side) {
                    Some(child) => {
                        writeln!(out, "    n{id} -> n{};", child.index().index())?;
                    }
                    None => {
                        writeln!(out, "    nil{id}{tag} [shape=point, color=black];")?;
                        writeln!(out, "    n{id} -> nil{id}{tag};")?;
                    }
                }
            }
        }
        writeln!(out, "}}")
    }

    /// [`write_dot`](Self::write_dot) into a fresh `String`.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        // Writing into a String never fails
        let _ignore = self.write_dot(&mut dot);
        dot
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_tree_renders_an_empty_graph() {
        let tree = RbTree::<i32>::new();
        assert_eq!(
            tree.to_dot(),
            "digraph rbtree {\n    node [style=filled, fontcolor=white];\n}\n"
        );
    }

    #[test]
    fn single_node_renders_with_nil_leaves() {
        let mut tree = RbTree::new();
        let _ignore = tree.insert(10);
        let dot = tree.to_dot();
        assert!(dot.contains("n1 [label=\"10\", fillcolor=black];"));
        assert!(dot.contains("n1 -> nil1L;"));
        assert!(dot.contains("n1 -> nil1R;"));
    }

    #[test]
    fn red_children_are_linked_to_parent() {
        let tree: RbTree<i32> = [2, 1, 3].into_iter().collect();
        let dot = tree.to_dot();
        assert!(dot.contains("n2 [label=\"1\", fillcolor=red];"));
        assert!(dot.contains("n3 [label=\"3\", fillcolor=red];"));
        assert!(dot.contains("n1 -> n2;"));
        assert!(dot.contains("n1 -> n3;"));
    }
}
