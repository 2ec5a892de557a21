//! Node definitions for generated binary trees
//!
//! A tree is strictly hierarchical: every node exclusively owns its children
//! through `Box`, there are no parent links, and a node either has exactly two
//! children or is an explicit leaf. "No node here" is only expressible at the
//! top level, as [`Tree::empty`].

use std::collections::VecDeque;
use std::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::number::Number;

/// Children of a node
#[derive(Debug, Clone, PartialEq)]
pub enum Branches {
    /// Explicit marker for a node without children
    Leaf,
    /// Left and right subtrees
    Fork(Box<Node>, Box<Node>),
}

/// One node of a generated tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub value: Number,
    pub branches: Branches,
}

impl Node {
    /// Create a leaf holding `value`
    pub fn leaf(value: Number) -> Self {
        Node {
            value,
            branches: Branches::Leaf,
        }
    }

    /// Create an inner node from two finished subtrees
    pub fn fork(value: Number, left: Node, right: Node) -> Self {
        Node {
            value,
            branches: Branches::Fork(Box::new(left), Box::new(right)),
        }
    }

    /// Attach two fresh leaves below this node, replacing any existing
    /// children. Reach them through [`Node::children_mut`].
    pub fn grow(&mut self, left: Number, right: Number) {
        self.branches = Branches::Fork(Box::new(Node::leaf(left)), Box::new(Node::leaf(right)));
    }

    /// Mutable access to the children, left first; empty for a leaf
    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        let pair = match &mut self.branches {
            Branches::Fork(l, r) => Some((l.as_mut(), r.as_mut())),
            Branches::Leaf => None,
        };
        pair.into_iter().flat_map(|(l, r)| [l, r])
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.branches, Branches::Leaf)
    }

    pub fn left(&self) -> Option<&Node> {
        match &self.branches {
            Branches::Fork(l, _) => Some(l),
            Branches::Leaf => None,
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match &self.branches {
            Branches::Fork(_, r) => Some(r),
            Branches::Leaf => None,
        }
    }

    fn children(&self) -> impl Iterator<Item = &Node> {
        self.left().into_iter().chain(self.right())
    }
}

/// A generated tree, possibly empty
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tree {
    root: Option<Node>,
}

impl Tree {
    /// The canonical empty tree (no node allocated)
    pub fn empty() -> Self {
        Tree { root: None }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels: 0 for the empty tree, 1 for a single leaf
    pub fn height(&self) -> u32 {
        self.leaf_depths()
            .into_iter()
            .max()
            .map_or(0, |deepest| deepest + 1)
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Depth of every leaf (root is depth 0), in breadth-first order
    pub fn leaf_depths(&self) -> Vec<u32> {
        let mut depths = Vec::new();
        let mut queue: VecDeque<(&Node, u32)> = self.root.iter().map(|n| (n, 0)).collect();

        while let Some((node, depth)) = queue.pop_front() {
            if node.is_leaf() {
                depths.push(depth);
            }
            for child in node.children() {
                queue.push_back((child, depth + 1));
            }
        }

        depths
    }

    /// Node values grouped by level, left to right
    pub fn levels(&self) -> Vec<Vec<Number>> {
        let mut levels: Vec<Vec<Number>> = Vec::new();
        let mut queue: VecDeque<(&Node, usize)> = self.root.iter().map(|n| (n, 0)).collect();

        while let Some((node, depth)) = queue.pop_front() {
            if levels.len() <= depth {
                levels.push(Vec::new());
            }
            levels[depth].push(node.value);
            for child in node.children() {
                queue.push_back((child, depth + 1));
            }
        }

        levels
    }

    /// True when every leaf sits on the last level.
    ///
    /// Together with [`Branches`] (which rules out single children) this means
    /// the tree holds exactly `2^height - 1` nodes.
    pub fn is_perfect(&self) -> bool {
        let depths = self.leaf_depths();
        depths.windows(2).all(|w| w[0] == w[1])
    }

    /// Pre-order iterator over all nodes
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: self.root.iter().collect(),
        }
    }

    /// Nested mapping form: `{"<value>": [left, right]}`, `{"<value>": []}`
    /// for a leaf and `null` for the empty tree.
    pub fn to_nested(&self) -> serde_json::Value {
        // Cannot fail: values are rendered as string keys, the rest is arrays.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// ASCII rendering, one node per line
    pub fn to_termtree(&self) -> Option<termtree::Tree<Number>> {
        self.root.as_ref().map(node_to_termtree)
    }
}

impl From<Node> for Tree {
    fn from(root: Node) -> Self {
        Tree { root: Some(root) }
    }
}

impl From<Option<Node>> for Tree {
    fn from(root: Option<Node>) -> Self {
        Tree { root }
    }
}

/// Pre-order node iterator, see [`Tree::nodes`]
pub struct Nodes<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self.stack.pop()?;
        if let Branches::Fork(l, r) = &node.branches {
            self.stack.push(r);
            self.stack.push(l);
        }
        Some(node)
    }
}

fn node_to_termtree(node: &Node) -> termtree::Tree<Number> {
    let mut tree = termtree::Tree::new(node.value);
    for child in node.children() {
        tree.push(node_to_termtree(child));
    }
    tree
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.value.to_string(), &ChildList(self))?;
        map.end()
    }
}

struct ChildList<'a>(&'a Node);

impl Serialize for ChildList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0.branches {
            Branches::Leaf => serializer.serialize_seq(Some(0))?.end(),
            Branches::Fork(l, r) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(l.as_ref())?;
                seq.serialize_element(r.as_ref())?;
                seq.end()
            }
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.root {
            Some(node) => node.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_termtree() {
            Some(tree) => write!(f, "{}", tree),
            None => writeln!(f, "(empty)"),
        }
    }
}
