//! Arena-backed classification tree.
//!
//! Uses generational arena for memory-safe node references and O(1) lookups.
//! The tree owns all nodes; parent links are plain indices, never ownership
//! edges, so the whole tree is released as one unit.

use generational_arena::{Arena, Index};

use crate::domain::entities::{ClassificationEntry, SchemeMeta};

/// Tree node wrapping one classification entry.
///
/// The synthetic root carries no entry: it represents the scheme itself,
/// not a data row.
#[derive(Debug)]
pub struct ClassNode {
    /// Entry for this node, None only for the synthetic root
    pub entry: Option<ClassificationEntry>,
    /// Index of the parent node, None only for the synthetic root
    pub parent: Option<Index>,
    /// Indices of child nodes in insertion order
    pub children: Vec<Index>,
}

impl ClassNode {
    /// Code of this node, None for the synthetic root.
    pub fn code(&self) -> Option<&str> {
        self.entry.as_ref().map(|e| e.code.as_str())
    }
}

/// Complete classification hierarchy: one synthetic root plus one node per
/// entry. Built in a single pass and not mutated afterwards.
#[derive(Debug)]
pub struct ClassificationTree {
    arena: Arena<ClassNode>,
    root: Index,
    meta: SchemeMeta,
}

impl ClassificationTree {
    /// Create a tree containing only the synthetic root.
    pub fn new(meta: SchemeMeta) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(ClassNode {
            entry: None,
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root, meta }
    }

    /// Insert an entry node under the given parent and return its index.
    pub fn insert_node(&mut self, entry: ClassificationEntry, parent: Index) -> Index {
        let node_idx = self.arena.insert(ClassNode {
            entry: Some(entry),
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent_node) = self.arena.get_mut(parent) {
            parent_node.children.push(node_idx);
        }
        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&ClassNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn meta(&self) -> &SchemeMeta {
        &self.meta
    }

    /// Number of nodes including the synthetic root.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Depth-first preorder traversal starting at the synthetic root.
    ///
    /// Children are visited in insertion order, so a parent always precedes
    /// its children.
    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        match self.get_node(node_idx) {
            Some(node) => {
                1 + node
                    .children
                    .iter()
                    .map(|&child| self.calculate_depth(child))
                    .max()
                    .unwrap_or(0)
            }
            None => 0,
        }
    }

    /// Codes of all leaf nodes (entry nodes with no children).
    pub fn leaf_codes(&self) -> Vec<String> {
        self.iter()
            .filter_map(|(_, node)| match node.entry.as_ref() {
                Some(entry) if node.children.is_empty() => Some(entry.code.clone()),
                _ => None,
            })
            .collect()
    }

    /// Flatten the tree back into (code, parent code) pairs, preorder.
    ///
    /// A parent code of None means the node hangs directly under the
    /// synthetic root.
    pub fn flatten(&self) -> Vec<(String, Option<String>)> {
        self.iter()
            .filter_map(|(_, node)| {
                let entry = node.entry.as_ref()?;
                let parent_code = node
                    .parent
                    .and_then(|p| self.get_node(p))
                    .and_then(|p| p.code().map(str::to_string));
                Some((entry.code.clone(), parent_code))
            })
            .collect()
    }
}

pub struct TreeIterator<'a> {
    tree: &'a ClassificationTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a ClassificationTree) -> Self {
        Self {
            tree,
            stack: vec![tree.root()],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a ClassNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.get_node(current_idx)?;
        // Push children in reverse order for left-to-right traversal
        for &child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some((current_idx, node))
    }
}
