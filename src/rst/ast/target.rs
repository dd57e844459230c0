//! Insertion cursor for tree construction.
//!
//!     The tree is only ever appended to while parsing, so a node is addressed by its
//!     path of child indices from the root. `NodeTarget` owns the root list and the path
//!     of the container currently receiving children; `None` means the root itself.

use crate::rst::ast::Node;
use crate::rst::error::ParseError;

/// Child indices from the document root down to a node.
pub type NodePath = Vec<usize>;

#[derive(Debug, Default)]
pub struct NodeTarget {
    root: Vec<Node>,
    parent: Option<NodePath>,
}

impl NodeTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the cursor back at the document root.
    pub fn reset(&mut self) {
        self.parent = None;
    }

    /// Redirect insertion into the child list of the node at `path`.
    pub fn set_parent(&mut self, path: &[usize]) -> Result<(), ParseError> {
        let node = self.node(path)?;
        if !node.is_container() {
            return Err(ParseError::NotAContainer {
                kind: node.kind_name(),
            });
        }
        self.parent = Some(path.to_vec());
        Ok(())
    }

    #[cfg(test)]
    fn current_parent(&self) -> Option<&[usize]> {
        self.parent.as_deref()
    }

    pub fn current_list(&self) -> Result<&[Node], ParseError> {
        match &self.parent {
            None => Ok(&self.root),
            Some(path) => {
                let node = self.node(path)?;
                node.children().ok_or(ParseError::NotAContainer {
                    kind: node.kind_name(),
                })
            }
        }
    }

    pub fn current_list_mut(&mut self) -> Result<&mut Vec<Node>, ParseError> {
        match self.parent.clone() {
            None => Ok(&mut self.root),
            Some(path) => self.list_mut(&path),
        }
    }

    /// Append to the current list and return the new node's path.
    pub fn append(&mut self, node: Node) -> Result<NodePath, ParseError> {
        let base = self.parent.clone().unwrap_or_default();
        self.append_at(&base, node)
    }

    /// Append into the container at `path` (the root when empty) without moving the cursor.
    pub fn append_to(&mut self, path: &[usize], node: Node) -> Result<NodePath, ParseError> {
        self.append_at(path, node)
    }

    fn append_at(&mut self, base: &[usize], node: Node) -> Result<NodePath, ParseError> {
        let list = if base.is_empty() {
            &mut self.root
        } else {
            self.list_mut(base)?
        };
        list.push(node);
        let mut path = base.to_vec();
        path.push(list.len() - 1);
        Ok(path)
    }

    /// Path of the last node in the current list.
    pub fn last_path(&self) -> Result<Option<NodePath>, ParseError> {
        let len = self.current_list()?.len();
        if len == 0 {
            return Ok(None);
        }
        let mut path = self.parent.clone().unwrap_or_default();
        path.push(len - 1);
        Ok(Some(path))
    }

    pub fn last(&self) -> Result<Option<&Node>, ParseError> {
        Ok(self.current_list()?.last())
    }

    pub fn node(&self, path: &[usize]) -> Result<&Node, ParseError> {
        let invalid = || ParseError::InvalidPath {
            path: path.to_vec(),
        };
        let (first, rest) = path.split_first().ok_or_else(invalid)?;
        let mut node = self.root.get(*first).ok_or_else(invalid)?;
        for index in rest {
            node = node
                .children()
                .and_then(|children| children.get(*index))
                .ok_or_else(invalid)?;
        }
        Ok(node)
    }

    pub fn node_mut(&mut self, path: &[usize]) -> Result<&mut Node, ParseError> {
        let invalid = || ParseError::InvalidPath {
            path: path.to_vec(),
        };
        let (first, rest) = path.split_first().ok_or_else(invalid)?;
        let mut node = self.root.get_mut(*first).ok_or_else(invalid)?;
        for index in rest {
            node = node
                .children_mut()
                .and_then(|children| children.get_mut(*index))
                .ok_or_else(invalid)?;
        }
        Ok(node)
    }

    fn list_mut(&mut self, path: &[usize]) -> Result<&mut Vec<Node>, ParseError> {
        let node = self.node_mut(path)?;
        let kind = node.kind_name();
        node.children_mut()
            .ok_or(ParseError::NotAContainer { kind })
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.root
    }
}
