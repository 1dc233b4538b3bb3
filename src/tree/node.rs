use std::cmp::Ordering;
use std::collections::HashSet;

use snafu::Snafu;

use crate::records::Status;

const ELLIPSIS_NAME: &str = "...";
const DIRECTORY_SUFFIX: u8 = b'/';

/// An ordered list of sibling nodes.
pub type Tree = Vec<Node>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    Directory { children: Tree },
    /// Stand-in for a run of siblings hidden by the context selector.
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub status: Option<Status>,
    pub selected: bool,
    pub is_first: bool,
    pub is_last: bool,
}

impl Node {
    pub fn leaf(name: impl Into<String>, status: Option<Status>) -> Self {
        Self::with_kind(name.into(), NodeKind::Leaf, status)
    }

    pub fn directory(name: impl Into<String>, children: Tree) -> Self {
        Self::with_kind(name.into(), NodeKind::Directory { children }, None)
    }

    pub fn ellipsis() -> Self {
        Self::with_kind(ELLIPSIS_NAME.to_string(), NodeKind::Ellipsis, None)
    }

    fn with_kind(name: String, kind: NodeKind, status: Option<Status>) -> Self {
        Self {
            name,
            kind,
            status,
            selected: false,
            is_first: false,
            is_last: false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_directory()
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self.kind, NodeKind::Ellipsis)
    }

    /// Children of a directory, empty for anything else.
    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::Leaf | NodeKind::Ellipsis => &[],
        }
    }

    /// Same node with its children replaced. Leaves are returned unchanged.
    pub fn with_children(&self, children: Tree) -> Self {
        match self.kind {
            NodeKind::Directory { .. } => Self {
                kind: NodeKind::Directory { children },
                ..self.shallow_clone()
            },
            NodeKind::Leaf | NodeKind::Ellipsis => self.clone(),
        }
    }

    fn shallow_clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            kind: NodeKind::Leaf,
            status: self.status,
            selected: self.selected,
            is_first: self.is_first,
            is_last: self.is_last,
        }
    }

    /// Git's path order: names compare bytewise, with directories compared as
    /// if their name ended in `/`.
    pub fn order_cmp(&self, other: &Node) -> Ordering {
        self.order_key().cmp(other.order_key())
    }

    fn order_key(&self) -> impl Iterator<Item = u8> + '_ {
        let suffix = self.is_directory().then_some(DIRECTORY_SUFFIX);
        self.name.bytes().chain(suffix)
    }
}

/// Linear lookup of a sibling by name.
pub fn find_by_name<'a>(siblings: &'a [Node], name: &str) -> Option<&'a Node> {
    siblings.iter().find(|node| node.name == name)
}

/// Checks that a sibling list is strictly ordered and that no name repeats.
pub(crate) fn check_siblings(siblings: &[Node]) -> Result<(), TreeError> {
    let mut seen = HashSet::with_capacity(siblings.len());

    for (index, node) in siblings.iter().enumerate() {
        if let Some(previous) = index.checked_sub(1).map(|i| &siblings[i]) {
            if node.name != previous.name && node.order_cmp(previous) != Ordering::Greater {
                return Err(TreeError::Unsorted {
                    previous: previous.name.clone(),
                    next: node.name.clone(),
                });
            }
        }

        if !seen.insert(node.name.as_str()) {
            return Err(repeated_name_error(siblings, node));
        }
    }

    Ok(())
}

/// A repeated name is a collision when a file and a directory share it.
pub(crate) fn repeated_name_error(siblings: &[Node], repeated: &Node) -> TreeError {
    let mixed_kinds = siblings
        .iter()
        .filter(|node| node.name == repeated.name)
        .any(|node| node.is_directory() != repeated.is_directory());

    if mixed_kinds {
        TreeError::Collision {
            name: repeated.name.clone(),
        }
    } else {
        TreeError::Duplicate {
            name: repeated.name.clone(),
        }
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum TreeError {
    #[snafu(display("Paths are not sorted: '{}' appears before '{}'", previous, next))]
    Unsorted { previous: String, next: String },
    #[snafu(display("Entry '{}' appears more than once", name))]
    Duplicate { name: String },
    #[snafu(display("Entry '{}' is both a file and a directory", name))]
    Collision { name: String },
}
