//! Tree node model.
//!
//! Every directory exclusively owns its children; there are no parent
//! pointers. Lookups always walk down from the root.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNode {
    File {
        content: String,
        /// Prior content snapshots, oldest first.
        history: Vec<String>,
    },
    Directory {
        children: IndexMap<String, FileNode>,
    },
}

impl FileNode {
    pub fn file(content: impl Into<String>) -> Self {
        Self::File {
            content: content.into(),
            history: Vec::new(),
        }
    }

    pub fn directory() -> Self {
        Self::Directory {
            children: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::File { .. } => NodeKind::File,
            Self::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory { .. })
    }

    pub fn children(&self) -> Option<&IndexMap<String, FileNode>> {
        match self {
            Self::Directory { children } => Some(children),
            Self::File { .. } => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut IndexMap<String, FileNode>> {
        match self {
            Self::Directory { children } => Some(children),
            Self::File { .. } => None,
        }
    }

    /// Replace a file's content, recording the old content in history.
    /// History beyond `max_history` entries is trimmed from the oldest end.
    pub(crate) fn replace_content(&mut self, new_content: String, max_history: usize) {
        if let Self::File { content, history } = self {
            let prior = std::mem::replace(content, new_content);
            history.push(prior);
            if history.len() > max_history {
                let drain_count = history.len() - max_history;
                history.drain(0..drain_count);
            }
        }
    }

    /// Compare structure and content, ignoring edit history.
    pub fn same_tree(&self, other: &FileNode) -> bool {
        match (self, other) {
            (Self::File { content: a, .. }, Self::File { content: b, .. }) => a == b,
            (Self::Directory { children: a }, Self::Directory { children: b }) => {
                a.len() == b.len()
                    && a.iter().all(|(name, node)| {
                        b.get(name).is_some_and(|other| node.same_tree(other))
                    })
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
}
