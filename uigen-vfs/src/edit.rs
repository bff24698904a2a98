//! Edit engine: exact string replacement, line insertion, views, creation
//! and undo, layered on top of [`VirtualFileSystem`].
//!
//! Every mutating primitive writes through [`VirtualFileSystem::write`], so
//! the pre-edit content lands in the file's history and can be undone.

use crate::error::VfsError;
use crate::node::{DirEntry, FileNode};
use crate::path::normalize_path;
use crate::vfs::VirtualFileSystem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewResult {
    File {
        path: String,
        content: String,
        /// 1-based number of the first line in `content`.
        start_line: usize,
    },
    Directory {
        path: String,
        entries: Vec<DirEntry>,
    },
}

/// Split content into lines. Empty content has no lines; otherwise the
/// result has one more entry than there are `\n` characters.
pub fn split_lines(content: &str) -> Vec<&str> {
    if content.is_empty() {
        Vec::new()
    } else {
        content.split('\n').collect()
    }
}

/// Byte offsets of every occurrence of `needle`, overlapping ones included.
fn find_occurrences(haystack: &str, needle: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let abs = start + pos;
        positions.push(abs);
        let step = haystack[abs..].chars().next().map_or(1, char::len_utf8);
        start = abs + step;
    }
    positions
}

/// Return file content, optionally limited to a 1-based inclusive line range
/// (`end == -1` reads to end of file), or the listing of a directory.
pub fn view(
    vfs: &VirtualFileSystem,
    path: &str,
    range: Option<(i64, i64)>,
) -> Result<ViewResult, VfsError> {
    let (normalized, node) = vfs.node(path)?;
    let content = match node {
        FileNode::Directory { .. } => {
            let entries = vfs.list(&normalized)?;
            return Ok(ViewResult::Directory {
                path: normalized,
                entries,
            });
        }
        FileNode::File { content, .. } => content,
    };

    let Some((start, end)) = range else {
        return Ok(ViewResult::File {
            path: normalized,
            content: content.clone(),
            start_line: 1,
        });
    };

    let lines = split_lines(content);
    let count = lines.len() as i64;
    let end = if end == -1 { count } else { end };
    if start < 1 || start > count || end < start || end > count {
        return Err(VfsError::InvalidLineNumber(format!(
            "view range [{}, {}] is outside {} ({} lines)",
            start, end, normalized, count
        )));
    }

    Ok(ViewResult::File {
        path: normalized,
        content: lines[(start - 1) as usize..end as usize].join("\n"),
        start_line: start as usize,
    })
}

/// Create a new file. Unlike [`VirtualFileSystem::write`], this refuses to
/// touch a path that already holds a file or directory.
pub fn create(vfs: &mut VirtualFileSystem, path: &str, content: &str) -> Result<(), VfsError> {
    let normalized = normalize_path(path)?;
    if vfs.exists(&normalized) {
        return Err(VfsError::AlreadyExists(normalized));
    }
    vfs.write(&normalized, content)?;
    Ok(())
}

/// Replace the single occurrence of `old` with `new`. Returns the 1-based
/// line on which the replaced text started.
pub fn str_replace(
    vfs: &mut VirtualFileSystem,
    path: &str,
    old: &str,
    new: &str,
) -> Result<usize, VfsError> {
    if old.is_empty() {
        return Err(VfsError::InvalidArguments(
            "old_string must not be empty".to_string(),
        ));
    }

    let normalized = normalize_path(path)?;
    let content = vfs.read(&normalized)?;
    let positions = find_occurrences(&content, old);
    let pos = match positions.as_slice() {
        [] => return Err(VfsError::NoMatch(normalized)),
        [pos] => *pos,
        _ => {
            return Err(VfsError::AmbiguousMatch {
                path: normalized,
                count: positions.len(),
            })
        }
    };

    let mut updated = String::with_capacity(content.len() - old.len() + new.len());
    updated.push_str(&content[..pos]);
    updated.push_str(new);
    updated.push_str(&content[pos + old.len()..]);
    vfs.write(&normalized, &updated)?;

    Ok(content[..pos].matches('\n').count() + 1)
}

/// Insert `text` as a new line at zero-based `line`. `line` equal to the
/// current line count appends at the end of the file.
pub fn insert(
    vfs: &mut VirtualFileSystem,
    path: &str,
    line: usize,
    text: &str,
) -> Result<(), VfsError> {
    let normalized = normalize_path(path)?;
    let content = vfs.read(&normalized)?;
    let mut lines = split_lines(&content);
    if line > lines.len() {
        return Err(VfsError::InvalidLineNumber(format!(
            "{} is outside {} (valid range is 0-{})",
            line,
            normalized,
            lines.len()
        )));
    }
    lines.insert(line, text);
    vfs.write(&normalized, &lines.join("\n"))?;
    Ok(())
}

/// Restore the most recent history entry. Returns how many entries remain.
pub fn undo_edit(vfs: &mut VirtualFileSystem, path: &str) -> Result<usize, VfsError> {
    let (normalized, node) = vfs.file_mut(path)?;
    match node {
        FileNode::File { content, history } => {
            let prior = history.pop().ok_or(VfsError::NoHistory(normalized))?;
            *content = prior;
            Ok(history.len())
        }
        FileNode::Directory { .. } => Err(VfsError::IsDirectory(normalized)),
    }
}
