use crate::error::VfsError;

// ── Constants ───────────────────────────────────────────────────────────────

pub const ROOT: &str = "/";

// ── Path functions ──────────────────────────────────────────────────────────

/// Check if a path segment contains control characters.
fn has_forbidden_chars(segment: &str) -> bool {
    segment.bytes().any(|b| b <= 0x1f || b == 0x7f)
}

/// Split a slash-separated path into its non-empty segments.
///
/// Leading, trailing and repeated slashes are dropped, so `/src//App.tsx/`
/// yields `["src", "App.tsx"]` and both `""` and `"/"` yield no segments.
/// `.` and `..` are ordinary names here; the tree has no traversal.
pub fn split_path(path: &str) -> Result<Vec<&str>, VfsError> {
    let mut segments = Vec::new();
    for seg in path.split('/') {
        if seg.is_empty() {
            continue;
        }
        if has_forbidden_chars(seg) {
            return Err(VfsError::InvalidPath(format!(
                "Path segment contains control characters: {:?}",
                path
            )));
        }
        segments.push(seg);
    }
    Ok(segments)
}

/// Build the canonical absolute form of a segment list.
pub fn join_segments(segments: &[&str]) -> String {
    if segments.is_empty() {
        ROOT.to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Normalize a path to its canonical absolute form (`/a/b`, root is `/`).
pub fn normalize_path(path: &str) -> Result<String, VfsError> {
    Ok(join_segments(&split_path(path)?))
}

/// Append a child name to a canonical parent path.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent == ROOT {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Split segments into `(parent_segments, name)`. Returns `None` for the root.
pub fn split_parent<'a, 'b>(segments: &'b [&'a str]) -> Option<(&'b [&'a str], &'a str)> {
    let (name, parent) = segments.split_last()?;
    Some((parent, *name))
}


// ── Tests ───────────────────────────────────────────────────────────────────
