// ---------------------------------------------------------------------------
// In-memory VFS core: a directory tree rooted at `/`
// ---------------------------------------------------------------------------

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::VfsError;
use crate::node::{DirEntry, FileNode, NodeKind};
use crate::path::{join_path, join_segments, split_parent, split_path, ROOT};

/// Per-file undo depth used when no explicit cap is configured.
pub const DEFAULT_MAX_HISTORY: usize = 50;

// ---------------------------------------------------------------------------
// Serialized form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedNode {
	#[serde(rename = "type")]
	pub kind: NodeKind,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
}

impl SerializedNode {
	pub fn file(content: impl Into<String>) -> Self {
		Self {
			kind: NodeKind::File,
			content: Some(content.into()),
		}
	}

	pub fn directory() -> Self {
		Self {
			kind: NodeKind::Directory,
			content: None,
		}
	}
}

/// Flat path-keyed snapshot. Parents always precede their children.
pub type SerializedFs = IndexMap<String, SerializedNode>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResult {
	pub file_count: usize,
	pub directory_count: usize,
	pub total_size: u64,
}

// ---------------------------------------------------------------------------
// VirtualFileSystem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct VirtualFileSystem {
	root: FileNode,
	max_history: usize,
}

impl Default for VirtualFileSystem {
	fn default() -> Self {
		Self::new(DEFAULT_MAX_HISTORY)
	}
}

impl VirtualFileSystem {
	// -- Constructors -----------------------------------------------------

	pub fn new(max_history: usize) -> Self {
		Self {
			root: FileNode::directory(),
			max_history,
		}
	}

	pub fn from_nodes(nodes: &SerializedFs, max_history: usize) -> Result<Self, VfsError> {
		let mut vfs = Self::new(max_history);
		vfs.deserialize_from_nodes(nodes)?;
		Ok(vfs)
	}

	pub fn max_history(&self) -> usize {
		self.max_history
	}

	pub fn root(&self) -> &FileNode {
		&self.root
	}

	// -- Helpers (private) ------------------------------------------------

	fn resolve<'a>(&'a self, segments: &[&str], path: &str) -> Result<&'a FileNode, VfsError> {
		let mut node = &self.root;
		for seg in segments {
			node = node
				.children()
				.and_then(|c| c.get(*seg))
				.ok_or_else(|| VfsError::NotFound(path.to_string()))?;
		}
		Ok(node)
	}

	fn resolve_mut<'a>(
		&'a mut self,
		segments: &[&str],
		path: &str,
	) -> Result<&'a mut FileNode, VfsError> {
		let mut node = &mut self.root;
		for seg in segments {
			node = node
				.children_mut()
				.and_then(|c| c.get_mut(*seg))
				.ok_or_else(|| VfsError::NotFound(path.to_string()))?;
		}
		Ok(node)
	}

	/// Walk to the directory at `segments`, creating missing directories.
	///
	/// Fails only when an existing segment is a file. Since every segment
	/// before that one already existed, a failure never leaves partially
	/// created directories behind.
	fn ensure_directory<'a>(
		root: &'a mut FileNode,
		segments: &[&str],
	) -> Result<&'a mut IndexMap<String, FileNode>, VfsError> {
		let mut node = root;
		for (i, seg) in segments.iter().enumerate() {
			let children = node
				.children_mut()
				.ok_or_else(|| VfsError::NotDirectory(join_segments(&segments[..i])))?;
			node = children
				.entry(seg.to_string())
				.or_insert_with(FileNode::directory);
		}
		node.children_mut()
			.ok_or_else(|| VfsError::NotDirectory(join_segments(segments)))
	}

	/// Check that `ensure_directory(segments)` would succeed, without mutating.
	fn check_creatable(&self, segments: &[&str]) -> Result<(), VfsError> {
		let mut node = &self.root;
		for (i, seg) in segments.iter().enumerate() {
			match node.children().and_then(|c| c.get(*seg)) {
				Some(child) if child.is_directory() => node = child,
				Some(_) => return Err(VfsError::NotDirectory(join_segments(&segments[..=i]))),
				None => return Ok(()),
			}
		}
		Ok(())
	}

	/// Resolve a path to a node. Used by the edit engine for views.
	pub(crate) fn node(&self, path: &str) -> Result<(String, &FileNode), VfsError> {
		let segments = split_path(path)?;
		let normalized = join_segments(&segments);
		let node = self.resolve(&segments, &normalized)?;
		Ok((normalized, node))
	}

	/// Resolve a path to a file node for in-place history manipulation.
	pub(crate) fn file_mut(&mut self, path: &str) -> Result<(String, &mut FileNode), VfsError> {
		let segments = split_path(path)?;
		let normalized = join_segments(&segments);
		let node = self.resolve_mut(&segments, &normalized)?;
		if node.is_directory() {
			return Err(VfsError::IsDirectory(normalized));
		}
		Ok((normalized, node))
	}

	// -- File operations --------------------------------------------------

	pub fn read(&self, path: &str) -> Result<String, VfsError> {
		let (normalized, node) = self.node(path)?;
		match node {
			FileNode::File { content, .. } => Ok(content.clone()),
			FileNode::Directory { .. } => Err(VfsError::IsDirectory(normalized)),
		}
	}

	/// Create or overwrite a file. Returns `true` when the file is new.
	pub fn write(&mut self, path: &str, content: &str) -> Result<bool, VfsError> {
		let segments = split_path(path)?;
		let normalized = join_segments(&segments);
		let Some((parent, name)) = split_parent(&segments) else {
			return Err(VfsError::IsDirectory(ROOT.to_string()));
		};

		let max_history = self.max_history;
		let children = Self::ensure_directory(&mut self.root, parent)?;
		match children.get_mut(name) {
			Some(FileNode::Directory { .. }) => Err(VfsError::IsDirectory(normalized)),
			Some(node) => {
				node.replace_content(content.to_string(), max_history);
				Ok(false)
			}
			None => {
				children.insert(name.to_string(), FileNode::file(content));
				Ok(true)
			}
		}
	}

	/// Remove a file, or a directory with everything below it.
	pub fn delete(&mut self, path: &str) -> Result<NodeKind, VfsError> {
		let segments = split_path(path)?;
		let normalized = join_segments(&segments);
		let Some((parent, name)) = split_parent(&segments) else {
			return Err(VfsError::InvalidOperation(
				"Cannot delete root directory".to_string(),
			));
		};

		let removed = self
			.resolve_mut(parent, &normalized)?
			.children_mut()
			.and_then(|c| c.shift_remove(name))
			.ok_or_else(|| VfsError::NotFound(normalized))?;
		Ok(removed.kind())
	}

	// -- Directory operations ---------------------------------------------

	pub fn list(&self, path: &str) -> Result<Vec<DirEntry>, VfsError> {
		let (normalized, node) = self.node(path)?;
		let children = node
			.children()
			.ok_or(VfsError::NotDirectory(normalized))?;
		Ok(children
			.iter()
			.map(|(name, child)| DirEntry {
				name: name.clone(),
				kind: child.kind(),
			})
			.collect())
	}

	pub fn exists(&self, path: &str) -> bool {
		self.node(path).is_ok()
	}

	/// Move a subtree to a new path, creating intermediate directories.
	pub fn rename(&mut self, old_path: &str, new_path: &str) -> Result<(), VfsError> {
		let old_segments = split_path(old_path)?;
		let new_segments = split_path(new_path)?;
		let normalized_old = join_segments(&old_segments);
		let normalized_new = join_segments(&new_segments);

		let Some((old_parent, old_name)) = split_parent(&old_segments) else {
			return Err(VfsError::InvalidOperation(
				"Cannot rename root directory".to_string(),
			));
		};

		let node = self.resolve(&old_segments, &normalized_old)?;

		if self.resolve(&new_segments, &normalized_new).is_ok() {
			return Err(VfsError::AlreadyExists(normalized_new));
		}
		let Some((new_parent, new_name)) = split_parent(&new_segments) else {
			return Err(VfsError::AlreadyExists(ROOT.to_string()));
		};

		if node.is_directory() && new_segments.starts_with(&old_segments) {
			return Err(VfsError::InvalidOperation(format!(
				"Cannot move directory into its own descendant: {} -> {}",
				normalized_old, normalized_new
			)));
		}

		self.check_creatable(new_parent)?;

		let moved = self
			.resolve_mut(old_parent, &normalized_old)?
			.children_mut()
			.and_then(|c| c.shift_remove(old_name))
			.ok_or_else(|| VfsError::NotFound(normalized_old.clone()))?;

		match Self::ensure_directory(&mut self.root, new_parent) {
			Ok(children) => {
				children.insert(new_name.to_string(), moved);
				Ok(())
			}
			Err(e) => {
				// Put the subtree back where it came from.
				if let Some(children) = self
					.resolve_mut(old_parent, &normalized_old)
					.ok()
					.and_then(|n| n.children_mut())
				{
					children.insert(old_name.to_string(), moved);
				}
				Err(e)
			}
		}
	}

	// -- Snapshot & Restore -----------------------------------------------

	/// Flatten the tree into a path-keyed map. Every directory except the
	/// root is listed so empty directories survive a round trip.
	pub fn serialize(&self) -> SerializedFs {
		let mut out = SerializedFs::new();
		Self::collect(&self.root, ROOT, &mut out);
		out
	}

	fn collect(node: &FileNode, path: &str, out: &mut SerializedFs) {
		let Some(children) = node.children() else {
			return;
		};
		for (name, child) in children {
			let child_path = join_path(path, name);
			match child {
				FileNode::File { content, .. } => {
					out.insert(child_path, SerializedNode::file(content.clone()));
				}
				FileNode::Directory { .. } => {
					out.insert(child_path.clone(), SerializedNode::directory());
					Self::collect(child, &child_path, out);
				}
			}
		}
	}

	/// Replace the tree with one rebuilt from a flat map. Missing parent
	/// directories are created implicitly. The current tree is kept if any
	/// entry conflicts with another.
	pub fn deserialize_from_nodes(&mut self, nodes: &SerializedFs) -> Result<(), VfsError> {
		let mut root = FileNode::directory();

		for (path, entry) in nodes {
			let segments = split_path(path)?;
			let normalized = join_segments(&segments);
			let Some((parent, name)) = split_parent(&segments) else {
				if entry.kind == NodeKind::Directory {
					continue;
				}
				return Err(VfsError::IsDirectory(ROOT.to_string()));
			};

			let children = Self::ensure_directory(&mut root, parent)?;
			let existing = children.get(name).map(FileNode::kind);
			match (entry.kind, existing) {
				// Already created implicitly by a deeper entry.
				(NodeKind::Directory, Some(NodeKind::Directory)) => {}
				(_, Some(_)) => return Err(VfsError::AlreadyExists(normalized)),
				(NodeKind::Directory, None) => {
					children.insert(name.to_string(), FileNode::directory());
				}
				(NodeKind::File, None) => {
					let content = entry.content.clone().unwrap_or_default();
					children.insert(name.to_string(), FileNode::file(content));
				}
			}
		}

		self.root = root;
		Ok(())
	}

	// -- Metrics ----------------------------------------------------------

	pub fn metrics(&self) -> MetricsResult {
		let mut metrics = MetricsResult::default();
		Self::tally(&self.root, &mut metrics);
		metrics
	}

	fn tally(node: &FileNode, metrics: &mut MetricsResult) {
		let Some(children) = node.children() else {
			return;
		};
		for child in children.values() {
			match child {
				FileNode::File { content, .. } => {
					metrics.file_count += 1;
					metrics.total_size += content.len() as u64;
				}
				FileNode::Directory { .. } => {
					metrics.directory_count += 1;
					Self::tally(child, metrics);
				}
			}
		}
	}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
	use super::*;

	fn new_vfs() -> VirtualFileSystem {
		VirtualFileSystem::new(DEFAULT_MAX_HISTORY)
	}

	fn history_of(vfs: &mut VirtualFileSystem, path: &str) -> Vec<String> {
		match vfs.file_mut(path).unwrap().1 {
			FileNode::File { history, .. } => history.clone(),
			FileNode::Directory { .. } => panic!("expected file"),
		}
	}

	fn assert_unique_names(node: &FileNode) {
		if let Some(children) = node.children() {
			let mut names: Vec<&String> = children.keys().collect();
			let before = names.len();
			names.sort();
			names.dedup();
			assert_eq!(before, names.len());
			for child in children.values() {
				assert_unique_names(child);
			}
		}
	}

	// -- Constructor --

	#[test]
	fn new_vfs_is_empty_root() {
		let vfs = new_vfs();
		assert!(vfs.root().is_directory());
		assert!(vfs.exists("/"));
		assert!(vfs.list("/").unwrap().is_empty());
		assert_eq!(vfs.metrics(), MetricsResult::default());
	}

	// -- write / read --

	#[test]
	fn write_and_read_file() {
		let mut vfs = new_vfs();
		assert!(vfs.write("/hello.txt", "hello world").unwrap());
		assert_eq!(vfs.read("/hello.txt").unwrap(), "hello world");
	}

	#[test]
	fn write_creates_parents() {
		let mut vfs = new_vfs();
		vfs.write("/a/b/c.txt", "nested").unwrap();
		assert!(vfs.exists("/a"));
		assert!(vfs.exists("/a/b"));
		assert_eq!(vfs.read("/a/b/c.txt").unwrap(), "nested");
	}

	#[test]
	fn overwrite_pushes_history() {
		let mut vfs = new_vfs();
		vfs.write("/f.txt", "old").unwrap();
		assert!(history_of(&mut vfs, "/f.txt").is_empty());
		assert!(!vfs.write("/f.txt", "new").unwrap());
		assert_eq!(vfs.read("/f.txt").unwrap(), "new");
		assert_eq!(history_of(&mut vfs, "/f.txt"), vec!["old"]);
	}

	#[test]
	fn history_is_capped() {
		let mut vfs = VirtualFileSystem::new(2);
		for i in 0..5 {
			vfs.write("/f.txt", &format!("v{}", i)).unwrap();
		}
		assert_eq!(history_of(&mut vfs, "/f.txt"), vec!["v2", "v3"]);
	}

	#[test]
	fn write_then_overwrite_same_path_succeeds() {
		let mut vfs = new_vfs();
		vfs.write("/f.txt", "a").unwrap();
		vfs.write("/f.txt", "b").unwrap();
		assert_eq!(vfs.read("/f.txt").unwrap(), "b");
	}

	#[test]
	fn cannot_write_to_root() {
		let mut vfs = new_vfs();
		let err = vfs.write("/", "data").unwrap_err();
		assert!(matches!(err, VfsError::IsDirectory(_)));
	}

	#[test]
	fn cannot_overwrite_directory_with_file() {
		let mut vfs = new_vfs();
		vfs.write("/src/App.tsx", "x").unwrap();
		let err = vfs.write("/src", "x").unwrap_err();
		assert!(matches!(err, VfsError::IsDirectory(_)));
	}

	#[test]
	fn write_through_file_fails_without_side_effects() {
		let mut vfs = new_vfs();
		vfs.write("/a.txt", "x").unwrap();
		let err = vfs.write("/a.txt/b/c.txt", "y").unwrap_err();
		assert!(matches!(err, VfsError::NotDirectory(ref p) if p == "/a.txt"));
		assert_eq!(vfs.read("/a.txt").unwrap(), "x");
	}

	#[test]
	fn read_missing_and_directory() {
		let mut vfs = new_vfs();
		vfs.write("/src/App.tsx", "x").unwrap();
		assert!(matches!(vfs.read("/nope").unwrap_err(), VfsError::NotFound(_)));
		assert!(matches!(vfs.read("/src").unwrap_err(), VfsError::IsDirectory(_)));
		assert!(matches!(
			vfs.read("/src/App.tsx/inner").unwrap_err(),
			VfsError::NotFound(_)
		));
	}

	#[test]
	fn paths_are_normalized() {
		let mut vfs = new_vfs();
		vfs.write("src//App.tsx", "x").unwrap();
		assert_eq!(vfs.read("/src/App.tsx/").unwrap(), "x");
	}

	// -- delete --

	#[test]
	fn delete_file() {
		let mut vfs = new_vfs();
		vfs.write("/f.txt", "x").unwrap();
		assert_eq!(vfs.delete("/f.txt").unwrap(), NodeKind::File);
		assert!(!vfs.exists("/f.txt"));
	}

	#[test]
	fn delete_directory_recursively() {
		let mut vfs = new_vfs();
		vfs.write("/src/components/Button.tsx", "x").unwrap();
		vfs.write("/src/App.tsx", "y").unwrap();
		assert_eq!(vfs.delete("/src").unwrap(), NodeKind::Directory);
		assert!(!vfs.exists("/src/components/Button.tsx"));
		assert!(vfs.list("/").unwrap().is_empty());
	}

	#[test]
	fn delete_missing_fails() {
		let mut vfs = new_vfs();
		assert!(matches!(vfs.delete("/nope").unwrap_err(), VfsError::NotFound(_)));
		assert!(matches!(vfs.delete("/a/b").unwrap_err(), VfsError::NotFound(_)));
	}

	#[test]
	fn delete_root_fails() {
		let mut vfs = new_vfs();
		assert!(matches!(vfs.delete("/").unwrap_err(), VfsError::InvalidOperation(_)));
	}

	// -- list --

	#[test]
	fn list_preserves_insertion_order() {
		let mut vfs = new_vfs();
		vfs.write("/src/z.ts", "").unwrap();
		vfs.write("/src/a.ts", "").unwrap();
		vfs.write("/src/lib/m.ts", "").unwrap();
		let entries = vfs.list("/src").unwrap();
		let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
		assert_eq!(names, vec!["z.ts", "a.ts", "lib"]);
		assert_eq!(entries[2].kind, NodeKind::Directory);
	}

	#[test]
	fn list_errors() {
		let mut vfs = new_vfs();
		vfs.write("/f.txt", "x").unwrap();
		assert!(matches!(vfs.list("/f.txt").unwrap_err(), VfsError::NotDirectory(_)));
		assert!(matches!(vfs.list("/nope").unwrap_err(), VfsError::NotFound(_)));
	}

	// -- rename --

	#[test]
	fn rename_file() {
		let mut vfs = new_vfs();
		vfs.write("/src/App.tsx", "const x = 1;").unwrap();
		vfs.rename("/src/App.tsx", "/src/Main.tsx").unwrap();
		assert!(matches!(vfs.read("/src/App.tsx").unwrap_err(), VfsError::NotFound(_)));
		assert_eq!(vfs.read("/src/Main.tsx").unwrap(), "const x = 1;");
	}

	#[test]
	fn rename_preserves_history() {
		let mut vfs = new_vfs();
		vfs.write("/a.txt", "v1").unwrap();
		vfs.write("/a.txt", "v2").unwrap();
		vfs.rename("/a.txt", "/b.txt").unwrap();
		assert_eq!(history_of(&mut vfs, "/b.txt"), vec!["v1"]);
	}

	#[test]
	fn rename_directory_with_descendants() {
		let mut vfs = new_vfs();
		vfs.write("/src/components/Button.tsx", "btn").unwrap();
		vfs.rename("/src", "/app/source").unwrap();
		assert!(!vfs.exists("/src"));
		assert_eq!(vfs.read("/app/source/components/Button.tsx").unwrap(), "btn");
	}

	#[test]
	fn rename_to_existing_fails() {
		let mut vfs = new_vfs();
		vfs.write("/a.txt", "a").unwrap();
		vfs.write("/b.txt", "b").unwrap();
		let err = vfs.rename("/a.txt", "/b.txt").unwrap_err();
		assert!(matches!(err, VfsError::AlreadyExists(_)));
		assert_eq!(vfs.read("/a.txt").unwrap(), "a");
		assert_eq!(vfs.read("/b.txt").unwrap(), "b");
	}

	#[test]
	fn rename_same_path_fails() {
		let mut vfs = new_vfs();
		vfs.write("/a.txt", "a").unwrap();
		let err = vfs.rename("/a.txt", "/a.txt").unwrap_err();
		assert!(matches!(err, VfsError::AlreadyExists(_)));
	}

	#[test]
	fn rename_missing_fails() {
		let mut vfs = new_vfs();
		let err = vfs.rename("/nope", "/other").unwrap_err();
		assert!(matches!(err, VfsError::NotFound(_)));
	}

	#[test]
	fn rename_root_fails() {
		let mut vfs = new_vfs();
		let err = vfs.rename("/", "/x").unwrap_err();
		assert!(matches!(err, VfsError::InvalidOperation(_)));
	}

	#[test]
	fn rename_into_descendant_fails() {
		let mut vfs = new_vfs();
		vfs.write("/a/b/c.txt", "x").unwrap();
		let err = vfs.rename("/a", "/a/b/d").unwrap_err();
		assert!(matches!(err, VfsError::InvalidOperation(_)));
		assert_eq!(vfs.read("/a/b/c.txt").unwrap(), "x");
	}

	#[test]
	fn rename_through_file_leaves_tree_intact() {
		let mut vfs = new_vfs();
		vfs.write("/a.txt", "x").unwrap();
		vfs.write("/b.txt", "y").unwrap();
		let err = vfs.rename("/b.txt", "/a.txt/b.txt").unwrap_err();
		assert!(matches!(err, VfsError::NotDirectory(_)));
		assert_eq!(vfs.read("/b.txt").unwrap(), "y");
	}

	// -- serialize / deserialize --

	#[test]
	fn serialize_lists_files_and_directories() {
		let mut vfs = new_vfs();
		vfs.write("/src/App.tsx", "app").unwrap();
		vfs.write("/empty/.keep", "").unwrap();
		vfs.delete("/empty/.keep").unwrap();

		let snap = vfs.serialize();
		let keys: Vec<&str> = snap.keys().map(|k| k.as_str()).collect();
		assert_eq!(keys, vec!["/src", "/src/App.tsx", "/empty"]);
		assert_eq!(snap["/src/App.tsx"], SerializedNode::file("app"));
		assert_eq!(snap["/empty"], SerializedNode::directory());
	}

	#[test]
	fn serialized_json_shape() {
		let mut vfs = new_vfs();
		vfs.write("/src/App.tsx", "app").unwrap();
		let v = serde_json::to_value(vfs.serialize()).unwrap();
		assert_eq!(
			v,
			serde_json::json!({
				"/src": {"type": "directory"},
				"/src/App.tsx": {"type": "file", "content": "app"},
			})
		);
	}

	#[test]
	fn round_trip_preserves_structure_and_content() {
		let mut vfs = new_vfs();
		vfs.write("/App.jsx", "export default App").unwrap();
		vfs.write("/components/Card.tsx", "card").unwrap();
		vfs.write("/components/ui/Button.tsx", "btn").unwrap();
		vfs.write("/components/Card.tsx", "card v2").unwrap();
		vfs.write("/empty/x", "").unwrap();
		vfs.delete("/empty/x").unwrap();

		let snap = vfs.serialize();
		let restored = VirtualFileSystem::from_nodes(&snap, DEFAULT_MAX_HISTORY).unwrap();
		assert!(restored.root().same_tree(vfs.root()));
		assert_eq!(restored.serialize(), snap);
		assert!(restored.exists("/empty"));
	}

	#[test]
	fn deserialize_creates_implicit_parents() {
		let mut snap = SerializedFs::new();
		snap.insert("/src/lib/util.ts".into(), SerializedNode::file("u"));
		snap.insert("/src".into(), SerializedNode::directory());
		snap.insert("/".into(), SerializedNode::directory());
		let vfs = VirtualFileSystem::from_nodes(&snap, DEFAULT_MAX_HISTORY).unwrap();
		assert_eq!(vfs.read("/src/lib/util.ts").unwrap(), "u");
		assert_eq!(vfs.list("/src").unwrap().len(), 1);
	}

	#[test]
	fn deserialize_file_without_content_is_empty() {
		let mut snap = SerializedFs::new();
		snap.insert(
			"/a.txt".into(),
			SerializedNode {
				kind: NodeKind::File,
				content: None,
			},
		);
		let vfs = VirtualFileSystem::from_nodes(&snap, DEFAULT_MAX_HISTORY).unwrap();
		assert_eq!(vfs.read("/a.txt").unwrap(), "");
	}

	#[test]
	fn deserialize_conflict_keeps_current_tree() {
		let mut vfs = new_vfs();
		vfs.write("/keep.txt", "k").unwrap();

		let mut snap = SerializedFs::new();
		snap.insert("/a".into(), SerializedNode::file("x"));
		snap.insert("/a/b".into(), SerializedNode::file("y"));
		let err = vfs.deserialize_from_nodes(&snap).unwrap_err();
		assert!(matches!(err, VfsError::NotDirectory(_)));
		assert_eq!(vfs.read("/keep.txt").unwrap(), "k");
	}

	#[test]
	fn deserialize_duplicate_after_normalization_fails() {
		let mut snap = SerializedFs::new();
		snap.insert("/a.txt".into(), SerializedNode::file("1"));
		snap.insert("a.txt/".into(), SerializedNode::file("2"));
		let err = VirtualFileSystem::from_nodes(&snap, DEFAULT_MAX_HISTORY).unwrap_err();
		assert!(matches!(err, VfsError::AlreadyExists(_)));
	}

	#[test]
	fn deserialize_accepts_json_with_extra_fields() {
		let raw = serde_json::json!({
			"/": {"type": "directory", "name": "", "path": "/"},
			"/App.jsx": {"type": "file", "name": "App.jsx", "path": "/App.jsx", "content": "x"},
		});
		let snap: SerializedFs = serde_json::from_value(raw).unwrap();
		let vfs = VirtualFileSystem::from_nodes(&snap, DEFAULT_MAX_HISTORY).unwrap();
		assert_eq!(vfs.read("/App.jsx").unwrap(), "x");
	}

	// -- uniqueness & metrics --

	#[test]
	fn names_stay_unique_across_operations() {
		let mut vfs = new_vfs();
		vfs.write("/a/x.ts", "1").unwrap();
		vfs.write("/a/x.ts", "2").unwrap();
		vfs.write("/b/x.ts", "3").unwrap();
		let _ = vfs.rename("/b/x.ts", "/a/x.ts");
		vfs.rename("/b", "/a/b").unwrap();
		let _ = vfs.write("/a", "nope");
		assert_unique_names(vfs.root());
		assert_eq!(vfs.list("/a").unwrap().len(), 2);
	}

	#[test]
	fn metrics_count_nodes_and_bytes() {
		let mut vfs = new_vfs();
		vfs.write("/src/App.tsx", "12345").unwrap();
		vfs.write("/src/lib/a.ts", "123").unwrap();
		let m = vfs.metrics();
		assert_eq!(m.file_count, 2);
		assert_eq!(m.directory_count, 2);
		assert_eq!(m.total_size, 8);
	}
}
