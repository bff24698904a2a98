pub mod config;
pub mod edit;
pub mod error;
pub mod node;
pub mod path;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod transport;
pub mod turn;
pub mod vfs;

pub use error::VfsError;
pub use node::{DirEntry, FileNode, NodeKind};
pub use turn::{Turn, TurnConfig};
pub use vfs::{SerializedFs, SerializedNode, VirtualFileSystem};
