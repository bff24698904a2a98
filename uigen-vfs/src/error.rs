use thiserror::Error;

#[derive(Debug, Error)]
pub enum VfsError {
    #[error("No such file or directory: {0}")]
    NotFound(String),
    #[error("Not a directory: {0}")]
    NotDirectory(String),
    #[error("Is a directory: {0}")]
    IsDirectory(String),
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("No match found for old_string in {0}")]
    NoMatch(String),
    #[error("old_string matches {count} locations in {path}; include more surrounding context to make it unique")]
    AmbiguousMatch { path: String, count: usize },
    #[error("Invalid line number: {0}")]
    InvalidLineNumber(String),
    #[error("No edit history for {0}")]
    NoHistory(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("No active turn")]
    NoActiveTurn,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VfsError {
    pub fn code(&self) -> &str {
        match self {
            Self::NotFound(_) => "VFS_NOT_FOUND",
            Self::NotDirectory(_) => "VFS_NOT_DIRECTORY",
            Self::IsDirectory(_) => "VFS_IS_DIRECTORY",
            Self::AlreadyExists(_) => "VFS_ALREADY_EXISTS",
            Self::NoMatch(_) => "VFS_NO_MATCH",
            Self::AmbiguousMatch { .. } => "VFS_AMBIGUOUS_MATCH",
            Self::InvalidLineNumber(_) => "VFS_INVALID_LINE_NUMBER",
            Self::NoHistory(_) => "VFS_NO_HISTORY",
            Self::InvalidPath(_) => "VFS_INVALID_PATH",
            Self::InvalidOperation(_) => "VFS_INVALID_OPERATION",
            Self::InvalidArguments(_) => "VFS_INVALID_ARGUMENTS",
            Self::NoActiveTurn => "VFS_NO_ACTIVE_TURN",
            Self::Io(_) => "VFS_IO_ERROR",
            Self::Json(_) => "VFS_JSON_ERROR",
        }
    }

    pub fn to_json_rpc_error(&self) -> serde_json::Value {
        serde_json::json!({
            "vfsCode": self.code(),
            "message": self.to_string(),
        })
    }
}
