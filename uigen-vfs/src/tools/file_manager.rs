use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, Tool, FILE_MANAGER_TOOL_NAME};
use crate::error::VfsError;
use crate::node::NodeKind;
use crate::vfs::VirtualFileSystem;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum FileManagerCommand {
    Rename { path: String, new_path: String },
    Delete { path: String },
}

pub struct FileManager;

impl FileManager {
    pub fn run(
        &self,
        vfs: &mut VirtualFileSystem,
        command: FileManagerCommand,
    ) -> Result<String, VfsError> {
        match command {
            FileManagerCommand::Rename { path, new_path } => {
                vfs.rename(&path, &new_path)?;
                Ok(format!("Renamed {} to {}", path, new_path))
            }
            FileManagerCommand::Delete { path } => match vfs.delete(&path)? {
                NodeKind::File => Ok(format!("Deleted file {}", path)),
                NodeKind::Directory => Ok(format!("Deleted directory {} and its contents", path)),
            },
        }
    }
}

impl Tool for FileManager {
    fn name(&self) -> &'static str {
        FILE_MANAGER_TOOL_NAME
    }

    fn description(&self) -> &'static str {
        "Rename/move or delete files and directories. `rename` moves path to new_path, \
         creating parent directories as needed; `delete` removes a file or a whole directory."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "enum": ["rename", "delete"],
                },
                "path": {
                    "type": "string",
                    "description": "Absolute path of the file or directory",
                },
                "new_path": {
                    "type": "string",
                    "description": "Destination path (rename)",
                },
            },
            "required": ["command", "path"],
        })
    }

    fn execute(&self, vfs: &mut VirtualFileSystem, args: Value) -> Result<String, VfsError> {
        let command: FileManagerCommand = parse_args(args)?;
        self.run(vfs, command)
    }
}
