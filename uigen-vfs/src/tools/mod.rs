//! Agent-facing tool adapters.
//!
//! Each tool takes a flat JSON argument record keyed by `command`, parses it
//! into a tagged enum at the boundary, runs it against the turn's
//! [`VirtualFileSystem`], and renders the outcome as text. Failures never
//! escape as Rust errors: they come back as [`ToolOutput`] with
//! `is_error` set so the agent can correct its next call.

pub mod file_manager;
pub mod str_replace;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::VfsError;
use crate::vfs::VirtualFileSystem;

pub use file_manager::{FileManager, FileManagerCommand};
pub use str_replace::{StrReplaceCommand, StrReplaceEditor};

// === Tool Name Constants ===

pub const STR_REPLACE_EDITOR_TOOL_NAME: &str = "str_replace_editor";
pub const FILE_MANAGER_TOOL_NAME: &str = "file_manager";

// === Result types ===

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput {
    pub content: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(err: &VfsError) -> Self {
        Self {
            content: format!("Error: {}", err),
            is_error: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

// === Tool trait ===

pub trait Tool {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON Schema for the argument record, advertised to the model.
    fn input_schema(&self) -> Value;

    fn execute(&self, vfs: &mut VirtualFileSystem, args: Value) -> Result<String, VfsError>;

    /// Run the tool and fold any failure into textual feedback.
    fn call(&self, vfs: &mut VirtualFileSystem, args: Value) -> ToolOutput {
        match self.execute(vfs, args) {
            Ok(content) => ToolOutput::success(content),
            Err(e) => {
                tracing::debug!(tool = self.name(), code = e.code(), "tool call failed: {}", e);
                ToolOutput::error(&e)
            }
        }
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

/// Look up a built-in tool by the name the model calls it with.
pub fn find_tool(name: &str) -> Option<&'static dyn Tool> {
    match name {
        STR_REPLACE_EDITOR_TOOL_NAME => Some(&StrReplaceEditor),
        FILE_MANAGER_TOOL_NAME => Some(&FileManager),
        _ => None,
    }
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![StrReplaceEditor.definition(), FileManager.definition()]
}

pub(crate) fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, VfsError> {
    serde_json::from_value(args).map_err(|e| VfsError::InvalidArguments(e.to_string()))
}

/// Label shown while a tool call is in flight, e.g. `Editing /App.jsx`.
/// Falls back to the tool name for unknown tools, commands, or a missing path.
pub fn status_message(tool_name: &str, args: &Value) -> String {
    let command = args.get("command").and_then(Value::as_str);
    let Some(path) = args.get("path").and_then(Value::as_str) else {
        return tool_name.to_string();
    };

    let verb = match (tool_name, command) {
        (STR_REPLACE_EDITOR_TOOL_NAME, Some("create")) => "Creating",
        (STR_REPLACE_EDITOR_TOOL_NAME, Some("str_replace" | "insert")) => "Editing",
        (STR_REPLACE_EDITOR_TOOL_NAME, Some("view")) => "Viewing",
        (STR_REPLACE_EDITOR_TOOL_NAME, Some("undo_edit")) => "Undoing edit on",
        (FILE_MANAGER_TOOL_NAME, Some("rename")) => "Renaming",
        (FILE_MANAGER_TOOL_NAME, Some("delete")) => "Deleting",
        _ => return tool_name.to_string(),
    };
    format!("{} {}", verb, path)
}
