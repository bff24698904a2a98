use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, Tool, STR_REPLACE_EDITOR_TOOL_NAME};
use crate::edit::{self, split_lines, ViewResult};
use crate::error::VfsError;
use crate::node::NodeKind;
use crate::vfs::VirtualFileSystem;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum StrReplaceCommand {
    View {
        path: String,
        #[serde(default)]
        view_range: Option<(i64, i64)>,
    },
    Create {
        path: String,
        #[serde(default)]
        file_text: String,
    },
    StrReplace {
        path: String,
        #[serde(alias = "old_str")]
        old_string: String,
        #[serde(default, alias = "new_str")]
        new_string: String,
    },
    Insert {
        path: String,
        insert_line: i64,
        #[serde(alias = "new_str")]
        new_string: String,
    },
    UndoEdit {
        path: String,
    },
}

pub struct StrReplaceEditor;

impl StrReplaceEditor {
    pub fn run(
        &self,
        vfs: &mut VirtualFileSystem,
        command: StrReplaceCommand,
    ) -> Result<String, VfsError> {
        match command {
            StrReplaceCommand::View { path, view_range } => {
                Ok(render_view(edit::view(vfs, &path, view_range)?))
            }
            StrReplaceCommand::Create { path, file_text } => {
                edit::create(vfs, &path, &file_text)?;
                Ok(format!("File created: {}", path))
            }
            StrReplaceCommand::StrReplace {
                path,
                old_string,
                new_string,
            } => {
                let line = edit::str_replace(vfs, &path, &old_string, &new_string)?;
                Ok(format!("Edited {}: replaced 1 occurrence starting at line {}", path, line))
            }
            StrReplaceCommand::Insert {
                path,
                insert_line,
                new_string,
            } => {
                let line = usize::try_from(insert_line).map_err(|_| {
                    VfsError::InvalidLineNumber(format!("{} is negative", insert_line))
                })?;
                edit::insert(vfs, &path, line, &new_string)?;
                Ok(format!("Inserted text at line {} of {}", line, path))
            }
            StrReplaceCommand::UndoEdit { path } => {
                let remaining = edit::undo_edit(vfs, &path)?;
                Ok(format!(
                    "Reverted last edit to {} ({} earlier version(s) remain)",
                    path, remaining
                ))
            }
        }
    }
}

/// Number file lines with a 1-based gutter; list directories one entry per line.
fn render_view(result: ViewResult) -> String {
    match result {
        ViewResult::File {
            content,
            start_line,
            ..
        } => {
            let lines = split_lines(&content);
            if lines.is_empty() {
                return "(empty file)".to_string();
            }
            lines
                .iter()
                .enumerate()
                .map(|(i, line)| format!("{}\t{}", start_line + i, line))
                .collect::<Vec<_>>()
                .join("\n")
        }
        ViewResult::Directory { entries, .. } => {
            if entries.is_empty() {
                return "(empty directory)".to_string();
            }
            entries
                .iter()
                .map(|e| match e.kind {
                    NodeKind::Directory => format!("[DIR] {}", e.name),
                    NodeKind::File => format!("[FILE] {}", e.name),
                })
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

impl Tool for StrReplaceEditor {
    fn name(&self) -> &'static str {
        STR_REPLACE_EDITOR_TOOL_NAME
    }

    fn description(&self) -> &'static str {
        "View, create and edit files in the project. `view` shows a file with line numbers \
         (or lists a directory), `create` writes a new file, `str_replace` replaces exactly one \
         occurrence of old_string, `insert` adds new_string as a line at insert_line, and \
         `undo_edit` reverts the last edit to a file."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "enum": ["view", "create", "str_replace", "insert", "undo_edit"],
                },
                "path": {
                    "type": "string",
                    "description": "Absolute path, e.g. /App.jsx",
                },
                "file_text": {
                    "type": "string",
                    "description": "Content of the new file (create)",
                },
                "old_string": {
                    "type": "string",
                    "description": "Exact text to replace; must occur exactly once (str_replace)",
                },
                "new_string": {
                    "type": "string",
                    "description": "Replacement text (str_replace) or line to insert (insert)",
                },
                "insert_line": {
                    "type": "integer",
                    "description": "Zero-based line index to insert before; the line count appends (insert)",
                },
                "view_range": {
                    "type": "array",
                    "items": {"type": "integer"},
                    "minItems": 2,
                    "maxItems": 2,
                    "description": "1-based inclusive [start, end]; end -1 reads to end of file (view)",
                },
            },
            "required": ["command", "path"],
        })
    }

    fn execute(&self, vfs: &mut VirtualFileSystem, args: Value) -> Result<String, VfsError> {
        let command: StrReplaceCommand = parse_args(args)?;
        self.run(vfs, command)
    }
}
