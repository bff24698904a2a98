//! One generation turn: a VFS rebuilt from the last snapshot, a bounded
//! sequence of tool calls against it, and a single serialization at the end.
//!
//! Dropping a [`Turn`] without calling [`Turn::finish`] discards every edit
//! made during it.

use serde_json::Value;

use crate::error::VfsError;
use crate::tools::{find_tool, status_message, ToolOutput};
use crate::vfs::{SerializedFs, VirtualFileSystem, DEFAULT_MAX_HISTORY};

/// Matches the step cap the chat handler places on a single generation.
pub const DEFAULT_MAX_STEPS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnConfig {
    pub max_steps: usize,
    pub max_history: usize,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallRecord {
    pub step: usize,
    pub tool_name: String,
    pub label: String,
    pub output: ToolOutput,
}

pub struct Turn {
    vfs: VirtualFileSystem,
    config: TurnConfig,
    steps: usize,
}

impl Turn {
    pub fn begin(snapshot: Option<&SerializedFs>, config: TurnConfig) -> Result<Self, VfsError> {
        let vfs = match snapshot {
            Some(nodes) => VirtualFileSystem::from_nodes(nodes, config.max_history)?,
            None => VirtualFileSystem::new(config.max_history),
        };
        let metrics = vfs.metrics();
        tracing::info!(
            files = metrics.file_count,
            directories = metrics.directory_count,
            max_steps = config.max_steps,
            "turn started"
        );
        Ok(Self {
            vfs,
            config,
            steps: 0,
        })
    }

    pub fn vfs(&self) -> &VirtualFileSystem {
        &self.vfs
    }

    pub fn config(&self) -> TurnConfig {
        self.config
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Dispatch one tool call. Unknown tools and calls beyond the step budget
    /// come back as error outputs and leave the VFS untouched.
    pub fn call_tool(&mut self, tool_name: &str, args: Value) -> ToolCallRecord {
        let label = status_message(tool_name, &args);

        if self.steps >= self.config.max_steps {
            tracing::warn!(tool = tool_name, max_steps = self.config.max_steps, "step budget exhausted");
            return ToolCallRecord {
                step: self.steps,
                tool_name: tool_name.to_string(),
                label,
                output: ToolOutput::error(&VfsError::InvalidOperation(format!(
                    "Step limit of {} tool calls reached for this turn",
                    self.config.max_steps
                ))),
            };
        }
        self.steps += 1;

        let output = match find_tool(tool_name) {
            Some(tool) => tool.call(&mut self.vfs, args),
            None => ToolOutput::error(&VfsError::InvalidArguments(format!(
                "Unknown tool: {}",
                tool_name
            ))),
        };
        tracing::debug!(
            step = self.steps,
            tool = tool_name,
            is_error = output.is_error,
            "{}",
            label
        );

        ToolCallRecord {
            step: self.steps,
            tool_name: tool_name.to_string(),
            label,
            output,
        }
    }

    /// Serialize the tree for persistence, consuming the turn.
    pub fn finish(self) -> SerializedFs {
        let metrics = self.vfs.metrics();
        tracing::info!(
            steps = self.steps,
            files = metrics.file_count,
            directories = metrics.directory_count,
            bytes = metrics.total_size,
            "turn finished"
        );
        self.vfs.serialize()
    }
}
