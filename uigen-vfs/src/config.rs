use clap::Parser;

use crate::turn::{TurnConfig, DEFAULT_MAX_STEPS};
use crate::vfs::DEFAULT_MAX_HISTORY;

#[derive(Parser, Debug)]
#[command(name = "uigen-vfs", about = "In-memory project file system and agent editing tools over JSON-RPC stdio")]
pub struct CliArgs {
    /// Maximum tool calls applied in a single turn
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS, env = "UIGEN_VFS_MAX_STEPS")]
    pub max_steps: usize,

    /// Undo snapshots kept per file; older ones are dropped
    #[arg(long, default_value_t = DEFAULT_MAX_HISTORY, env = "UIGEN_VFS_MAX_HISTORY")]
    pub max_history: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "UIGEN_VFS_LOG_LEVEL")]
    pub log_level: String,
}

impl CliArgs {
    pub fn turn_config(&self) -> TurnConfig {
        TurnConfig {
            max_steps: self.max_steps,
            max_history: self.max_history,
        }
    }
}
