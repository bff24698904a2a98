use std::io::{self, Write};

use serde::Serialize;

use crate::error::VfsError;
use crate::protocol::{INTERNAL_ERROR, INVALID_PARAMS, VFS_ERROR};

#[derive(Serialize)]
struct JsonRpcResponse<'a, T: Serialize> {
    jsonrpc: &'a str,
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcErrorBody>,
}

#[derive(Serialize)]
struct JsonRpcErrorBody {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct JsonRpcNotification<'a, T: Serialize> {
    jsonrpc: &'a str,
    method: &'a str,
    params: &'a T,
}

/// Writes one JSON-RPC frame per line. The binary points this at stdout and
/// sends logs to stderr so the two never interleave.
pub struct NdjsonTransport<W: Write = io::Stdout> {
    writer: W,
}

impl Default for NdjsonTransport<io::Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl NdjsonTransport<io::Stdout> {
    pub fn stdout() -> Self {
        Self {
            writer: io::stdout(),
        }
    }
}

impl<W: Write> NdjsonTransport<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    pub fn write_response(&mut self, id: u64, result: &impl Serialize) {
        self.write_line(&JsonRpcResponse {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        });
    }

    pub fn write_error(
        &mut self,
        id: u64,
        code: i32,
        message: impl Into<String>,
        data: Option<serde_json::Value>,
    ) {
        self.write_line(&JsonRpcResponse::<()> {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(JsonRpcErrorBody {
                code,
                message: message.into(),
                data,
            }),
        });
    }

    /// Bad params map to `-32602` and host I/O failures to `-32603`;
    /// everything else is an engine error.
    pub fn write_vfs_error(&mut self, id: u64, err: &VfsError) {
        let code = match err {
            VfsError::InvalidArguments(_) | VfsError::Json(_) => INVALID_PARAMS,
            VfsError::Io(_) => INTERNAL_ERROR,
            _ => VFS_ERROR,
        };
        self.write_error(id, code, err.to_string(), Some(err.to_json_rpc_error()));
    }

    pub fn write_notification(&mut self, method: &str, params: &impl Serialize) {
        self.write_line(&JsonRpcNotification {
            jsonrpc: "2.0",
            method,
            params,
        });
    }

    fn write_line(&mut self, value: &impl Serialize) {
        if let Err(e) = serde_json::to_writer(&mut self.writer, value) {
            tracing::error!("Failed to serialize: {}", e);
            return;
        }
        let _ = writeln!(self.writer);
        let _ = self.writer.flush();
    }
}
