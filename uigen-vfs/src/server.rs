use std::io::{self, BufRead, Write};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::VfsError;
use crate::protocol::*;
use crate::tools::definitions;
use crate::transport::NdjsonTransport;
use crate::turn::{Turn, TurnConfig};

enum Dispatch {
	Ok(Value),
	MethodNotFound,
	Failed(VfsError),
}

/// VFS JSON-RPC server: holds at most one live turn and applies requests
/// strictly in arrival order.
pub struct VfsServer<W: Write = io::Stdout> {
	transport: NdjsonTransport<W>,
	config: TurnConfig,
	turn: Option<Turn>,
}

impl<W: Write> VfsServer<W> {
	pub fn new(transport: NdjsonTransport<W>, config: TurnConfig) -> Self {
		Self {
			transport,
			config,
			turn: None,
		}
	}

	pub fn into_transport(self) -> NdjsonTransport<W> {
		self.transport
	}

	/// Main loop: read JSON-RPC messages from stdin, dispatch to handlers.
	pub fn run(&mut self) -> Result<(), VfsError> {
		let stdin = io::stdin();
		self.serve(stdin.lock())
	}

	pub fn serve(&mut self, reader: impl BufRead) -> Result<(), VfsError> {
		for line_result in reader.lines() {
			let line = line_result?;
			let trimmed = line.trim();
			if trimmed.is_empty() {
				continue;
			}

			let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
				Ok(r) => r,
				Err(e) => {
					tracing::warn!("Parse error: {}", e);
					self.transport
						.write_error(0, PARSE_ERROR, "Parse error: invalid JSON", None);
					continue;
				}
			};

			match self.dispatch(&request.method, request.params) {
				Dispatch::Ok(result) => self.transport.write_response(request.id, &result),
				Dispatch::MethodNotFound => self.transport.write_error(
					request.id,
					METHOD_NOT_FOUND,
					format!("Method not found: {}", request.method),
					None,
				),
				Dispatch::Failed(e) => {
					tracing::debug!(method = %request.method, code = e.code(), "request failed: {}", e);
					self.transport.write_vfs_error(request.id, &e);
				}
			}
		}

		if self.turn.take().is_some() {
			tracing::warn!("input closed with an unfinished turn; edits discarded");
		}
		Ok(())
	}

	fn dispatch(&mut self, method: &str, params: Value) -> Dispatch {
		let result = match method {
			"initialize" => self.handle_initialize(params),
			"turn/begin" => self.handle_turn_begin(params),
			"tool/call" => self.handle_tool_call(params),
			"turn/end" => self.handle_turn_end(),
			"turn/abort" => self.handle_turn_abort(),
			_ => return Dispatch::MethodNotFound,
		};
		match result {
			Ok(v) => Dispatch::Ok(v),
			Err(e) => Dispatch::Failed(e),
		}
	}

	// -- Handlers ---------------------------------------------------------

	fn handle_initialize(&mut self, params: Value) -> Result<Value, VfsError> {
		let p: InitializeParams = parse_params(params)?;
		if let Some(max_steps) = p.max_steps {
			self.config.max_steps = max_steps;
		}
		if let Some(max_history) = p.max_history {
			self.config.max_history = max_history;
		}
		tracing::info!(max_steps = self.config.max_steps, max_history = self.config.max_history, "initialized");

		Ok(serde_json::to_value(InitializeResult {
			name: env!("CARGO_PKG_NAME"),
			version: env!("CARGO_PKG_VERSION"),
			max_steps: self.config.max_steps,
			max_history: self.config.max_history,
			tools: definitions(),
		})?)
	}

	fn handle_turn_begin(&mut self, params: Value) -> Result<Value, VfsError> {
		let p: TurnBeginParams = parse_params(params)?;
		let turn = Turn::begin(p.files.as_ref(), self.config)?;
		let metrics = turn.vfs().metrics();
		if self.turn.replace(turn).is_some() {
			tracing::warn!("turn/begin replaced an unfinished turn; its edits were discarded");
		}
		Ok(serde_json::to_value(TurnBeginResult {
			files: metrics.file_count,
			directories: metrics.directory_count,
		})?)
	}

	fn handle_tool_call(&mut self, params: Value) -> Result<Value, VfsError> {
		let p: ToolCallParams = parse_params(params)?;
		let turn = self.turn.as_mut().ok_or(VfsError::NoActiveTurn)?;

		let label = crate::tools::status_message(&p.tool_name, &p.args);
		self.transport.write_notification(
			"tool/started",
			&ToolStartedNotification {
				tool_name: &p.tool_name,
				label: &label,
			},
		);

		let record = turn.call_tool(&p.tool_name, p.args);
		Ok(serde_json::to_value(ToolCallResult {
			content: record.output.content,
			is_error: record.output.is_error,
			step: record.step,
			label: record.label,
		})?)
	}

	fn handle_turn_end(&mut self) -> Result<Value, VfsError> {
		let turn = self.turn.take().ok_or(VfsError::NoActiveTurn)?;
		Ok(serde_json::to_value(TurnEndResult {
			files: turn.finish(),
		})?)
	}

	fn handle_turn_abort(&mut self) -> Result<Value, VfsError> {
		let discarded = self.turn.take().is_some();
		if discarded {
			tracing::info!("turn aborted; edits discarded");
		}
		Ok(serde_json::to_value(TurnAbortResult { discarded })?)
	}
}

fn parse_params<T: DeserializeOwned + Default>(params: Value) -> Result<T, VfsError> {
	if params.is_null() {
		return Ok(T::default());
	}
	serde_json::from_value(params).map_err(|e| VfsError::InvalidArguments(e.to_string()))
}
