// MCP server loop
//
// Newline-delimited JSON-RPC over stdio: requests arrive one per line on
// stdin, responses leave as single lines on stdout. stdout carries nothing
// but protocol frames; all logging goes to stderr.

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use super::protocol::{
    CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolsCapability, ToolsListResult,
    MCP_PROTOCOL_VERSION,
};
use super::registry::ToolRegistry;

pub struct McpServer {
    registry: ToolRegistry,
    server_name: String,
    server_version: String,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            server_name: env!("CARGO_PKG_NAME").to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serve until stdin reaches EOF
    pub async fn run(&self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read from stdin")?
        {
            let Some(reply) = self.handle_line(&line).await else {
                continue;
            };

            stdout
                .write_all(reply.as_bytes())
                .await
                .context("Failed to write to stdout")?;
            stdout
                .write_all(b"\n")
                .await
                .context("Failed to write to stdout")?;
            stdout.flush().await.context("Failed to flush stdout")?;
        }

        Ok(())
    }

    /// Handle one raw input line; None means nothing should be written back
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unparseable request line");
                let response =
                    JsonRpcResponse::error(RequestId::Null, JsonRpcError::parse_error());
                return Some(serde_json::to_string(&response).unwrap_or_default());
            }
        };

        let response = self.handle_request(request).await?;
        Some(serde_json::to_string(&response).unwrap_or_default())
    }

    /// Dispatch one request; notifications yield no response
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }

        // Checked by is_notification above
        let id = request.id.clone()?;

        tracing::debug!(method = %request.method, "Handling request");

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "ping" => JsonRpcResponse::success(id, Value::Object(Default::default())),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            _ => {
                tracing::warn!(method = %request.method, "Unknown method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found())
            }
        };

        Some(response)
    }

    fn handle_initialize(&self, id: RequestId) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: MCP_PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
            },
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap_or(Value::Null))
    }

    fn handle_tools_list(&self, id: RequestId) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: self.registry.descriptors(),
        };

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap_or(Value::Null))
    }

    async fn handle_tools_call(&self, id: RequestId, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        JsonRpcError::invalid_params(format!("Invalid tool call params: {}", e)),
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing tool call params"),
                );
            }
        };

        let Some(tool) = self.registry.get(&params.name) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown tool '{}'", params.name)),
            );
        };

        let result: CallToolResult = tool.call(params.arguments).await;
        if result.is_error() {
            tracing::warn!(tool = %params.name, "Tool call answered with an error result");
        }

        JsonRpcResponse::success(id, serde_json::to_value(result).unwrap_or(Value::Null))
    }
}
