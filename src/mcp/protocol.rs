// JSON-RPC 2.0 message types for the Model Context Protocol
//
// Only the tool-serving subset of MCP is spoken here: initialize,
// tools/list and tools/call over newline-delimited JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Request id; the protocol allows numbers, strings and null
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RequestId {
    Number(i64),
    String(String),
    Null,
}

/// Incoming JSON-RPC request
///
/// An absent or null id marks a notification, which is handled but never
/// answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: impl Into<RequestId>, method: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id.into()),
            method: method.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    pub fn is_notification(&self) -> bool {
        matches!(self.id, None | Some(RequestId::Null))
    }
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

/// Outgoing JSON-RPC response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: RequestId, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn parse_error() -> Self {
        Self::new(-32700, "Parse error")
    }

    pub fn invalid_request() -> Self {
        Self::new(-32600, "Invalid request")
    }

    pub fn method_not_found() -> Self {
        Self::new(-32601, "Method not found")
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(-32602, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(-32603, message)
    }
}

/// Result of the initialize handshake
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    #[serde(default)]
    pub list_changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Tool metadata advertised through tools/list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsListResult {
    pub tools: Vec<ToolDescriptor>,
}

/// Parameters of a tools/call request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Result of one tool invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<ContentBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: None,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::text(text)],
            is_error: Some(true),
        }
    }

    /// Concatenated text of all blocks, mainly for assertions and logging
    pub fn joined_text(&self) -> String {
        self.content
            .iter()
            .map(|block| match block {
                ContentBlock::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn is_error(&self) -> bool {
        self.is_error == Some(true)
    }
}

/// Content block in tool results; this server only produces text
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_roundtrip() {
        let req = JsonRpcRequest::new(1, "tools/list");
        let raw = serde_json::to_string(&req).unwrap();
        assert!(raw.contains("\"jsonrpc\":\"2.0\""));
        assert!(raw.contains("\"method\":\"tools/list\""));

        let parsed: JsonRpcRequest = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.id, Some(RequestId::Number(1)));
        assert!(!parsed.is_notification());
    }

    #[test]
    fn test_notification_detection() {
        let raw = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        let parsed: JsonRpcRequest = serde_json::from_str(raw).unwrap();
        assert!(parsed.is_notification());

        let raw = r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#;
        let parsed: JsonRpcRequest = serde_json::from_str(raw).unwrap();
        assert!(parsed.is_notification());
    }

    #[test]
    fn test_response_success_and_error() {
        let ok = JsonRpcResponse::success(RequestId::Number(1), json!({"tools": []}));
        assert!(ok.result.is_some());
        assert!(ok.error.is_none());

        let err = JsonRpcResponse::error(RequestId::Number(2), JsonRpcError::method_not_found());
        assert!(err.result.is_none());
        assert_eq!(err.error.unwrap().code, -32601);
    }

    #[test]
    fn test_tool_descriptor_wire_names() {
        let descriptor = ToolDescriptor {
            name: "getSchedule".to_string(),
            description: "Xem thời khóa biểu theo học kỳ".to_string(),
            input_schema: json!({"type": "object"}),
        };
        let raw = serde_json::to_value(&descriptor).unwrap();
        assert!(raw.get("inputSchema").is_some());
        assert!(raw.get("input_schema").is_none());
    }

    #[test]
    fn test_call_tool_result_serialization() {
        let ok = CallToolResult::text("Xin chào");
        let raw = serde_json::to_value(&ok).unwrap();
        assert_eq!(raw["content"][0]["type"], "text");
        assert_eq!(raw["content"][0]["text"], "Xin chào");
        assert!(raw.get("isError").is_none());

        let err = CallToolResult::error("❌ hỏng");
        let raw = serde_json::to_value(&err).unwrap();
        assert_eq!(raw["isError"], true);
        assert!(err.is_error());
    }

    #[test]
    fn test_call_params_default_arguments() {
        let raw = r#"{"name":"hello"}"#;
        let params: ToolCallParams = serde_json::from_str(raw).unwrap();
        assert_eq!(params.name, "hello");
        assert!(params.arguments.is_null());
    }
}
