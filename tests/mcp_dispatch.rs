// Integration tests for the MCP dispatch path
//
// These tests drive the server exactly as a protocol client would: one
// JSON-RPC request per line, one response per line.

use serde_json::{json, Value};
use std::sync::Arc;

use tvu_mcp::api::TvuClient;
use tvu_mcp::config::Config;
use tvu_mcp::mcp::{McpServer, ToolRegistry};
use tvu_mcp::tools::{self, ToolContext};

// ==================================================================================================
// Test Helpers
// ==================================================================================================

/// Server whose portal is unreachable; nothing may depend on the network
fn offline_server(student_id: &str, password: &str) -> McpServer {
    let config = Config {
        student_id: student_id.to_string(),
        password: password.to_string(),
        // Discard port; any connection attempt fails immediately
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 1,
        token_lifetime_secs: 7200,
        current_semester: "20242".to_string(),
        log_level: "info".to_string(),
    };
    let client = TvuClient::new(&config).unwrap();
    let ctx = Arc::new(ToolContext { config, client });

    let mut registry = ToolRegistry::new();
    tools::register_all(&mut registry, ctx);
    McpServer::new(registry)
}

async fn roundtrip(server: &McpServer, request: Value) -> Value {
    let reply = server
        .handle_line(&request.to_string())
        .await
        .expect("expected a response");
    serde_json::from_str(&reply).unwrap()
}

fn call_tool(name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
}

// ==================================================================================================
// Handshake & Discovery
// ==================================================================================================

#[tokio::test]
async fn test_initialize_reports_server_and_capabilities() {
    let server = offline_server("110121001", "secret");
    let response = roundtrip(
        &server,
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "0.1.0"}
            }
        }),
    )
    .await;

    let result = &response["result"];
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "tvu-mcp");
    assert!(result["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_tools_list_advertises_every_tool() {
    let server = offline_server("110121001", "secret");
    let response = roundtrip(
        &server,
        json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
    )
    .await;

    let tools = response["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools
        .iter()
        .map(|tool| tool["name"].as_str().unwrap())
        .collect();

    for expected in [
        "hello",
        "introduction",
        "getCredentials",
        "getGrades",
        "getTuition",
        "getCurriculum",
        "getStudentInfo",
        "getNotifications",
        "getGuides",
        "getForms",
        "getAllPosts",
        "getSchedule",
        "getTodaySchedule",
        "getTomorrowSchedule",
    ] {
        assert!(names.contains(&expected), "missing tool {}", expected);
    }

    // Every tool carries a schema
    for tool in tools {
        assert!(tool["inputSchema"]["type"].is_string());
    }
}

// ==================================================================================================
// Tool Calls
// ==================================================================================================

#[tokio::test]
async fn test_hello_tool_call() {
    let server = offline_server("110121001", "secret");
    let response = roundtrip(&server, call_tool("hello", json!({}))).await;

    let result = &response["result"];
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], "Xin chào từ TVU-MCP Server!");
    assert!(result.get("isError").is_none());
}

#[tokio::test]
async fn test_missing_credentials_short_circuit() {
    // No credentials and an unreachable portal: the warning must come back
    // without any connection attempt (a network try would error instead)
    let server = offline_server("", "");
    let response = roundtrip(&server, call_tool("getSchedule", json!({}))).await;

    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("⚠️ Chưa cấu hình thông tin đăng nhập"));
    assert!(response["result"].get("isError").is_none());
}

#[tokio::test]
async fn test_api_failure_becomes_is_error_result() {
    // Credentials are set but the portal is unreachable; the login failure
    // must surface as an isError tool result, not a protocol error
    let server = offline_server("110121001", "secret");
    let response = roundtrip(&server, call_tool("getTuition", json!({}))).await;

    assert!(response.get("error").is_none());
    let result = &response["result"];
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("❌ Lỗi khi lấy thông tin học phí"));
}

#[tokio::test]
async fn test_unknown_tool_is_invalid_params() {
    let server = offline_server("110121001", "secret");
    let response = roundtrip(&server, call_tool("doesNotExist", json!({}))).await;
    assert_eq!(response["error"]["code"], -32602);
}

// ==================================================================================================
// Protocol Edge Cases
// ==================================================================================================

#[tokio::test]
async fn test_unknown_method() {
    let server = offline_server("110121001", "secret");
    let response = roundtrip(
        &server,
        json!({"jsonrpc": "2.0", "id": 7, "method": "resources/list"}),
    )
    .await;
    assert_eq!(response["error"]["code"], -32601);
}

#[tokio::test]
async fn test_notification_gets_no_reply() {
    let server = offline_server("110121001", "secret");
    let reply = server
        .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;
    assert!(reply.is_none());
}

#[tokio::test]
async fn test_malformed_line_yields_parse_error() {
    let server = offline_server("110121001", "secret");
    let reply = server.handle_line("{not json").await.unwrap();
    let response: Value = serde_json::from_str(&reply).unwrap();
    assert_eq!(response["error"]["code"], -32700);
    assert!(response["id"].is_null());
}
