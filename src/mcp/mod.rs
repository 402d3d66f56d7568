// Model Context Protocol surface
// JSON-RPC 2.0 types, the stdio server loop, and the tool registry

pub mod protocol;
pub mod registry;
pub mod server;

pub use protocol::{CallToolResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId};
pub use registry::{Tool, ToolRegistry};
pub use server::McpServer;
