// Tool registry
//
// Tools are trait objects registered once at startup; tools/list reports
// them in registration order.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::protocol::{CallToolResult, ToolDescriptor};

/// One callable MCP tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Externally visible tool name, e.g. `getSchedule`
    fn name(&self) -> &'static str;

    /// Human-readable description shown to the protocol caller
    fn description(&self) -> &'static str;

    /// JSON Schema of the accepted arguments
    fn input_schema(&self) -> Value;

    /// Run the tool; failures come back as `isError` results, never panics
    async fn call(&self, arguments: Value) -> CallToolResult;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        tracing::debug!(tool = tool.name(), "Registering tool");
        self.tools.push(tool);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name() == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Metadata of all registered tools, in registration order
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|tool| ToolDescriptor {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.input_schema(),
            })
            .collect()
    }
}
