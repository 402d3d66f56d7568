// MCP tools over the portal client
//
// Every data tool follows the same shape: check that credentials are
// configured (warn without touching the network otherwise), fetch through
// the client, render Vietnamese Markdown, and map API failures to isError
// results. User-facing text is Vietnamese; code and logs stay English.

pub mod basic;
pub mod curriculum;
pub mod grades;
pub mod posts;
pub mod schedule;
pub mod student_info;
pub mod tuition;

use std::sync::Arc;

use crate::api::TvuClient;
use crate::config::Config;
use crate::error::ApiError;
use crate::mcp::protocol::CallToolResult;
use crate::mcp::registry::ToolRegistry;

/// Shared state handed to every tool
pub struct ToolContext {
    pub config: Config,
    pub client: TvuClient,
}

impl ToolContext {
    /// Credentials-missing warning, returned before any network call
    pub fn credentials_warning(&self) -> Option<CallToolResult> {
        if self.config.has_credentials() {
            return None;
        }

        tracing::warn!("Tool called without configured credentials");
        Some(CallToolResult::text(
            "⚠️ Chưa cấu hình thông tin đăng nhập. \
             Vui lòng cập nhật file .env với MSSV và PASSWORD.",
        ))
    }
}

/// Map an API failure to an isError result, keeping the tool's Vietnamese
/// prefix in front of the underlying error text
pub fn api_error_result(prefix: &str, error: &ApiError) -> CallToolResult {
    tracing::error!(error = %error, context = prefix, "Portal tool call failed");
    CallToolResult::error(format!("❌ {}: {}", prefix, error))
}

/// Decode a raw portal payload into its model, or an isError result
pub fn parse_payload<T: serde::de::DeserializeOwned>(
    raw: serde_json::Value,
    prefix: &str,
) -> Result<T, CallToolResult> {
    serde_json::from_value(raw).map_err(|e| {
        tracing::error!(error = %e, context = prefix, "Failed to decode portal payload");
        CallToolResult::error(format!("❌ {}: {}", prefix, e))
    })
}

/// Register every tool the server advertises, in listing order
pub fn register_all(registry: &mut ToolRegistry, ctx: Arc<ToolContext>) {
    registry.register(Arc::new(basic::HelloTool));
    registry.register(Arc::new(basic::IntroductionTool));
    registry.register(Arc::new(basic::GetCredentialsTool::new(ctx.clone())));

    registry.register(Arc::new(grades::GetGradesTool::new(ctx.clone())));
    registry.register(Arc::new(tuition::GetTuitionTool::new(ctx.clone())));
    registry.register(Arc::new(curriculum::GetCurriculumTool::new(ctx.clone())));
    registry.register(Arc::new(student_info::GetStudentInfoTool::new(ctx.clone())));

    registry.register(Arc::new(posts::GetNotificationsTool::new(ctx.clone())));
    registry.register(Arc::new(posts::GetGuidesTool::new(ctx.clone())));
    registry.register(Arc::new(posts::GetFormsTool::new(ctx.clone())));
    registry.register(Arc::new(posts::GetAllPostsTool::new(ctx.clone())));

    registry.register(Arc::new(schedule::GetScheduleTool::new(ctx.clone())));
    registry.register(Arc::new(schedule::GetTodayScheduleTool::new(ctx.clone())));
    registry.register(Arc::new(schedule::GetTomorrowScheduleTool::new(ctx)));
}
