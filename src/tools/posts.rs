// Portal post tools: notifications, guides, forms and the combined view
//
// The portal groups posts by category marker: "tb" notifications,
// "hd" guides, "bm" forms.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{api_error_result, parse_payload, ToolContext};
use crate::mcp::protocol::CallToolResult;
use crate::mcp::registry::Tool;
use crate::models::posts::{Post, PostsData, PostsResponse};
use crate::utils::format::{format_date_dmy, parse_portal_date};

const DEFAULT_CATEGORY_LIMIT: i64 = 10;
const DEFAULT_ALL_POSTS_LIMIT: i64 = 5;

fn post_date(raw: &str) -> String {
    parse_portal_date(raw)
        .map(format_date_dmy)
        .unwrap_or_else(|| raw.to_string())
}

fn push_post_table(out: &mut String, posts: &[&Post]) {
    out.push_str("| STT | Tiêu đề | Ngày đăng |\n");
    out.push_str("|-----|---------|----------|\n");

    for (index, post) in posts.iter().enumerate() {
        out.push_str(&format!(
            "| {} | [{}]({}) | {} |\n",
            index + 1,
            post.tieu_de,
            post.url_bai_viet,
            post_date(&post.ngay_dang_tin)
        ));
    }
}

/// Render one category as a standalone page
fn render_category(data: &PostsData, marker: &str, title: &str, empty_message: &str) -> String {
    let mut out = format!("# {}\n\n", title);

    match data.category(marker) {
        Some(category) if !category.ds_baiviet.is_empty() => {
            let posts: Vec<&Post> = category.ds_baiviet.iter().collect();
            push_post_table(&mut out, &posts);
        }
        _ => {
            out.push_str(empty_message);
            out.push('\n');
        }
    }

    out
}

/// Render one category as a section of the combined view, truncated to
/// `limit` entries with an overflow note pointing at the dedicated tool
fn push_category_section(
    out: &mut String,
    data: &PostsData,
    marker: &str,
    heading: &str,
    empty_message: &str,
    limit: usize,
    follow_up_tool: &str,
) {
    out.push_str(&format!("## {}\n\n", heading));

    match data.category(marker) {
        Some(category) if !category.ds_baiviet.is_empty() => {
            let posts: Vec<&Post> = category.ds_baiviet.iter().take(limit).collect();
            push_post_table(out, &posts);

            let total = category.ds_baiviet.len();
            if total > limit {
                out.push_str(&format!(
                    "\n*Còn {} {} khác. Sử dụng lệnh `{}` để xem thêm.*\n",
                    total - limit,
                    heading.to_lowercase(),
                    follow_up_tool
                ));
            }
        }
        _ => {
            out.push_str(empty_message);
            out.push('\n');
        }
    }
}

/// Shared fetch-and-render path of the three single-category tools
async fn category_posts(
    ctx: &ToolContext,
    arguments: &Value,
    marker: &str,
    title: &str,
    empty_message: &str,
    error_prefix: &str,
) -> CallToolResult {
    if let Some(warning) = ctx.credentials_warning() {
        return warning;
    }

    let limit = arguments
        .get("limit")
        .and_then(Value::as_i64)
        .unwrap_or(DEFAULT_CATEGORY_LIMIT);

    let raw = match ctx.client.get_posts(marker, Some(limit)).await {
        Ok(raw) => raw,
        Err(e) => return api_error_result(error_prefix, &e),
    };
    let parsed: PostsResponse = match parse_payload(raw, error_prefix) {
        Ok(parsed) => parsed,
        Err(result) => return result,
    };

    if parsed.data.ds_bai_viet.is_empty() {
        return CallToolResult::text(format!("❌ {}", empty_message));
    }

    CallToolResult::text(render_category(&parsed.data, marker, title, empty_message))
}

fn limit_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "limit": {
                "type": "number",
                "description": description
            }
        }
    })
}

pub struct GetNotificationsTool {
    ctx: Arc<ToolContext>,
}

impl GetNotificationsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetNotificationsTool {
    fn name(&self) -> &'static str {
        "getNotifications"
    }

    fn description(&self) -> &'static str {
        "Xem thông báo"
    }

    fn input_schema(&self) -> Value {
        limit_schema("Số lượng thông báo tối đa muốn xem (mặc định: 10)")
    }

    async fn call(&self, arguments: Value) -> CallToolResult {
        category_posts(
            &self.ctx,
            &arguments,
            "tb",
            "Thông báo",
            "Không có thông báo nào.",
            "Lỗi khi lấy danh sách thông báo",
        )
        .await
    }
}

pub struct GetGuidesTool {
    ctx: Arc<ToolContext>,
}

impl GetGuidesTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetGuidesTool {
    fn name(&self) -> &'static str {
        "getGuides"
    }

    fn description(&self) -> &'static str {
        "Xem hướng dẫn"
    }

    fn input_schema(&self) -> Value {
        limit_schema("Số lượng hướng dẫn tối đa muốn xem (mặc định: 10)")
    }

    async fn call(&self, arguments: Value) -> CallToolResult {
        category_posts(
            &self.ctx,
            &arguments,
            "hd",
            "Hướng dẫn",
            "Không có hướng dẫn nào.",
            "Lỗi khi lấy danh sách hướng dẫn",
        )
        .await
    }
}

pub struct GetFormsTool {
    ctx: Arc<ToolContext>,
}

impl GetFormsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetFormsTool {
    fn name(&self) -> &'static str {
        "getForms"
    }

    fn description(&self) -> &'static str {
        "Xem biểu mẫu"
    }

    fn input_schema(&self) -> Value {
        limit_schema("Số lượng biểu mẫu tối đa muốn xem (mặc định: 10)")
    }

    async fn call(&self, arguments: Value) -> CallToolResult {
        category_posts(
            &self.ctx,
            &arguments,
            "bm",
            "Biểu mẫu",
            "Không có biểu mẫu nào.",
            "Lỗi khi lấy danh sách biểu mẫu",
        )
        .await
    }
}

pub struct GetAllPostsTool {
    ctx: Arc<ToolContext>,
}

impl GetAllPostsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetAllPostsTool {
    fn name(&self) -> &'static str {
        "getAllPosts"
    }

    fn description(&self) -> &'static str {
        "Xem tất cả bài đăng"
    }

    fn input_schema(&self) -> Value {
        limit_schema("Số lượng bài đăng tối đa muốn xem cho mỗi loại (mặc định: 5)")
    }

    async fn call(&self, arguments: Value) -> CallToolResult {
        if let Some(warning) = self.ctx.credentials_warning() {
            return warning;
        }

        let per_category = arguments
            .get("limit")
            .and_then(Value::as_i64)
            .unwrap_or(DEFAULT_ALL_POSTS_LIMIT);

        // Fetch across all three categories at once
        let raw = match self
            .ctx
            .client
            .get_posts("", Some(per_category * 3))
            .await
        {
            Ok(raw) => raw,
            Err(e) => return api_error_result("Lỗi khi lấy danh sách bài đăng", &e),
        };
        let parsed: PostsResponse = match parse_payload(raw, "Lỗi khi lấy danh sách bài đăng") {
            Ok(parsed) => parsed,
            Err(result) => return result,
        };

        if parsed.data.ds_bai_viet.is_empty() {
            return CallToolResult::text("❌ Không có bài đăng nào.");
        }

        let limit = per_category.max(0) as usize;
        let mut out = String::from("# Bài đăng\n\n");
        push_category_section(
            &mut out,
            &parsed.data,
            "tb",
            "Thông báo",
            "Không có thông báo nào.",
            limit,
            "getNotifications",
        );
        out.push('\n');
        push_category_section(
            &mut out,
            &parsed.data,
            "hd",
            "Hướng dẫn",
            "Không có hướng dẫn nào.",
            limit,
            "getGuides",
        );
        out.push('\n');
        push_category_section(
            &mut out,
            &parsed.data,
            "bm",
            "Biểu mẫu",
            "Không có biểu mẫu nào.",
            limit,
            "getForms",
        );

        CallToolResult::text(out)
    }
}
