// Basic tools: greeting, server introduction and credential check

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use super::ToolContext;
use crate::mcp::protocol::CallToolResult;
use crate::mcp::registry::Tool;

pub struct HelloTool;

#[async_trait]
impl Tool for HelloTool {
    fn name(&self) -> &'static str {
        "hello"
    }

    fn description(&self) -> &'static str {
        "Trả về lời chào đơn giản"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Tên người muốn được chào (tùy chọn)"
                }
            }
        })
    }

    async fn call(&self, arguments: Value) -> CallToolResult {
        match arguments.get("name").and_then(Value::as_str) {
            Some(name) if !name.trim().is_empty() => {
                CallToolResult::text(format!("Xin chào {}, từ TVU-MCP Server!", name.trim()))
            }
            _ => CallToolResult::text("Xin chào từ TVU-MCP Server!"),
        }
    }
}

pub struct IntroductionTool;

#[async_trait]
impl Tool for IntroductionTool {
    fn name(&self) -> &'static str {
        "introduction"
    }

    fn description(&self) -> &'static str {
        "Giới thiệu về TVU-MCP Server"
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _arguments: Value) -> CallToolResult {
        CallToolResult::text(
            "# TVU-MCP Server\n\n\
             TVU-MCP là một Model Context Protocol (MCP) server hỗ trợ tra cứu lịch học, \
             điểm, học phí và thông báo của sinh viên Trường Đại học Trà Vinh (TVU).\n\n\
             ## Các công cụ có sẵn\n\n\
             ### Công cụ cơ bản\n\
             - **hello**: Trả về lời chào đơn giản\n\
             - **introduction**: Giới thiệu về TVU-MCP Server\n\
             - **getCredentials**: Kiểm tra thông tin đăng nhập hiện tại\n\n\
             ### Công cụ tra cứu thông tin\n\
             - **getSchedule**: Xem thời khóa biểu theo học kỳ\n\
             - **getTodaySchedule**: Xem thời khóa biểu hôm nay\n\
             - **getTomorrowSchedule**: Xem thời khóa biểu ngày mai\n\
             - **getGrades**: Xem điểm học tập\n\
             - **getTuition**: Xem thông tin học phí\n\
             - **getCurriculum**: Xem chương trình đào tạo\n\
             - **getStudentInfo**: Xem thông tin sinh viên\n\
             - **getNotifications**: Xem thông báo\n\
             - **getGuides**: Xem hướng dẫn\n\
             - **getForms**: Xem biểu mẫu\n\
             - **getAllPosts**: Xem tất cả bài đăng\n\n\
             ## Cách sử dụng\n\
             Để sử dụng TVU-MCP, bạn cần cấu hình thông tin đăng nhập MSSV và mật khẩu \
             trong file .env",
        )
    }
}

pub struct GetCredentialsTool {
    ctx: Arc<ToolContext>,
}

impl GetCredentialsTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetCredentialsTool {
    fn name(&self) -> &'static str {
        "getCredentials"
    }

    fn description(&self) -> &'static str {
        "Kiểm tra thông tin đăng nhập hiện tại"
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _arguments: Value) -> CallToolResult {
        let config = &self.ctx.config;

        if !config.has_credentials() {
            return CallToolResult::text(
                "# Thông tin đăng nhập chưa được cấu hình\n\n\
                 Vui lòng cấu hình thông tin đăng nhập trong file .env:\n\n\
                 ```\n\
                 MSSV=mã_số_sinh_viên\n\
                 PASSWORD=mật_khẩu\n\
                 ```",
            );
        }

        // The password never leaves the process
        CallToolResult::text(format!(
            "# Thông tin đăng nhập hiện tại\n\n\
             - **MSSV**: {}\n\
             - **Mật khẩu**: *****\n\n\
             Nếu muốn thay đổi thông tin đăng nhập, vui lòng cập nhật file .env",
            config.student_id
        ))
    }
}
