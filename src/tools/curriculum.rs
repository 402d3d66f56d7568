// Study program tool

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{api_error_result, parse_payload, ToolContext};
use crate::mcp::protocol::CallToolResult;
use crate::mcp::registry::Tool;
use crate::models::curriculum::CurriculumData;
use crate::utils::format::{display_or_zero, display_value};

const FETCH_ERROR: &str = "Lỗi khi lấy thông tin chương trình đào tạo";

fn marker(flag: &str) -> &'static str {
    if flag == "x" {
        "✅"
    } else {
        ""
    }
}

fn render_curriculum(data: &CurriculumData, semester: Option<&str>) -> String {
    let mut out = String::from("# Chương trình đào tạo\n\n");

    if data.ds_ctdt_hocky.is_empty() {
        out.push_str("Không có dữ liệu chương trình đào tạo.");
        return out;
    }

    if !data.ds_nganh_sinh_vien.is_empty() {
        out.push_str("## Thông tin ngành học\n\n");
        for major in &data.ds_nganh_sinh_vien {
            out.push_str(&format!(
                "- Ngành: **{}** ({})\n",
                major.ten_nganh, major.ma_nganh
            ));
        }
        out.push('\n');
    }

    let semesters = data
        .ds_ctdt_hocky
        .iter()
        .filter(|entry| semester.map_or(true, |wanted| entry.hoc_ky == wanted));

    for entry in semesters {
        out.push_str(&format!("## {}\n\n", entry.ten_hoc_ky));

        if entry.ds_ctdt_mon_hoc.is_empty() {
            out.push_str("Không có môn học trong học kỳ này.\n\n");
            continue;
        }

        out.push_str(
            "| STT | Mã môn | Tên môn | Số TC | Bắt buộc | Đã học | Đã đạt | Lý thuyết | Thực hành | Tổng tiết |\n",
        );
        out.push_str(
            "|-----|--------|---------|-------|----------|--------|--------|-----------|-----------|------------|\n",
        );

        for (index, subject) in entry.ds_ctdt_mon_hoc.iter().enumerate() {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                index + 1,
                subject.ma_mon,
                subject.ten_mon,
                display_value(&subject.so_tin_chi),
                marker(&subject.mon_bat_buoc),
                marker(&subject.mon_da_hoc),
                marker(&subject.mon_da_dat),
                display_or_zero(&subject.ly_thuyet),
                display_or_zero(&subject.thuc_hanh),
                display_or_zero(&subject.tong_tiet)
            ));
        }
        out.push('\n');
    }

    out
}

pub struct GetCurriculumTool {
    ctx: Arc<ToolContext>,
}

impl GetCurriculumTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetCurriculumTool {
    fn name(&self) -> &'static str {
        "getCurriculum"
    }

    fn description(&self) -> &'static str {
        "Xem chương trình đào tạo"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "programType": {
                    "type": "number",
                    "description": "Loại chương trình đào tạo (mặc định: 2)"
                },
                "semester": {
                    "type": "string",
                    "description": "Mã học kỳ cụ thể muốn xem (ví dụ: 20242)"
                }
            }
        })
    }

    async fn call(&self, arguments: Value) -> CallToolResult {
        if let Some(warning) = self.ctx.credentials_warning() {
            return warning;
        }

        let program_type = arguments.get("programType").and_then(Value::as_i64);
        let semester = arguments.get("semester").and_then(Value::as_str);

        let raw = match self.ctx.client.get_curriculum(program_type).await {
            Ok(raw) => raw,
            Err(e) => return api_error_result(FETCH_ERROR, &e),
        };
        let parsed: crate::models::curriculum::CurriculumResponse =
            match parse_payload(raw, FETCH_ERROR) {
                Ok(parsed) => parsed,
                Err(result) => return result,
            };

        CallToolResult::text(render_curriculum(&parsed.data, semester))
    }
}
