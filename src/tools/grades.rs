// Grade sheet tool

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{api_error_result, parse_payload, ToolContext};
use crate::mcp::protocol::CallToolResult;
use crate::mcp::registry::Tool;
use crate::models::grades::GradesData;
use crate::utils::format::{display_or_empty, display_value, has_content};

const FETCH_ERROR: &str = "Lỗi khi lấy điểm học tập";

fn render_grades(data: &GradesData) -> String {
    let mut out = String::from("# Bảng điểm học tập\n\n");

    let Some(newest) = data.ds_diem_hocky.first() else {
        out.push_str("Không có dữ liệu điểm học tập.");
        return out;
    };

    // Accumulated figures are repeated on every semester entry; the newest
    // one carries the current totals
    out.push_str("## Thông tin chung\n\n");
    out.push_str(&format!(
        "- Điểm trung bình tích lũy (hệ 10): **{}**\n",
        display_value(&newest.dtb_tich_luy_he_10)
    ));
    out.push_str(&format!(
        "- Điểm trung bình tích lũy (hệ 4): **{}**\n",
        display_value(&newest.dtb_tich_luy_he_4)
    ));
    out.push_str(&format!(
        "- Số tín chỉ tích lũy: **{}**\n\n",
        display_value(&newest.so_tin_chi_dat_tich_luy)
    ));

    for semester in &data.ds_diem_hocky {
        out.push_str(&format!("## {}\n\n", semester.ten_hoc_ky));

        if has_content(&semester.dtb_hk_he10) {
            out.push_str(&format!(
                "- Điểm trung bình học kỳ (hệ 10): **{}**\n",
                display_value(&semester.dtb_hk_he10)
            ));
            out.push_str(&format!(
                "- Điểm trung bình học kỳ (hệ 4): **{}**\n",
                display_value(&semester.dtb_hk_he4)
            ));
            out.push_str(&format!(
                "- Số tín chỉ đạt: **{}**\n",
                display_value(&semester.so_tin_chi_dat_hk)
            ));
            out.push_str(&format!(
                "- Xếp loại: **{}**\n\n",
                display_value(&semester.xep_loai_tkb_hk)
            ));
        }

        out.push_str(
            "| STT | Mã môn | Tên môn | Số TC | Điểm thi | Điểm TK | Điểm chữ | Kết quả |\n",
        );
        out.push_str(
            "|-----|--------|---------|-------|----------|---------|----------|---------|\n",
        );

        for (index, subject) in semester.ds_diem_mon_hoc.iter().enumerate() {
            let verdict = if subject.is_passed() {
                "✅ Đạt"
            } else {
                "❌ Không đạt"
            };
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                index + 1,
                subject.ma_mon,
                subject.ten_mon,
                display_value(&subject.so_tin_chi),
                display_or_empty(&subject.diem_thi),
                display_or_empty(&subject.diem_tk),
                display_or_empty(&subject.diem_tk_chu),
                verdict
            ));
        }
        out.push('\n');
    }

    out
}

pub struct GetGradesTool {
    ctx: Arc<ToolContext>,
}

impl GetGradesTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetGradesTool {
    fn name(&self) -> &'static str {
        "getGrades"
    }

    fn description(&self) -> &'static str {
        "Xem điểm học tập"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "showByRegSemester": {
                    "type": "boolean",
                    "description": "Hiển thị môn theo học kỳ đăng ký (mặc định: false)"
                }
            }
        })
    }

    async fn call(&self, arguments: Value) -> CallToolResult {
        if let Some(warning) = self.ctx.credentials_warning() {
            return warning;
        }

        let by_reg_semester = arguments
            .get("showByRegSemester")
            .and_then(Value::as_bool);

        let raw = match self.ctx.client.get_grades(by_reg_semester).await {
            Ok(raw) => raw,
            Err(e) => return api_error_result(FETCH_ERROR, &e),
        };
        let parsed: crate::models::grades::GradesResponse = match parse_payload(raw, FETCH_ERROR) {
            Ok(parsed) => parsed,
            Err(result) => return result,
        };

        CallToolResult::text(render_grades(&parsed.data))
    }
}
