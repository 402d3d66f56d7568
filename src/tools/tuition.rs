// Tuition summary tool

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{api_error_result, parse_payload, ToolContext};
use crate::mcp::protocol::CallToolResult;
use crate::mcp::registry::Tool;
use crate::models::tuition::TuitionData;
use crate::utils::format::{format_vn_number, parse_amount};

const FETCH_ERROR: &str = "Lỗi khi lấy thông tin học phí";

fn render_tuition(data: &TuitionData) -> String {
    let mut out = String::from("# Thông tin học phí\n\n");

    if data.ds_hoc_phi_hoc_ky.is_empty() {
        out.push_str("Không có dữ liệu học phí.");
        return out;
    }

    out.push_str("| Học kỳ | Học phí | Miễn giảm | Phải thu | Đã thu | Còn nợ |\n");
    out.push_str("|--------|---------|-----------|----------|--------|--------|\n");

    let mut total_tuition = 0i64;
    let mut total_paid = 0i64;
    let mut total_debt = 0i64;

    for semester in &data.ds_hoc_phi_hoc_ky {
        let tuition = parse_amount(&semester.hoc_phi);
        let exemption = parse_amount(&semester.mien_giam);
        let payable = parse_amount(&semester.phai_thu);
        let paid = parse_amount(&semester.da_thu);
        let debt = parse_amount(&semester.con_no);

        total_tuition += tuition;
        total_paid += paid;
        total_debt += debt;

        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            semester.ten_hoc_ky,
            format_vn_number(tuition),
            format_vn_number(exemption),
            format_vn_number(payable),
            format_vn_number(paid),
            format_vn_number(debt)
        ));
    }

    out.push_str(&format!(
        "| **Tổng cộng** | **{}** | | | **{}** | **{}** |\n\n",
        format_vn_number(total_tuition),
        format_vn_number(total_paid),
        format_vn_number(total_debt)
    ));

    out.push_str("## Chi tiết học phí\n\n");

    for semester in &data.ds_hoc_phi_hoc_ky {
        out.push_str(&format!("### {}\n\n", semester.ten_hoc_ky));
        out.push_str(&format!(
            "- Học phí: **{} VNĐ**\n",
            format_vn_number(parse_amount(&semester.hoc_phi))
        ));

        let exemption = parse_amount(&semester.mien_giam);
        if exemption > 0 {
            out.push_str(&format!("- Miễn giảm: **{} VNĐ**\n", format_vn_number(exemption)));
        }

        let support = parse_amount(&semester.duoc_ho_tro);
        if support > 0 {
            out.push_str(&format!("- Được hỗ trợ: **{} VNĐ**\n", format_vn_number(support)));
        }

        out.push_str(&format!(
            "- Phải thu: **{} VNĐ**\n",
            format_vn_number(parse_amount(&semester.phai_thu))
        ));
        out.push_str(&format!(
            "- Đã thu: **{} VNĐ**\n",
            format_vn_number(parse_amount(&semester.da_thu))
        ));

        let debt = parse_amount(&semester.con_no);
        if debt > 0 {
            out.push_str(&format!("- Còn nợ: **{} VNĐ**\n", format_vn_number(debt)));
        }

        out.push_str(&format!(
            "- Đơn giá: **{} VNĐ/tín chỉ**\n\n",
            format_vn_number(parse_amount(&semester.don_gia))
        ));
    }

    out
}

pub struct GetTuitionTool {
    ctx: Arc<ToolContext>,
}

impl GetTuitionTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetTuitionTool {
    fn name(&self) -> &'static str {
        "getTuition"
    }

    fn description(&self) -> &'static str {
        "Xem thông tin học phí"
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _arguments: Value) -> CallToolResult {
        if let Some(warning) = self.ctx.credentials_warning() {
            return warning;
        }

        let raw = match self.ctx.client.get_tuition().await {
            Ok(raw) => raw,
            Err(e) => return api_error_result(FETCH_ERROR, &e),
        };
        let parsed: crate::models::tuition::TuitionResponse = match parse_payload(raw, FETCH_ERROR)
        {
            Ok(parsed) => parsed,
            Err(result) => return result,
        };

        CallToolResult::text(render_tuition(&parsed.data))
    }
}
