// Student profile tool

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{api_error_result, parse_payload, ToolContext};
use crate::mcp::protocol::CallToolResult;
use crate::mcp::registry::Tool;
use crate::models::student::StudentInfo;

const FETCH_ERROR: &str = "Lỗi khi lấy thông tin sinh viên";

fn render_student_info(info: &StudentInfo) -> String {
    let mut out = String::from("# Thông tin sinh viên\n\n");

    out.push_str("## Thông tin cá nhân\n\n");
    out.push_str(&format!("- **Họ và tên:** {}\n", info.ten_day_du));
    out.push_str(&format!("- **Mã sinh viên:** {}\n", info.ma_sv));
    out.push_str(&format!("- **Giới tính:** {}\n", info.gioi_tinh));
    out.push_str(&format!("- **Ngày sinh:** {}\n", info.ngay_sinh));
    out.push_str(&format!("- **Nơi sinh:** {}\n", info.noi_sinh));
    out.push_str(&format!("- **Dân tộc:** {}\n", info.dan_toc));
    out.push_str(&format!("- **Tôn giáo:** {}\n", info.ton_giao));
    out.push_str(&format!("- **Quốc tịch:** {}\n", info.quoc_tich));
    out.push_str(&format!("- **Số CMND/CCCD:** {}\n", info.so_cmnd));
    out.push_str(&format!("- **Email:** {}\n", info.email));
    if !info.email2.is_empty() {
        out.push_str(&format!("- **Email phụ:** {}\n", info.email2));
    }
    out.push('\n');

    out.push_str("## Thông tin hộ khẩu\n\n");
    out.push_str(&format!("- **Địa chỉ:** {}\n", info.ho_khau_thuong_tru_gd));
    out.push_str(&format!("- **Quận/Huyện:** {}\n", info.ho_khau_quan_huyen));
    out.push_str(&format!(
        "- **Tỉnh/Thành phố:** {}\n\n",
        info.ho_khau_tinh_thanh
    ));

    out.push_str("## Thông tin học tập\n\n");
    out.push_str(&format!("- **Lớp:** {}\n", info.lop));
    out.push_str(&format!("- **Khối:** {}\n", info.khoi));
    out.push_str(&format!("- **Ngành:** {}\n", info.nganh));
    if !info.chuyen_nganh.is_empty() {
        out.push_str(&format!("- **Chuyên ngành:** {}\n", info.chuyen_nganh));
    }
    out.push_str(&format!("- **Khoa:** {}\n", info.khoa));
    out.push_str(&format!("- **Bậc đào tạo:** {}\n", info.bac_he_dao_tao));
    out.push_str(&format!("- **Niên khóa:** {}\n", info.nien_khoa));
    out.push_str(&format!("- **Thời gian vào:** {}\n", info.str_nhhk_vao));
    out.push_str(&format!(
        "- **Thời gian ra (dự kiến):** {}\n",
        info.str_nhhk_ra
    ));
    out.push_str(&format!("- **Trạng thái:** {}\n\n", info.hien_dien_sv));

    if !info.ho_ten_cvht.is_empty() {
        out.push_str("## Thông tin cố vấn học tập\n\n");
        out.push_str(&format!("- **Mã CVHT:** {}\n", info.ma_cvht));
        out.push_str(&format!("- **Họ tên CVHT:** {}\n", info.ho_ten_cvht));
        if !info.email_cvht.is_empty() {
            out.push_str(&format!("- **Email CVHT:** {}\n", info.email_cvht));
        }
        if !info.dien_thoai_cvht.is_empty() {
            out.push_str(&format!("- **Điện thoại CVHT:** {}\n", info.dien_thoai_cvht));
        }
        out.push('\n');
    }

    out.push_str("## Thông tin trường\n\n");
    out.push_str(&format!("- **Mã trường:** {}\n", info.ma_truong));
    out.push_str(&format!("- **Tên trường:** {}\n", info.ten_truong));

    out.push_str(&format!(
        "\n\n*Dữ liệu được cập nhật lúc: {}*",
        info.thoi_gian_get_data
    ));

    out
}

pub struct GetStudentInfoTool {
    ctx: Arc<ToolContext>,
}

impl GetStudentInfoTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetStudentInfoTool {
    fn name(&self) -> &'static str {
        "getStudentInfo"
    }

    fn description(&self) -> &'static str {
        "Xem thông tin sinh viên"
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _arguments: Value) -> CallToolResult {
        if let Some(warning) = self.ctx.credentials_warning() {
            return warning;
        }

        let raw = match self.ctx.client.get_student_info().await {
            Ok(raw) => raw,
            Err(e) => return api_error_result(FETCH_ERROR, &e),
        };
        let parsed: crate::models::student::StudentInfoResponse =
            match parse_payload(raw, FETCH_ERROR) {
                Ok(parsed) => parsed,
                Err(result) => return result,
            };

        let Some(info) = parsed.data else {
            return CallToolResult::error(
                "❌ Không thể lấy thông tin sinh viên. Vui lòng thử lại sau.",
            );
        };

        CallToolResult::text(render_student_info(&info))
    }
}
