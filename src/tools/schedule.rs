// Timetable tools: per-semester view, single-day view, today and tomorrow

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use serde_json::{json, Value};
use std::sync::Arc;

use super::{api_error_result, parse_payload, ToolContext};
use crate::mcp::protocol::CallToolResult;
use crate::mcp::registry::Tool;
use crate::models::schedule::{ClassEntry, ScheduleData, ScheduleResponse};
use crate::utils::format::{format_vi_date_long, parse_portal_date};

const FETCH_ERROR: &str = "Lỗi khi lấy thời khóa biểu";

/// Whether a class entry falls on the target date
///
/// Two strategies ORed together: the raw `ngay_hoc` string compared against
/// the zero-padded YYYY-MM-DD form, and the parsed calendar date. The portal
/// emits full timestamps in some semesters and bare dates in others, so
/// either check alone misses entries.
fn matches_date(entry: &ClassEntry, target: NaiveDate) -> bool {
    let exact = entry.ngay_hoc == target.format("%Y-%m-%d").to_string();
    let by_date = parse_portal_date(&entry.ngay_hoc) == Some(target);
    exact || by_date
}

fn push_entry(out: &mut String, entry: &ClassEntry) {
    out.push_str(&format!("- **{}**\n", entry.ten_mon));
    out.push_str(&format!("  - 👨‍🏫 GV: {}\n", entry.ten_giang_vien));
    out.push_str(&format!("  - 🏢 Phòng: {}\n", entry.ma_phong));
    out.push_str(&format!(
        "  - ⏰ Tiết {}-{}\n\n",
        entry.tiet_bat_dau,
        entry.tiet_bat_dau + entry.so_tiet - 1
    ));
}

/// All classes on one date across every week, sorted by starting period
fn classes_on(data: &ScheduleData, target: NaiveDate) -> Vec<&ClassEntry> {
    let mut found: Vec<&ClassEntry> = data
        .ds_tuan_tkb
        .iter()
        .flat_map(|week| week.ds_thoi_khoa_bieu.iter())
        .filter(|entry| matches_date(entry, target))
        .collect();
    found.sort_by_key(|entry| entry.tiet_bat_dau);
    found
}

/// Single-day body; the caller supplies the heading
fn render_day(data: &ScheduleData, target: NaiveDate, empty_message: &str) -> String {
    let classes = classes_on(data, target);
    if classes.is_empty() {
        return empty_message.to_string();
    }

    let mut out = String::new();
    for entry in classes {
        push_entry(&mut out, entry);
    }
    out
}

/// Whole-semester view: weeks, then days in first-seen order
fn render_semester(data: &ScheduleData, semester: &str) -> String {
    let mut out = format!("# Thời khóa biểu {}\n\n", semester);

    if data.ds_tuan_tkb.is_empty() {
        out.push_str("Không có dữ liệu thời khóa biểu cho học kỳ này.");
        return out;
    }

    for week in &data.ds_tuan_tkb {
        out.push_str(&format!(
            "## {} ({} đến {})\n\n",
            week.ten_tuan, week.ngay_bat_dau, week.ngay_ket_thuc
        ));

        if week.ds_thoi_khoa_bieu.is_empty() {
            out.push_str("Không có lịch học trong tuần này.\n\n");
            continue;
        }

        let mut days: Vec<(&str, Vec<&ClassEntry>)> = Vec::new();
        for entry in &week.ds_thoi_khoa_bieu {
            match days.iter_mut().find(|(day, _)| *day == entry.ngay_hoc) {
                Some((_, list)) => list.push(entry),
                None => days.push((entry.ngay_hoc.as_str(), vec![entry])),
            }
        }

        for (day, mut entries) in days {
            let heading = parse_portal_date(day)
                .map(format_vi_date_long)
                .unwrap_or_else(|| day.to_string());
            out.push_str(&format!("### {}\n\n", heading));

            entries.sort_by_key(|entry| entry.tiet_bat_dau);
            for entry in entries {
                push_entry(&mut out, entry);
            }
        }
    }

    out
}

pub struct GetScheduleTool {
    ctx: Arc<ToolContext>,
}

impl GetScheduleTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetScheduleTool {
    fn name(&self) -> &'static str {
        "getSchedule"
    }

    fn description(&self) -> &'static str {
        "Xem thời khóa biểu theo học kỳ"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "semester": {
                    "type": "string",
                    "description": "Mã học kỳ (mặc định là học kỳ hiện tại)"
                },
                "date": {
                    "type": "string",
                    "description": "Ngày cụ thể muốn xem (dạng YYYY-MM-DD)"
                }
            }
        })
    }

    async fn call(&self, arguments: Value) -> CallToolResult {
        if let Some(warning) = self.ctx.credentials_warning() {
            return warning;
        }

        let semester = arguments.get("semester").and_then(Value::as_str);
        let date = arguments.get("date").and_then(Value::as_str);

        let target = match date {
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    return CallToolResult::error(format!(
                        "❌ Ngày không hợp lệ: {}. Định dạng cần là YYYY-MM-DD.",
                        raw
                    ));
                }
            },
            None => None,
        };

        let raw = match self.ctx.client.get_schedule(semester).await {
            Ok(raw) => raw,
            Err(e) => return api_error_result(FETCH_ERROR, &e),
        };
        let parsed: ScheduleResponse = match parse_payload(raw, FETCH_ERROR) {
            Ok(parsed) => parsed,
            Err(result) => return result,
        };

        let text = match target {
            Some(target) => format!(
                "# Thời khóa biểu ngày {}\n\n{}",
                format_vi_date_long(target),
                render_day(
                    &parsed.data,
                    target,
                    "Không có lịch học trong ngày này."
                )
            ),
            None => render_semester(
                &parsed.data,
                semester.unwrap_or(&self.ctx.config.current_semester),
            ),
        };

        CallToolResult::text(text)
    }
}

pub struct GetTodayScheduleTool {
    ctx: Arc<ToolContext>,
}

impl GetTodayScheduleTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetTodayScheduleTool {
    fn name(&self) -> &'static str {
        "getTodaySchedule"
    }

    fn description(&self) -> &'static str {
        "Xem thời khóa biểu hôm nay"
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _arguments: Value) -> CallToolResult {
        let today = Local::now().date_naive();
        day_schedule(
            &self.ctx,
            today,
            format!("# Thời khóa biểu hôm nay ({})\n\n", format_vi_date_long(today)),
            "Hôm nay không có lịch học.",
        )
        .await
    }
}

pub struct GetTomorrowScheduleTool {
    ctx: Arc<ToolContext>,
}

impl GetTomorrowScheduleTool {
    pub fn new(ctx: Arc<ToolContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Tool for GetTomorrowScheduleTool {
    fn name(&self) -> &'static str {
        "getTomorrowSchedule"
    }

    fn description(&self) -> &'static str {
        "Xem thời khóa biểu ngày mai"
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _arguments: Value) -> CallToolResult {
        let tomorrow = Local::now().date_naive() + Duration::days(1);
        day_schedule(
            &self.ctx,
            tomorrow,
            format!(
                "# Thời khóa biểu ngày mai ({})\n\n",
                format_vi_date_long(tomorrow)
            ),
            "Ngày mai không có lịch học.",
        )
        .await
    }
}

/// Shared path of the today/tomorrow tools: current semester, fixed date
async fn day_schedule(
    ctx: &ToolContext,
    target: NaiveDate,
    heading: String,
    empty_message: &str,
) -> CallToolResult {
    if let Some(warning) = ctx.credentials_warning() {
        return warning;
    }

    let raw = match ctx.client.get_schedule(None).await {
        Ok(raw) => raw,
        Err(e) => return api_error_result(FETCH_ERROR, &e),
    };
    let parsed: ScheduleResponse = match parse_payload(raw, FETCH_ERROR) {
        Ok(parsed) => parsed,
        Err(result) => return result,
    };

    let body = if parsed.data.ds_tuan_tkb.is_empty() {
        "Không có dữ liệu thời khóa biểu.".to_string()
    } else {
        render_day(&parsed.data, target, empty_message)
    };

    CallToolResult::text(format!("{}{}", heading, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data() -> ScheduleData {
        let raw = r#"{
            "ds_tuan_tkb": [{
                "ten_tuan": "Tuần 1",
                "ngay_bat_dau": "05/08/2024",
                "ngay_ket_thuc": "11/08/2024",
                "ds_thoi_khoa_bieu": [
                    {
                        "ngay_hoc": "2024-08-05T00:00:00",
                        "ten_mon": "Cấu trúc dữ liệu",
                        "ten_giang_vien": "Trần Thị C",
                        "ma_phong": "B2.201",
                        "tiet_bat_dau": 6,
                        "so_tiet": 4
                    },
                    {
                        "ngay_hoc": "2024-08-05",
                        "ten_mon": "Nhập môn lập trình",
                        "ten_giang_vien": "Nguyễn Văn A",
                        "ma_phong": "A1.101",
                        "tiet_bat_dau": 1,
                        "so_tiet": 3
                    },
                    {
                        "ngay_hoc": "2024-08-06T00:00:00",
                        "ten_mon": "Toán rời rạc",
                        "ten_giang_vien": "Lê Văn D",
                        "ma_phong": "A1.102",
                        "tiet_bat_dau": 1,
                        "so_tiet": 2
                    }
                ]
            }]
        }"#;
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_matches_date_by_string_and_by_calendar() {
        let target = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();

        // Bare date only matches the string comparison
        let bare: ClassEntry =
            serde_json::from_str(r#"{"ngay_hoc": "2024-08-05"}"#).unwrap();
        assert!(matches_date(&bare, target));

        // Timestamp only matches the parsed-date comparison
        let stamped: ClassEntry =
            serde_json::from_str(r#"{"ngay_hoc": "2024-08-05T00:00:00"}"#).unwrap();
        assert!(matches_date(&stamped, target));

        let other: ClassEntry =
            serde_json::from_str(r#"{"ngay_hoc": "2024-08-06T00:00:00"}"#).unwrap();
        assert!(!matches_date(&other, target));
    }

    #[test]
    fn test_classes_on_finds_both_formats_sorted() {
        let data = sample_data();
        let target = NaiveDate::from_ymd_opt(2024, 8, 5).unwrap();

        let classes = classes_on(&data, target);
        assert_eq!(classes.len(), 2);
        // Sorted by starting period, not document order
        assert_eq!(classes[0].ten_mon, "Nhập môn lập trình");
        assert_eq!(classes[1].ten_mon, "Cấu trúc dữ liệu");
    }

    #[test]
    fn test_render_day_empty_message() {
        let data = sample_data();
        let target = NaiveDate::from_ymd_opt(2024, 8, 11).unwrap();
        let body = render_day(&data, target, "Hôm nay không có lịch học.");
        assert_eq!(body, "Hôm nay không có lịch học.");
    }

    #[test]
    fn test_render_day_entry_format() {
        let data = sample_data();
        let target = NaiveDate::from_ymd_opt(2024, 8, 6).unwrap();
        let body = render_day(&data, target, "trống");

        assert!(body.contains("- **Toán rời rạc**"));
        assert!(body.contains("👨‍🏫 GV: Lê Văn D"));
        assert!(body.contains("🏢 Phòng: A1.102"));
        assert!(body.contains("⏰ Tiết 1-2"));
    }

    #[test]
    fn test_render_semester_groups_weeks_and_days() {
        let data = sample_data();
        let text = render_semester(&data, "20242");

        assert!(text.starts_with("# Thời khóa biểu 20242"));
        assert!(text.contains("## Tuần 1 (05/08/2024 đến 11/08/2024)"));
        assert!(text.contains("### Thứ Hai, 5 tháng 8, 2024"));
        assert!(text.contains("### Thứ Ba, 6 tháng 8, 2024"));
    }

    #[test]
    fn test_render_semester_without_data() {
        let data = ScheduleData::default();
        let text = render_semester(&data, "20242");
        assert!(text.contains("Không có dữ liệu thời khóa biểu cho học kỳ này."));
    }
}
