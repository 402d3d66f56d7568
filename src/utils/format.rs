// Vietnamese display formatting
//
// The portal's consumers read Vietnamese, so numbers and dates follow
// vi-VN conventions: dots as thousands separators, Thứ Hai..Chủ Nhật
// weekday names, day-first dates.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde_json::Value;

/// Group digits with '.' separators the way vi-VN formats integers
pub fn format_vn_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    let mut remaining = digits.len();
    for ch in digits.chars() {
        grouped.push(ch);
        remaining -= 1;
        if remaining > 0 && remaining % 3 == 0 {
            grouped.push('.');
        }
    }

    if n < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Coerce an amount field to an integer
///
/// Digit strings may carry trailing noise, so parsing stops at the first
/// non-digit. Anything unparseable counts as zero.
pub fn parse_amount(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let trimmed = s.trim();
            let (sign, digits) = match trimmed.strip_prefix('-') {
                Some(rest) => (-1, rest),
                None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
            };
            let leading: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
            leading.parse::<i64>().map(|v| sign * v).unwrap_or(0)
        }
        _ => 0,
    }
}

/// Render a raw JSON scalar the way it came over the wire
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Whether a scalar carries content: null, empty strings, zero and false
/// all count as absent
pub fn has_content(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Render a scalar, falling back to an empty string for absent values
pub fn display_or_empty(value: &Value) -> String {
    if has_content(value) {
        display_value(value)
    } else {
        String::new()
    }
}

/// Render a scalar, falling back to "0" for absent values
pub fn display_or_zero(value: &Value) -> String {
    if has_content(value) {
        display_value(value)
    } else {
        "0".to_string()
    }
}

/// Parse the date formats the portal is known to emit
pub fn parse_portal_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Some(d);
    }

    None
}

/// Day-first date without zero padding, e.g. 5/8/2024
pub fn format_date_dmy(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

pub fn vi_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Thứ Hai",
        Weekday::Tue => "Thứ Ba",
        Weekday::Wed => "Thứ Tư",
        Weekday::Thu => "Thứ Năm",
        Weekday::Fri => "Thứ Sáu",
        Weekday::Sat => "Thứ Bảy",
        Weekday::Sun => "Chủ Nhật",
    }
}

/// Long vi-VN date with weekday, e.g. "Thứ Hai, 5 tháng 8, 2024"
pub fn format_vi_date_long(date: NaiveDate) -> String {
    format!(
        "{}, {} tháng {}, {}",
        vi_weekday(date.weekday()),
        date.day(),
        date.month(),
        date.year()
    )
}
