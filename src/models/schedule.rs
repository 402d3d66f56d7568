// Weekly timetable payload

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub data: ScheduleData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleData {
    #[serde(default)]
    pub ds_tuan_tkb: Vec<ScheduleWeek>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScheduleWeek {
    #[serde(default)]
    pub ten_tuan: String,
    #[serde(default)]
    pub ngay_bat_dau: String,
    #[serde(default)]
    pub ngay_ket_thuc: String,
    #[serde(default)]
    pub ds_thoi_khoa_bieu: Vec<ClassEntry>,
}

/// One scheduled class on one date
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassEntry {
    #[serde(default)]
    pub ngay_hoc: String,
    #[serde(default)]
    pub ten_mon: String,
    #[serde(default)]
    pub ten_giang_vien: String,
    #[serde(default)]
    pub ma_phong: String,
    #[serde(default)]
    pub tiet_bat_dau: i64,
    #[serde(default)]
    pub so_tiet: i64,
}
