// Student profile payload

use serde::Deserialize;

/// Response wrapper; `data` is absent when the portal cannot resolve the
/// profile, which callers surface as an error instead of an empty page
#[derive(Debug, Default, Deserialize)]
pub struct StudentInfoResponse {
    pub data: Option<StudentInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentInfo {
    // Personal details
    #[serde(default)]
    pub ten_day_du: String,
    #[serde(default)]
    pub ma_sv: String,
    #[serde(default)]
    pub gioi_tinh: String,
    #[serde(default)]
    pub ngay_sinh: String,
    #[serde(default)]
    pub noi_sinh: String,
    #[serde(default)]
    pub dan_toc: String,
    #[serde(default)]
    pub ton_giao: String,
    #[serde(default)]
    pub quoc_tich: String,
    #[serde(default)]
    pub so_cmnd: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub email2: String,

    // Registered residence
    #[serde(default)]
    pub ho_khau_thuong_tru_gd: String,
    #[serde(default)]
    pub ho_khau_quan_huyen: String,
    #[serde(default)]
    pub ho_khau_tinh_thanh: String,

    // Academic standing
    #[serde(default)]
    pub lop: String,
    #[serde(default)]
    pub khoi: String,
    #[serde(default)]
    pub nganh: String,
    #[serde(default)]
    pub chuyen_nganh: String,
    #[serde(default)]
    pub khoa: String,
    #[serde(default)]
    pub bac_he_dao_tao: String,
    #[serde(default)]
    pub nien_khoa: String,
    #[serde(default)]
    pub str_nhhk_vao: String,
    #[serde(default)]
    pub str_nhhk_ra: String,
    #[serde(default)]
    pub hien_dien_sv: String,

    // Academic advisor, present only when one is assigned
    #[serde(default)]
    pub ma_cvht: String,
    #[serde(default)]
    pub ho_ten_cvht: String,
    #[serde(default)]
    pub email_cvht: String,
    #[serde(default)]
    pub dien_thoai_cvht: String,

    // Institution
    #[serde(default)]
    pub ma_truong: String,
    #[serde(default)]
    pub ten_truong: String,

    #[serde(default)]
    pub thoi_gian_get_data: String,
}
