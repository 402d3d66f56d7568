// Curriculum payload

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct CurriculumResponse {
    #[serde(default)]
    pub data: CurriculumData,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurriculumData {
    #[serde(default)]
    pub ds_nganh_sinh_vien: Vec<StudentMajor>,
    #[serde(default, rename = "ds_CTDT_hocky")]
    pub ds_ctdt_hocky: Vec<CurriculumSemester>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StudentMajor {
    #[serde(default)]
    pub ma_nganh: String,
    #[serde(default)]
    pub ten_nganh: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CurriculumSemester {
    #[serde(default)]
    pub hoc_ky: String,
    #[serde(default)]
    pub ten_hoc_ky: String,
    #[serde(default, rename = "ds_CTDT_mon_hoc")]
    pub ds_ctdt_mon_hoc: Vec<CurriculumSubject>,
}

/// One subject slot in the study program; the "x" markers say whether it
/// is mandatory, already studied, and already passed
#[derive(Debug, Default, Deserialize)]
pub struct CurriculumSubject {
    #[serde(default)]
    pub ma_mon: String,
    #[serde(default)]
    pub ten_mon: String,
    #[serde(default)]
    pub so_tin_chi: Value,
    #[serde(default)]
    pub mon_bat_buoc: String,
    #[serde(default)]
    pub mon_da_hoc: String,
    #[serde(default)]
    pub mon_da_dat: String,
    #[serde(default)]
    pub ly_thuyet: Value,
    #[serde(default)]
    pub thuc_hanh: Value,
    #[serde(default)]
    pub tong_tiet: Value,
}
