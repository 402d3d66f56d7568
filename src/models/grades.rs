// Grade sheet payload
//
// Score fields arrive as numbers or strings depending on the subject, so
// they stay as raw JSON values and the rendering layer stringifies them.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct GradesResponse {
    #[serde(default)]
    pub data: GradesData,
}

#[derive(Debug, Default, Deserialize)]
pub struct GradesData {
    #[serde(default)]
    pub ds_diem_hocky: Vec<SemesterGrades>,
}

/// Grades of one semester, with accumulated figures repeated per entry
#[derive(Debug, Default, Deserialize)]
pub struct SemesterGrades {
    #[serde(default)]
    pub ten_hoc_ky: String,
    #[serde(default)]
    pub dtb_tich_luy_he_10: Value,
    #[serde(default)]
    pub dtb_tich_luy_he_4: Value,
    #[serde(default)]
    pub so_tin_chi_dat_tich_luy: Value,
    #[serde(default)]
    pub dtb_hk_he10: Value,
    #[serde(default)]
    pub dtb_hk_he4: Value,
    #[serde(default)]
    pub so_tin_chi_dat_hk: Value,
    #[serde(default)]
    pub xep_loai_tkb_hk: Value,
    #[serde(default)]
    pub ds_diem_mon_hoc: Vec<SubjectGrade>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubjectGrade {
    #[serde(default)]
    pub ma_mon: String,
    #[serde(default)]
    pub ten_mon: String,
    #[serde(default)]
    pub so_tin_chi: Value,
    #[serde(default)]
    pub diem_thi: Value,
    #[serde(default)]
    pub diem_tk: Value,
    #[serde(default)]
    pub diem_tk_chu: Value,
    /// 1 when the subject is passed
    #[serde(default)]
    pub ket_qua: Value,
}

impl SubjectGrade {
    pub fn is_passed(&self) -> bool {
        self.ket_qua.as_i64() == Some(1)
    }
}
