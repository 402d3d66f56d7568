// Tuition payload
//
// Amounts come back as numbers or digit strings; they are kept raw here
// and coerced by the rendering layer.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct TuitionResponse {
    #[serde(default)]
    pub data: TuitionData,
}

#[derive(Debug, Default, Deserialize)]
pub struct TuitionData {
    #[serde(default)]
    pub ds_hoc_phi_hoc_ky: Vec<SemesterTuition>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SemesterTuition {
    #[serde(default)]
    pub ten_hoc_ky: String,
    #[serde(default)]
    pub hoc_phi: Value,
    #[serde(default)]
    pub mien_giam: Value,
    #[serde(default)]
    pub duoc_ho_tro: Value,
    #[serde(default)]
    pub phai_thu: Value,
    #[serde(default)]
    pub da_thu: Value,
    #[serde(default)]
    pub con_no: Value,
    /// Price per credit
    #[serde(default)]
    pub don_gia: Value,
}
