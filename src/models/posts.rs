// Portal post listing payload
//
// Posts come grouped by category. Note the inner list is spelled
// `ds_baiviet` on the wire while the outer one is `ds_bai_viet`.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct PostsResponse {
    #[serde(default)]
    pub data: PostsData,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostsData {
    #[serde(default)]
    pub ds_bai_viet: Vec<PostCategory>,
}

/// Category markers: "tb" notifications, "hd" guides, "bm" forms
#[derive(Debug, Default, Deserialize)]
pub struct PostCategory {
    #[serde(default)]
    pub ky_hieu: String,
    #[serde(default)]
    pub ds_baiviet: Vec<Post>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub tieu_de: String,
    #[serde(default)]
    pub url_bai_viet: String,
    #[serde(default)]
    pub ngay_dang_tin: String,
}

impl PostsData {
    /// Category lookup by marker
    pub fn category(&self, marker: &str) -> Option<&PostCategory> {
        self.ds_bai_viet.iter().find(|cat| cat.ky_hieu == marker)
    }
}
