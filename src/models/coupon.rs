//! Coupon links and link categories.

use serde::{Deserialize, Serialize};

use crate::models::common::PageRecord;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CouponLink {
    pub id: i64,
    #[serde(default)]
    pub cps_link_app_id: String,
    #[serde(default)]
    pub cps_link_category_id: Option<i64>,
    #[serde(default)]
    pub cps_link_desc: String,
    #[serde(default)]
    pub cps_link_icon_url: String,
    #[serde(default)]
    pub cps_link_name: String,
    #[serde(default)]
    pub cps_link_original_id: String,
    #[serde(default)]
    pub cps_link_path: String,
    #[serde(default)]
    pub cps_link_sort: i64,
    #[serde(default)]
    pub cps_link_status: i64,
    /// 0 plain link, 1 mini program, 2 app link.
    #[serde(default)]
    pub cps_link_type: i64,
    #[serde(default)]
    pub create_at: String,
    #[serde(default)]
    pub update_at: String,
}

pub type CouponLinkList = PageRecord<CouponLink>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CouponLinkEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_link_category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_link_app_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_link_original_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_link_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_link_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_link_icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_link_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_link_sort: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_link_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_link_desc: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CouponLinkCategory {
    pub id: i64,
    #[serde(default)]
    pub cps_category_name: String,
    #[serde(default)]
    pub cps_category_status: serde_json::Value,
    #[serde(default)]
    pub cps_category_desc: String,
    #[serde(default)]
    pub cps_category_icon_url: String,
    #[serde(default)]
    pub create_at: String,
    #[serde(default)]
    pub update_at: String,
}

pub type CouponLinkCategoryList = PageRecord<CouponLinkCategory>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CouponLinkCategoryEdit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_category_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_category_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_category_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cps_category_icon_url: Option<String>,
}
