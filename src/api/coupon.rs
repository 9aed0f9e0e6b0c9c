//! Coupon link endpoints.

use serde_json::Value;

use crate::api::post;
use crate::error::ClientResult;
use crate::models::coupon::{CouponLinkCategoryEdit, CouponLinkCategoryList, CouponLinkEdit, CouponLinkList};
use crate::models::SearchParams;
use crate::service::{FlatClient, FormPart, RequestDescriptor};

pub async fn fetch_link_list(client: &FlatClient, params: &SearchParams) -> ClientResult<CouponLinkList> {
    post(client, "/link/list", params).await
}

pub async fn edit_link(client: &FlatClient, body: &CouponLinkEdit) -> ClientResult<Value> {
    post(client, "/link/edit", body).await
}

pub async fn fetch_category_list(client: &FlatClient, params: &SearchParams) -> ClientResult<CouponLinkCategoryList> {
    post(client, "/link/category/list", params).await
}

pub async fn edit_category(client: &FlatClient, body: &CouponLinkCategoryEdit) -> ClientResult<Value> {
    post(client, "/link/category/edit", body).await
}

/// Upload one file as the `file` form field; returns the stored file URL.
pub async fn upload_file(
    client: &FlatClient,
    file_name: &str,
    mime: Option<&str>,
    bytes: Vec<u8>,
) -> ClientResult<String> {
    let part = FormPart {
        name: "file".into(),
        file_name: Some(file_name.to_string()),
        mime: mime.map(str::to_string),
        bytes,
    };
    client
        .request(RequestDescriptor::post("/upload/file").multipart(vec![part]))
        .await
}
