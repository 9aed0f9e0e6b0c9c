//! WeChat enterprise endpoints.

use serde_json::Value;

use crate::api::post;
use crate::error::ClientResult;
use crate::models::wechat::{
    CompanyAddParam, CompanyIdParam, CompanyTypeParam, EnterpriseMemberList, FansAnalysis, MemberManageParam,
    WechatEnterpriseList, WechatFanList,
};
use crate::models::SearchParams;
use crate::service::FlatClient;

/// Requires a `company_type` filter.
pub async fn fetch_fans_list(client: &FlatClient, params: &SearchParams) -> ClientResult<WechatFanList> {
    post(client, "/company/fans/list", params).await
}

pub async fn fetch_fans_analysis(client: &FlatClient, company_id: &str) -> ClientResult<FansAnalysis> {
    post(
        client,
        "/company/fans/manage",
        &CompanyIdParam {
            company_id: company_id.to_string(),
        },
    )
    .await
}

pub async fn fetch_enterprise_list(client: &FlatClient, params: &SearchParams) -> ClientResult<WechatEnterpriseList> {
    post(client, "/company/list", params).await
}

/// Requires a `company_id` filter.
pub async fn fetch_member_list(client: &FlatClient, params: &SearchParams) -> ClientResult<EnterpriseMemberList> {
    post(client, "/company/member/list", params).await
}

pub async fn edit_member(client: &FlatClient, body: &MemberManageParam) -> ClientResult<Value> {
    post(client, "/company/member/edit", body).await
}

pub async fn add_company(client: &FlatClient, body: &CompanyAddParam) -> ClientResult<Value> {
    post(client, "/company/add", body).await
}

pub async fn fetch_fans_loss(client: &FlatClient, company_type: i64) -> ClientResult<Value> {
    post(client, "/company/fans/loss", &CompanyTypeParam { company_type }).await
}

pub async fn fetch_company_tags(client: &FlatClient, company_id: &str) -> ClientResult<Value> {
    post(
        client,
        "/company/tags/list",
        &CompanyIdParam {
            company_id: company_id.to_string(),
        },
    )
    .await
}
