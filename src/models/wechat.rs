//! WeChat enterprise: fans, companies, members.

use serde::{Deserialize, Serialize};

use crate::models::common::PageRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WechatFan {
    pub company_fans_id: i64,
    #[serde(default)]
    pub company_fans_name: String,
    #[serde(default)]
    pub company_fans_profile_picture: String,
    #[serde(default)]
    pub company_fans_external_user_id: String,
    #[serde(default)]
    pub company_belong_id: String,
    #[serde(default)]
    pub company_fans_status: i64,
    #[serde(default)]
    pub company_fans_bind_type: i64,
    #[serde(default)]
    pub company_fans_loss_at: String,
    #[serde(default)]
    pub company_fans_last_active_time: String,
}

pub type WechatFanList = PageRecord<WechatFan>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FansAnalysis {
    #[serde(default)]
    pub company_valid_fans: i64,
    #[serde(default)]
    pub company_accumulated_loss: i64,
    /// Field name as spelled by the backend.
    #[serde(default, rename = "company_accomulated_enter")]
    pub company_accumulated_enter: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyIdParam {
    pub company_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompanyTypeParam {
    pub company_type: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct WechatEnterprise {
    pub id: i64,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub company_corp_id: String,
    #[serde(default)]
    pub company_type: String,
    #[serde(default)]
    pub company_status: String,
    #[serde(default)]
    pub company_remarks: String,
    #[serde(default)]
    pub company_seats_numbers: String,
    #[serde(default)]
    pub company_agent_id: String,
    #[serde(default)]
    pub company_create_at: String,
    #[serde(default)]
    pub company_update_at: String,
}

pub type WechatEnterpriseList = PageRecord<WechatEnterprise>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EnterpriseMember {
    #[serde(default)]
    pub company_member_user_account: String,
    #[serde(default)]
    pub company_member_account_type: i64,
    #[serde(default)]
    pub company_member_scope_of_authority: String,
    #[serde(default)]
    pub company_member_user_name: String,
    #[serde(default)]
    pub company_member_operate: String,
}

pub type EnterpriseMemberList = PageRecord<EnterpriseMember>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct MemberManageParam {
    pub company_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub user_account: String,
    pub user_name: String,
    pub account_type: i64,
    pub authorization_label: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyAddParam {
    pub company_name: String,
    pub company_type: i64,
    pub company_status: i64,
    pub company_remarks: String,
    pub company_seats_numbers: i64,
    pub company_corp_id: String,
    pub company_agent_id: String,
}
