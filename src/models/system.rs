//! System manage: users, roles, menus.

use serde::{Deserialize, Serialize};

use crate::models::common::{PageRecord, RecordMeta};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Role {
    pub id: i64,
    #[serde(default)]
    pub admin_role_name: String,
    #[serde(default)]
    pub admin_role_router_ids: Vec<i64>,
    #[serde(default)]
    pub admin_role_button_ids: Vec<i64>,
    #[serde(default)]
    pub admin_role_desc: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EditRole {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// `add` or `edit`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_role_router_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_role_button_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_role_desc: Option<String>,
}

pub type RoleList = PageRecord<Role>;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub admin_user_username: String,
    /// 1 active, 2 disabled.
    #[serde(default)]
    pub admin_user_status: i64,
    #[serde(default)]
    pub user_roles: Vec<Role>,
    #[serde(flatten)]
    pub meta: RecordMeta,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EditUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_user_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_user_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_user_role_ids: Option<Vec<i64>>,
}

pub type UserList = PageRecord<User>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MenuButton {
    pub key: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Menu {
    pub id: i64,
    #[serde(default)]
    pub admin_router_pid: i64,
    /// 1 directory, 2 menu, 3 button.
    #[serde(default)]
    pub admin_router_menu_type: i64,
    #[serde(default)]
    pub admin_router_menu_name: String,
    #[serde(default)]
    pub admin_router_route_name: String,
    #[serde(default)]
    pub admin_router_route_path: String,
    #[serde(default)]
    pub admin_router_component: Option<String>,
    #[serde(default)]
    pub admin_router_icon: String,
    #[serde(default)]
    pub admin_router_icon_type: i64,
    #[serde(default)]
    pub buttons: Option<Vec<MenuButton>>,
    #[serde(default)]
    pub children: Vec<Menu>,
}

pub type MenuList = PageRecord<Menu>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuTree {
    pub id: i64,
    pub label: String,
    #[serde(default)]
    pub p_id: i64,
    #[serde(default)]
    pub children: Vec<MenuTree>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPair {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMenuRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub menu_type: i64,
    pub menu_name: String,
    pub route_name: String,
    pub route_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub i18n_key: Option<String>,
    pub icon: String,
    pub icon_type: i64,
    pub parent_id: i64,
    pub status: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constant: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_in_menu: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_menu: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_tab: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_index_in_tab: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Vec<QueryPair>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<MenuButton>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_list_decodes_nested_roles() {
        let list: UserList = serde_json::from_value(json!({
            "list": [{
                "id": 7,
                "admin_user_username": "alice",
                "admin_user_status": 1,
                "user_roles": [{"id": 2, "admin_role_name": "ops"}],
                "createTime": "2024-05-01"
            }],
            "page": {"current": 1, "request_page_size": 10, "total": 1}
        }))
        .unwrap();

        let user = &list.list[0];
        assert_eq!(user.user_roles[0].admin_role_name, "ops");
        assert_eq!(user.meta.create_time.as_deref(), Some("2024-05-01"));
    }

    #[test]
    fn test_edit_menu_camel_case_body() {
        let body = serde_json::to_value(EditMenuRequest {
            menu_type: 2,
            menu_name: "Users".into(),
            route_name: "manage_user".into(),
            route_path: "/manage/user".into(),
            icon: "ic:round-manage-accounts".into(),
            icon_type: 1,
            parent_id: 1,
            status: 1,
            hide_in_menu: Some(0),
            ..EditMenuRequest::default()
        })
        .unwrap();

        assert_eq!(body["menuType"], 2);
        assert_eq!(body["hideInMenu"], 0);
        assert!(body.get("id").is_none());
    }
}
