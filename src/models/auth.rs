//! `/auth` payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Captcha answer.
    pub code: String,
    /// Captcha id.
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub check_password: String,
    pub code: String,
    pub id: i64,
}

/// Captcha challenge. The image is usually a data URL.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Captcha {
    #[serde(default)]
    pub id: i64,
    #[serde(default, alias = "img", alias = "captcha")]
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub buttons: Vec<String>,
}

impl UserInfo {
    /// Button-permission check used to pick `X-Button-Key` values.
    pub fn has_button(&self, key: &str) -> bool {
        self.buttons.iter().any(|b| b == key)
    }
}
