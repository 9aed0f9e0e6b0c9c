//! `/auth` endpoints.

use crate::error::ClientResult;
use crate::models::auth::{Captcha, LoginRequest, RegisterRequest, UserInfo};
use crate::service::{FlatClient, RawClient, RequestDescriptor};
use crate::session::LoginToken;

pub async fn fetch_login(client: &RawClient, request: &LoginRequest) -> ClientResult<LoginToken> {
    client
        .request(RequestDescriptor::post("/auth/login").json(request)?)
        .await
}

pub async fn fetch_register(client: &RawClient, request: &RegisterRequest) -> ClientResult<serde_json::Value> {
    client
        .request(RequestDescriptor::post("/auth/register").json(request)?)
        .await
}

pub async fn fetch_captcha(client: &RawClient) -> ClientResult<Captcha> {
    client.request(RequestDescriptor::get("/auth/captcha")).await
}

pub async fn fetch_user_info(client: &RawClient) -> ClientResult<UserInfo> {
    client.request(RequestDescriptor::get("/auth/user/info")).await
}

/// Refresh tokens through the single-flight coordinator.
pub async fn refresh_token(client: &FlatClient) -> ClientResult<()> {
    client.refresh().await
}

/// Ask the backend to answer with an arbitrary `code` and `msg`; exercises the
/// failure policies end to end.
pub async fn fetch_custom_backend_error(client: &FlatClient, code: &str, msg: &str) -> ClientResult<serde_json::Value> {
    client
        .request_value(
            RequestDescriptor::get("/auth/error")
                .query("code", code)
                .query("msg", msg),
        )
        .await
}
