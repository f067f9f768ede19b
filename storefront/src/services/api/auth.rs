//! # Authentication Endpoints
//!
//! Session-cookie authentication: login sets the cookie, logout clears it,
//! and the status check reports whether one is present.

use super::request::ApiRequest;

pub const CHECK_LOGIN_STATUS: &str = "/api/check_login_status";

pub fn login(fields: Vec<(String, String)>) -> ApiRequest {
    ApiRequest::post("/api/login").with_form(fields)
}

pub fn admin_login(fields: Vec<(String, String)>) -> ApiRequest {
    ApiRequest::post("/api/admin_login").with_form(fields)
}

pub fn register(fields: Vec<(String, String)>) -> ApiRequest {
    ApiRequest::post("/api/register").with_form(fields)
}

pub fn logout() -> ApiRequest {
    ApiRequest::post("/api/logout")
}

pub fn forgot_password(fields: Vec<(String, String)>) -> ApiRequest {
    ApiRequest::post("/api/forgot_password").with_form(fields)
}

pub fn reset_password(fields: Vec<(String, String)>) -> ApiRequest {
    ApiRequest::post("/api/reset_password").with_form(fields)
}

pub fn contact_us(fields: Vec<(String, String)>) -> ApiRequest {
    ApiRequest::post("/api/contact_us").with_form(fields)
}

/// Answers a bare [`shared::SessionStatus`], not an envelope.
pub fn check_login_status() -> ApiRequest {
    ApiRequest::get(CHECK_LOGIN_STATUS)
}
