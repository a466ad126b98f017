//! Session authentication (`SYNO.API.Auth`).
//!
//! Login produces the `_sid` token the dispatch layer attaches to every
//! subsequent call; the dispatch layer itself never interprets it.

use serde::Deserialize;

use crate::client::{Client, Params};
use crate::error::Error;

const AUTH_API: &str = "SYNO.API.Auth";

#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    pub account: String,
    pub passwd: String,
    /// Application session name; logout must quote the same name.
    pub session: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub sid: String,
}

pub struct AuthApi<'a> {
    client: &'a Client,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn login(&self, req: &LoginRequest) -> Result<LoginResponse, Error> {
        let params = Params::new()
            .with("account", req.account.as_str())
            .with("passwd", req.passwd.as_str())
            .with("session", req.session.as_str())
            .with("format", "sid");
        self.client.invoke(AUTH_API, 3, "login", &params)
    }

    /// Invalidate the session.
    ///
    /// DSM answers a bare `{"success":true}` here, so the call goes
    /// through the payload-less envelope path; failure envelopes and
    /// undecodable bodies still propagate.
    pub fn logout(&self, session: &str) -> Result<(), Error> {
        let params = Params::new().with("session", session);
        self.client.invoke_unit(AUTH_API, 1, "logout", &params)
    }
}
