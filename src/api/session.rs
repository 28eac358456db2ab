//
//  seafile-cli
//  api/session.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Session Authentication
//!
//! A [`Session`] holds the server URL and account credentials and, once the
//! login exchange has succeeded, the account token plus the headers derived
//! from it.
//!
//! ## Login Exchange
//!
//! ```text
//! POST {server}/api2/auth-token/
//! Content-Type: application/x-www-form-urlencoded
//!
//! username=<login>&password=<password>
//!
//! 200 OK
//! {"token": "<40 characters>"}
//! ```
//!
//! ## Headers
//!
//! Every authenticated request carries:
//!
//! ```text
//! Authorization: Token <token>
//! Content-Type: application/json
//! ```

use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use super::client::REQUEST_TIMEOUT;
use super::common::{ApiError, ApiResult};
use super::url::{normalize_server_url, urljoin};

/// Length of the account tokens issued by Seafile.
pub const TOKEN_LENGTH: usize = 40;

#[derive(Debug, Deserialize)]
struct AuthTokenResponse {
    #[serde(default)]
    token: Option<String>,
}

/// Builds the headers attached to every authenticated request.
///
/// Depends on nothing but the token.
///
/// # Errors
///
/// Returns [`ApiError::InvalidHeader`] if the token contains characters that
/// cannot appear in a header value.
///
/// # Example
///
/// ```rust
/// use seafile_cli::api::session::auth_headers;
///
/// let headers = auth_headers("abc").unwrap();
/// assert_eq!(headers["authorization"], "Token abc");
/// assert_eq!(headers["content-type"], "application/json");
/// ```
pub fn auth_headers(token: &str) -> ApiResult<HeaderMap> {
    let mut authorization = HeaderValue::from_str(&format!("Token {}", token))
        .map_err(|_| ApiError::InvalidHeader("token contains invalid characters".to_string()))?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, authorization);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Sanity check on an account token: Seafile issues exactly 40 characters.
pub fn validate_token(token: &str) -> ApiResult<()> {
    let length = token.chars().count();
    if length != TOKEN_LENGTH {
        return Err(ApiError::AuthFailed(format!(
            "expected a {}-character token, got {} characters",
            TOKEN_LENGTH, length
        )));
    }
    Ok(())
}

/// Token and headers, always set and replaced together.
#[derive(Clone)]
struct SessionAuth {
    token: String,
    headers: HeaderMap,
}

impl SessionAuth {
    fn new(token: String) -> ApiResult<Self> {
        let headers = auth_headers(&token)?;
        Ok(Self { token, headers })
    }
}

/// Account-level session against one Seafile server.
///
/// A session starts unauthenticated. [`authenticate`](Self::authenticate)
/// performs the login exchange; a previously issued token can instead be
/// resupplied with [`Session::with_token`].
#[derive(Clone)]
pub struct Session {
    http: Client,
    server_url: String,
    login_name: String,
    password: String,
    auth: Option<SessionAuth>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("server_url", &self.server_url)
            .field("login_name", &self.login_name)
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    /// Creates an unauthenticated session.
    ///
    /// The server URL is normalized (whitespace and trailing slashes removed).
    pub fn new(http: Client, server_url: &str, login_name: &str, password: &str) -> Self {
        Self {
            http,
            server_url: normalize_server_url(server_url),
            login_name: login_name.to_string(),
            password: password.to_string(),
            auth: None,
        }
    }

    /// Creates a session from a token obtained earlier.
    ///
    /// No request is sent; the token is only checked for the expected length.
    pub fn with_token(http: Client, server_url: &str, login_name: &str, token: &str) -> ApiResult<Self> {
        validate_token(token)?;
        let mut session = Self::new(http, server_url, login_name, "");
        session.auth = Some(SessionAuth::new(token.to_string())?);
        Ok(session)
    }

    /// Performs the login exchange and stores the issued token.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] if the server answers anything but `200`
    /// - [`ApiError::AuthFailed`] if the body has no token, or the token is
    ///   not 40 characters long
    /// - [`ApiError::Network`] on transport failure
    ///
    /// On error the previous token and headers, if any, are left untouched.
    pub async fn authenticate(&mut self) -> ApiResult<()> {
        let url = urljoin(&self.server_url, &["api2", "auth-token"]);
        debug!(%url, user = %self.login_name, "Requesting account token");

        let response = self
            .http
            .post(&url)
            .form(&[
                ("username", self.login_name.as_str()),
                ("password", self.password.as_str()),
            ])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let token = serde_json::from_str::<AuthTokenResponse>(&body)
            .ok()
            .and_then(|resp| resp.token)
            .ok_or_else(|| ApiError::AuthFailed("response did not contain a token".to_string()))?;

        validate_token(&token)?;
        self.auth = Some(SessionAuth::new(token)?);
        debug!(user = %self.login_name, "Authenticated");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// The account token, once authenticated.
    pub fn token(&self) -> Option<&str> {
        self.auth.as_ref().map(|auth| auth.token.as_str())
    }

    /// Headers for authenticated requests, once authenticated.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.auth.as_ref().map(|auth| &auth.headers)
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn login_name(&self) -> &str {
        &self.login_name
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn test_auth_headers() {
        let headers = auth_headers(TOKEN).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[AUTHORIZATION], format!("Token {}", TOKEN).as_str());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_auth_headers_rejects_control_characters() {
        assert!(matches!(auth_headers("bad\ntoken"), Err(ApiError::InvalidHeader(_))));
    }

    #[test]
    fn test_validate_token_length() {
        assert!(validate_token(TOKEN).is_ok());
        assert!(matches!(validate_token("short"), Err(ApiError::AuthFailed(_))));
        assert!(validate_token(&format!("{}x", TOKEN)).is_err());
        assert!(validate_token("").is_err());
    }

    #[test]
    fn test_new_session_is_unauthenticated() {
        let session = Session::new(Client::new(), " https://x.com/ ", "me", "pw");
        assert_eq!(session.server_url(), "https://x.com");
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.headers().is_none());
    }

    #[test]
    fn test_with_token() {
        let session = Session::with_token(Client::new(), "https://x.com", "me", TOKEN).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.token(), Some(TOKEN));
        assert!(session.headers().is_some());

        assert!(Session::with_token(Client::new(), "https://x.com", "me", "short").is_err());
    }

    #[test]
    fn test_debug_hides_credentials() {
        let session = Session::with_token(Client::new(), "https://x.com", "me", TOKEN).unwrap();
        let debug = format!("{:?}", session);
        assert!(!debug.contains(TOKEN));
        assert!(debug.contains("authenticated: true"));
    }
}
