//
//  seafile-cli
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Decoding
//!
//! Turns a completed HTTP exchange into either a hard error or an optional
//! JSON value.
//!
//! | Status | Body | Result |
//! |--------|------|--------|
//! | >= 400 | anything | `Err(ApiError::Http { status, body })` |
//! | < 400 | valid JSON | `Ok(Some(value))` |
//! | < 400 | empty or not JSON | `Ok(None)` |
//!
//! Many mutating Seafile endpoints answer `200` with an empty body, which is
//! why an undecodable success body is "no data" and not a failure.

use reqwest::Response;
use serde_json::Value;

use super::common::{ApiError, ApiResult};

/// Decodes a status code and raw body.
///
/// # Example
///
/// ```rust
/// use seafile_cli::api::response::parse_response;
///
/// assert_eq!(parse_response(200, r#"{"a":1}"#).unwrap(), Some(serde_json::json!({"a": 1})));
/// assert_eq!(parse_response(200, "").unwrap(), None);
/// assert!(parse_response(404, "not found").is_err());
/// ```
pub fn parse_response(status: u16, body: &str) -> ApiResult<Option<Value>> {
    if status >= 400 {
        return Err(ApiError::Http {
            status,
            body: body.to_string(),
        });
    }

    Ok(serde_json::from_str(body).ok())
}

/// Reads a `reqwest` response body and decodes it with [`parse_response`].
///
/// Failing to read the body is a transport error, not "no data".
pub async fn decode(response: Response) -> ApiResult<Option<Value>> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    tracing::debug!(status, bytes = body.len(), "Decoding response");
    parse_response(status, &body)
}
