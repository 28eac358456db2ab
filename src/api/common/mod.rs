//
//  seafile-cli
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Seafile Web API
//!
//! This module provides the error type shared by every part of the API layer:
//! the session login exchange, the client facade, and repository handles.
//!
//! # Example
//!
//! ```rust
//! use seafile_cli::api::common::ApiError;
//!
//! fn handle_result<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(ApiError::NotAuthenticated) => println!("Please log in first"),
//!         Err(ApiError::Http { status, .. }) => println!("Server answered {}", status),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Notes
//!
//! - A "no data" response is never an error; it is an `Ok(None)` or an empty
//!   collection at the call site
//! - No variant is ever retried by the library

use thiserror::Error;

/// Unified error type for all Seafile API operations.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `AuthFailed` | Login rejected or returned a malformed token |
/// | `NotAuthenticated` | An operation was attempted before logging in |
/// | `Http` | The server answered with a status of 400 or above |
/// | `Network` | Connection, TLS, timeout, or body read failure |
/// | `MissingRepoId` | A session-token repository handle was built without an ID |
/// | `InvalidRepoId` | A repository ID that is a `.` or `..` path segment |
/// | `InvalidHeader` | A token could not be encoded as an HTTP header |
///
/// # Notes
///
/// - The `Network` variant automatically converts from `reqwest::Error`
/// - `Http` is displayed as `ClientHttpError[<status>: <body>]`
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed due to bad credentials or a malformed token.
    ///
    /// # Parameters
    ///
    /// - `0` - Detailed reason for the authentication failure
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// An operation that needs a session token was called before
    /// [`authenticate`](crate::api::SeafileClient::authenticate).
    #[error("Not authenticated: log in before calling the API")]
    NotAuthenticated,

    /// The server answered with an error status.
    ///
    /// Carries the status code and the raw response body, unmodified.
    #[error("ClientHttpError[{status}: {body}]")]
    Http {
        /// HTTP status code (always 400 or above)
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts, DNS resolution errors,
    /// and other transport-layer issues.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A repository handle addressed by session token has no repository ID.
    #[error("A repository ID is required when using a session token")]
    MissingRepoId,

    /// A repository ID that would address a different path once joined.
    #[error("Invalid repository ID: '{0}'")]
    InvalidRepoId(String),

    /// A token contained characters that are not valid in an HTTP header.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl ApiError {
    /// Returns the HTTP status code for [`ApiError::Http`], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Checks whether this is an HTTP 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Result alias used throughout the API layer.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
