//
//  seafile-cli
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module binds the Seafile Web API: account login, repository
//! (library) management, and directory and file operations within a
//! repository.
//!
//! ## Architecture
//!
//! - [`url`]: URL joining and query string rendering
//! - [`response`]: status and body decoding
//! - [`session`]: account login and authentication headers
//! - [`repo`]: repository handles and their directory/file operations
//! - [`client`]: the [`SeafileClient`] entry point
//! - [`models`]: repository metadata and directory entries
//! - [`common`]: the shared [`ApiError`] type
//!
//! ## Usage
//!
//! ```rust,no_run
//! use seafile_cli::api::{Repo, SeafileClient};
//!
//! # async fn example() -> seafile_cli::api::ApiResult<()> {
//! // Account login
//! let mut client = SeafileClient::new("https://cloud.seafile.com", "me@example.com", "secret")?;
//! client.authenticate().await?;
//! let repos = client.list_repositories().await?;
//!
//! // Per-repository API token, no login needed
//! let repo = Repo::by_repo_token("https://cloud.seafile.com", "repo-api-token")?;
//! let details = repo.get_details().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures are returned as [`ApiError`] variants:
//!
//! - `AuthFailed`: login rejected or malformed token
//! - `NotAuthenticated`: operation attempted before login
//! - `Http`: status 400 or above, with the raw body
//! - `Network`: transport failure or timeout
//!
//! A successful response with an empty or non-JSON body is never an error.

/// Entry point: login and repository management.
pub mod client;

/// Shared error type.
pub mod common;

/// Repository metadata and directory entries.
pub mod models;

/// Repository handles.
pub mod repo;

/// Response decoding.
pub mod response;

/// Account session and authentication headers.
pub mod session;

/// URL building helpers.
pub mod url;

pub use client::SeafileClient;
pub use common::{ApiError, ApiResult};
pub use models::{DirEntry, RepoDetails};
pub use repo::{AuthMode, Repo};
pub use session::Session;
