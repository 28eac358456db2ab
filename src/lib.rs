//
//  seafile-cli
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Seafile CLI Library
//!
//! A client library for the Seafile Web API, and the `sf` command-line tool
//! built on it.
//!
//! ## Overview
//!
//! The [`api`] module is usable on its own: log in with a login name and
//! password, manage repositories (libraries), and list, create, rename, and
//! delete directories and files inside them. The remaining modules make up the
//! command-line front end.
//!
//! ## Features
//!
//! - **Two ways in**: account login, or a per-repository API token with no login
//! - **Repository Management**: list, look up, create, and delete repositories
//! - **Namespace Operations**: directories and files within a repository
//! - **Secure Authentication**: tokens kept in the system keyring
//! - **Interactive & Scriptable**: terminal prompts, tables, and JSON output
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client for the Seafile Web API
//! - [`cli`]: Command-line interface definitions using clap
//! - [`auth`]: Keyring token storage and token input
//! - [`config`]: Configuration file management
//! - [`context`]: Resolution of server, account, and repository for a command
//! - [`output`]: Output formatting (Table, JSON)
//! - [`interactive`]: Interactive prompts and selectors
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use seafile_cli::api::SeafileClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut client = SeafileClient::new("https://cloud.seafile.com", "me@example.com", "secret")?;
//! client.authenticate().await?;
//!
//! if let Some(repo) = client.create_repository("demo", None, None).await? {
//!     repo.create_dir("/sub").await?;
//!     let entries = repo.list_dir("/").await?;
//!     println!("{} entries", entries.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;

pub mod auth;

pub mod cli;

pub mod config;

pub mod context;

pub mod interactive;

pub mod output;

pub mod util;

pub use cli::Cli;

pub use config::Config;

pub use context::ContextResolver;

/// The name of the command-line binary.
pub const APP_NAME: &str = "sf";

/// The crate version, sent in the User-Agent header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process exit codes used by `sf`.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments (reported by clap).
    pub const USAGE: i32 = 2;

    /// Authentication required or failed.
    ///
    /// Run `sf auth login` to authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The requested repository, directory, or file does not exist or the
    /// account cannot see it.
    pub const NOT_FOUND: i32 = 8;
}
