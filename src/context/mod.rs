//
//  seafile-cli
//  context/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Context Module
//!
//! Works out which server, account, and repository a command targets.
//!
//! ## Resolution Priority
//!
//! 1. **Command-line flags**: `--server`, `--user`, `--repo`, `--repo-token`
//! 2. **Environment variables**: `SEAFILE_SERVER`, `SEAFILE_USER`,
//!    `SEAFILE_REPO`, `SEAFILE_REPO_TOKEN`
//! 3. **Configuration file**: `[core]` values and `[aliases]`
//! 4. **Keyring**: stored account and repository tokens
//! 5. **Interactive selection**: when prompts are allowed
//!
//! ## Repository Arguments
//!
//! `--repo` accepts a config alias, a repository ID (a lowercase UUID), or a
//! repository name. Aliases are expanded first; the result is then treated as
//! an ID if it looks like one and as a name otherwise.

mod resolver;

pub use resolver::*;

use thiserror::Error;

/// How a `--repo` argument names a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSelector {
    Id(String),
    Name(String),
}

/// Failures to resolve what a command should act on.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("No Seafile server configured. Use --server, SEAFILE_SERVER, or 'sf config set server_url <url>'")]
    NoServer,

    #[error("Not logged in to {0}. Run 'sf auth login' first.")]
    NotLoggedIn(String),

    #[error("Repository '{0}' not found")]
    RepoNotFound(String),

    #[error("No repository selected. Use --repo or --repo-token")]
    NoRepo,
}
