//
//  seafile-cli
//  api/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Repository Handles
//!
//! A [`Repo`] addresses one Seafile repository (library) and exposes the
//! directory and file operations scoped to it.
//!
//! ## Addressing Modes
//!
//! | | [`AuthMode::ByRepoToken`] | [`AuthMode::BySessionToken`] |
//! |---|---|---|
//! | Credential | per-repository API token | account token |
//! | Info | `/api/v2.1/via-repo-token/repo-info/` | `/api2/repos/{id}/` |
//! | Directories | `/api/v2.1/via-repo-token/dir/` | `/api2/repos/{id}/dir/` |
//! | Files | `/api/v2.1/via-repo-token/file/` | `/api2/repos/{id}/file/` |
//! | File detail | `/api/v2.1/via-repo-token/file/` | `/api2/repos/{id}/file/detail/` |
//! | Path parameter | `path` | `p` |
//!
//! The mode is fixed when the handle is built and every operation derives its
//! URL and parameter name from it.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::client::{build_http_client, Requester};
use super::common::{ApiError, ApiResult};
use super::models::{DirEntry, RepoDetails};
use super::session::auth_headers;
use super::url::{normalize_server_url, path_segment, querystr, urljoin};

/// How a repository handle authenticates, and therefore which endpoints it uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// The handle's token is an API token issued for this repository alone.
    ByRepoToken,

    /// The handle's token is the account token; the repository is named by ID.
    BySessionToken {
        /// Repository identifier, never empty
        repo_id: String,
    },
}

#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Info,
    Dir,
    File,
    FileDetail,
}

/// Rejects repository IDs that cannot name exactly one repository.
///
/// IDs are percent-encoded when joined, so only the dot segments remain
/// ambiguous.
pub(crate) fn check_repo_id(repo_id: &str) -> ApiResult<()> {
    match repo_id.trim() {
        "" => Err(ApiError::MissingRepoId),
        "." | ".." => Err(ApiError::InvalidRepoId(repo_id.to_string())),
        _ => Ok(()),
    }
}

/// Body for directory and file mutations.
#[derive(Debug, Serialize)]
struct OperationRequest<'a> {
    operation: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    newname: Option<&'a str>,
}

impl<'a> OperationRequest<'a> {
    fn new(operation: &'a str) -> Self {
        Self {
            operation,
            newname: None,
        }
    }

    fn rename(new_name: &'a str) -> Self {
        Self {
            operation: "rename",
            newname: Some(new_name),
        }
    }
}

/// Handle on one repository.
///
/// Handles never change after construction, so independent handles can be
/// used from different tasks without coordination.
///
/// # Example
///
/// ```rust,no_run
/// use seafile_cli::api::Repo;
///
/// # async fn example() -> seafile_cli::api::ApiResult<()> {
/// let repo = Repo::by_repo_token("https://cloud.seafile.com", "repo-api-token")?;
/// repo.create_dir("/reports").await?;
/// repo.create_file("/reports/q1.md").await?;
/// let entries = repo.list_dir("/reports").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Repo {
    server_url: String,
    auth_mode: AuthMode,
    requester: Requester,
}

impl std::fmt::Debug for Repo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repo")
            .field("server_url", &self.server_url)
            .field("auth_mode", &self.auth_mode)
            .finish()
    }
}

impl Repo {
    /// Creates a handle from a per-repository API token.
    pub fn by_repo_token(server_url: &str, repo_token: &str) -> ApiResult<Self> {
        Self::with_http(build_http_client()?, server_url, repo_token, AuthMode::ByRepoToken)
    }

    /// Creates a handle from an account token and a repository ID.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingRepoId`] if `repo_id` is empty.
    pub fn by_session_token(server_url: &str, token: &str, repo_id: &str) -> ApiResult<Self> {
        Self::with_http(
            build_http_client()?,
            server_url,
            token,
            AuthMode::BySessionToken {
                repo_id: repo_id.to_string(),
            },
        )
    }

    pub(crate) fn with_http(
        http: Client,
        server_url: &str,
        token: &str,
        auth_mode: AuthMode,
    ) -> ApiResult<Self> {
        if let AuthMode::BySessionToken { repo_id } = &auth_mode {
            check_repo_id(repo_id)?;
        }

        Ok(Self {
            server_url: normalize_server_url(server_url),
            auth_mode,
            requester: Requester::new(http, auth_headers(token)?),
        })
    }

    pub fn auth_mode(&self) -> &AuthMode {
        &self.auth_mode
    }

    /// Repository ID, for handles addressed by account token.
    pub fn repo_id(&self) -> Option<&str> {
        match &self.auth_mode {
            AuthMode::ByRepoToken => None,
            AuthMode::BySessionToken { repo_id } => Some(repo_id.as_str()),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        match &self.auth_mode {
            AuthMode::ByRepoToken => {
                let leaf = match endpoint {
                    Endpoint::Info => "repo-info",
                    Endpoint::Dir => "dir",
                    Endpoint::File | Endpoint::FileDetail => "file",
                };
                urljoin(&self.server_url, &["api/v2.1/via-repo-token", leaf])
            }
            AuthMode::BySessionToken { repo_id } => {
                let leaf = match endpoint {
                    Endpoint::Info => "",
                    Endpoint::Dir => "dir",
                    Endpoint::File => "file",
                    Endpoint::FileDetail => "file/detail",
                };
                urljoin(&self.server_url, &["api2/repos", &path_segment(repo_id), leaf])
            }
        }
    }

    fn path_param(&self) -> &'static str {
        match self.auth_mode {
            AuthMode::ByRepoToken => "path",
            AuthMode::BySessionToken { .. } => "p",
        }
    }

    fn path_url(&self, endpoint: Endpoint, path: &str) -> String {
        format!(
            "{}{}",
            self.endpoint_url(endpoint),
            querystr([(self.path_param(), path)])
        )
    }

    /// Fetches repository metadata.
    ///
    /// Returns an empty [`RepoDetails`] when the server sends no data.
    pub async fn get_details(&self) -> ApiResult<RepoDetails> {
        let data = self.requester.get(&self.endpoint_url(Endpoint::Info)).await?;
        Ok(data.as_ref().map(RepoDetails::from_value).unwrap_or_default())
    }

    /// Lists the entries of a directory (`"/"` for the repository root).
    ///
    /// Accepts both a bare JSON array and an object with a `dirent_list`
    /// array; anything else yields an empty listing.
    pub async fn list_dir(&self, path: &str) -> ApiResult<Vec<DirEntry>> {
        let data = self.requester.get(&self.path_url(Endpoint::Dir, path)).await?;

        let items = match data {
            Some(Value::Array(items)) => items,
            Some(Value::Object(mut obj)) => match obj.remove("dirent_list") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        Ok(items.into_iter().map(DirEntry::from).collect())
    }

    pub async fn create_dir(&self, path: &str) -> ApiResult<Option<Value>> {
        let url = self.path_url(Endpoint::Dir, path);
        self.requester.post(&url, &OperationRequest::new("mkdir")).await
    }

    pub async fn rename_dir(&self, path: &str, new_name: &str) -> ApiResult<Option<Value>> {
        let url = self.path_url(Endpoint::Dir, path);
        self.requester.post(&url, &OperationRequest::rename(new_name)).await
    }

    pub async fn delete_dir(&self, path: &str) -> ApiResult<Option<Value>> {
        self.requester.delete(&self.path_url(Endpoint::Dir, path)).await
    }

    /// Fetches file metadata.
    pub async fn get_file(&self, path: &str) -> ApiResult<Option<Value>> {
        self.requester.get(&self.path_url(Endpoint::FileDetail, path)).await
    }

    pub async fn create_file(&self, path: &str) -> ApiResult<Option<Value>> {
        let url = self.path_url(Endpoint::File, path);
        self.requester.post(&url, &OperationRequest::new("create")).await
    }

    pub async fn rename_file(&self, path: &str, new_name: &str) -> ApiResult<Option<Value>> {
        let url = self.path_url(Endpoint::File, path);
        self.requester.post(&url, &OperationRequest::rename(new_name)).await
    }

    /// Deletes a file.
    ///
    /// Stock servers answer with `{"success": true, "commit_id": "..."}`.
    pub async fn delete_file(&self, path: &str) -> ApiResult<Option<Value>> {
        self.requester.delete(&self.path_url(Endpoint::File, path)).await
    }
}
