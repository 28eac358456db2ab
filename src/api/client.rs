//
//  seafile-cli
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Seafile API
//!
//! This module provides the entry point of the API layer, [`SeafileClient`],
//! and the small request helper shared with repository handles.
//!
//! ## Features
//!
//! - Account login through a [`Session`]
//! - Repository listing, lookup, creation, and deletion
//! - Repository handles addressed by account token or by per-repository token
//! - Fixed 30 second timeout on every request, no retries
//! - Custom User-Agent header

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::common::{ApiError, ApiResult};
use super::repo::{check_repo_id, AuthMode, Repo};
use super::response::decode;
use super::session::Session;
use super::url::{path_segment, urljoin};

/// Timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the HTTP transport shared by a client and the handles it yields.
pub fn build_http_client() -> ApiResult<Client> {
    Ok(Client::builder()
        .user_agent(format!("sf/{}", crate::VERSION))
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// Sends requests with a fixed set of authentication headers.
///
/// Cloning is cheap: `reqwest::Client` is reference counted internally.
#[derive(Clone)]
pub(crate) struct Requester {
    http: Client,
    headers: HeaderMap,
}

impl Requester {
    pub(crate) fn new(http: Client, headers: HeaderMap) -> Self {
        Self { http, headers }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, %url, "Sending request");
        self.http
            .request(method, url)
            .headers(self.headers.clone())
            .timeout(REQUEST_TIMEOUT)
    }

    pub(crate) async fn get(&self, url: &str) -> ApiResult<Option<Value>> {
        let response = self.request(Method::GET, url).send().await?;
        decode(response).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> ApiResult<Option<Value>> {
        let response = self.post_raw(url, body).await?;
        decode(response).await
    }

    /// Posts without decoding, for callers that inspect the status themselves.
    pub(crate) async fn post_raw<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> ApiResult<Response> {
        Ok(self.request(Method::POST, url).json(body).send().await?)
    }

    pub(crate) async fn delete(&self, url: &str) -> ApiResult<Option<Value>> {
        let response = self.request(Method::DELETE, url).send().await?;
        decode(response).await
    }
}

/// Body of `POST /api2/repos/`. Optional fields are left out, never sent empty.
#[derive(Debug, Serialize)]
struct CreateRepoRequest<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    passwd: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    story_id: Option<&'a str>,
}

/// The main client for the Seafile Web API.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use seafile_cli::api::SeafileClient;
///
/// # async fn example() -> seafile_cli::api::ApiResult<()> {
/// let mut client = SeafileClient::new("https://cloud.seafile.com", "me@example.com", "secret")?;
/// client.authenticate().await?;
///
/// if let Some(repo) = client.create_repository("demo", None, None).await? {
///     repo.create_dir("/notes").await?;
///     for entry in repo.list_dir("/").await? {
///         println!("{}", entry.name().unwrap_or_default());
///     }
/// }
/// # Ok(())
/// # }
/// ```
///
/// # Authentication
///
/// Every repository operation requires a successful
/// [`authenticate`](Self::authenticate) (or a client built with
/// [`with_token`](Self::with_token)); otherwise it fails with
/// [`ApiError::NotAuthenticated`] without sending anything.
#[derive(Debug, Clone)]
pub struct SeafileClient {
    session: Session,
}

impl SeafileClient {
    /// Creates an unauthenticated client for the given server and account.
    pub fn new(server_url: &str, login_name: &str, password: &str) -> ApiResult<Self> {
        Ok(Self {
            session: Session::new(build_http_client()?, server_url, login_name, password),
        })
    }

    /// Creates an authenticated client from a previously issued account token.
    pub fn with_token(server_url: &str, login_name: &str, token: &str) -> ApiResult<Self> {
        Ok(Self {
            session: Session::with_token(build_http_client()?, server_url, login_name, token)?,
        })
    }

    /// Logs in and stores the account token.
    pub async fn authenticate(&mut self) -> ApiResult<()> {
        self.session.authenticate().await
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    pub fn server_url(&self) -> &str {
        self.session.server_url()
    }

    fn requester(&self) -> ApiResult<Requester> {
        let headers = self.session.headers().ok_or(ApiError::NotAuthenticated)?;
        Ok(Requester::new(self.session.http().clone(), headers.clone()))
    }

    fn session_repo(&self, repo_id: &str) -> ApiResult<Repo> {
        let token = self.session.token().ok_or(ApiError::NotAuthenticated)?;
        Repo::with_http(
            self.session.http().clone(),
            self.server_url(),
            token,
            AuthMode::BySessionToken {
                repo_id: repo_id.to_string(),
            },
        )
    }

    /// Lists the repositories visible to the account.
    ///
    /// The decoded JSON is returned as sent by the server (an array of
    /// repository summaries on stock servers).
    pub async fn list_repositories(&self) -> ApiResult<Option<Value>> {
        let requester = self.requester()?;
        let url = urljoin(self.server_url(), &["api2", "repos"]);
        requester.get(&url).await
    }

    /// Looks up a repository by ID.
    ///
    /// Returns `Ok(None)` when the server answers with no data or `404`.
    /// The handle is bound to the ID the server reports.
    ///
    /// The ID is sent as a single percent-encoded path segment; an empty ID or
    /// a dot segment is rejected before any request.
    pub async fn get_repository(&self, repo_id: &str) -> ApiResult<Option<Repo>> {
        let requester = self.requester()?;
        check_repo_id(repo_id)?;
        let url = urljoin(self.server_url(), &["api2", "repos", &path_segment(repo_id)]);

        let data = match requester.get(&url).await {
            Ok(data) => data,
            Err(e) if e.is_not_found() => {
                debug!(repo_id, "Repository not found");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        match data.as_ref().and_then(|d| d.get("id")).and_then(Value::as_str) {
            Some(id) if !id.is_empty() => Ok(Some(self.session_repo(id)?)),
            _ => Ok(None),
        }
    }

    /// Finds the first repository whose name matches exactly.
    pub async fn find_repository(&self, name: &str) -> ApiResult<Option<Repo>> {
        let repos = self.list_repositories().await?;
        let id = repos
            .as_ref()
            .and_then(Value::as_array)
            .and_then(|items| {
                items
                    .iter()
                    .find(|item| item.get("name").and_then(Value::as_str) == Some(name))
            })
            .and_then(|item| item.get("id"))
            .and_then(Value::as_str);

        match id {
            Some(id) => Ok(Some(self.session_repo(id)?)),
            None => Ok(None),
        }
    }

    /// Creates a repository.
    ///
    /// `password` (for an encrypted repository) and `story_id` are sent only
    /// when given and non-empty.
    ///
    /// Returns `Ok(None)` if the server answers anything but `200`, or if the
    /// response does not name the new repository.
    pub async fn create_repository(
        &self,
        name: &str,
        password: Option<&str>,
        story_id: Option<&str>,
    ) -> ApiResult<Option<Repo>> {
        let requester = self.requester()?;
        let url = urljoin(self.server_url(), &["api2", "repos"]);
        let body = CreateRepoRequest {
            name,
            passwd: password.filter(|p| !p.is_empty()),
            story_id: story_id.filter(|s| !s.is_empty()),
        };

        let response = requester.post_raw(&url, &body).await?;
        let status = response.status();
        if status != StatusCode::OK {
            debug!(%status, name, "Repository was not created");
            return Ok(None);
        }

        let data = decode(response).await?;
        match data.as_ref().and_then(|d| d.get("repo_id")).and_then(Value::as_str) {
            Some(id) if !id.is_empty() => Ok(Some(self.session_repo(id)?)),
            _ => Ok(None),
        }
    }

    /// Deletes a repository. Only its owner may do this.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the server refuses the deletion, and
    /// [`ApiError::MissingRepoId`] or [`ApiError::InvalidRepoId`] without
    /// sending anything if the ID is empty or a dot segment.
    pub async fn delete_repository(&self, repo_id: &str) -> ApiResult<()> {
        let requester = self.requester()?;
        check_repo_id(repo_id)?;
        let url = urljoin(self.server_url(), &["api2", "repos", &path_segment(repo_id)]);
        requester.delete(&url).await?;
        Ok(())
    }

    /// Builds a handle for a repository addressed by its own API token.
    ///
    /// Does not require the client to be authenticated.
    pub fn repo_by_token(&self, repo_token: &str) -> ApiResult<Repo> {
        Repo::with_http(
            self.session.http().clone(),
            self.server_url(),
            repo_token,
            AuthMode::ByRepoToken,
        )
    }
}
