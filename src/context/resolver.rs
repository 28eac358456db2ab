//
//  seafile-cli
//  context/resolver.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Resolution of global options into API clients and repository handles.

use anyhow::Result;
use tracing::debug;

use super::{ContextError, RepoSelector};
use crate::api::url::normalize_server_url;
use crate::api::{Repo, RepoDetails, SeafileClient};
use crate::auth::{repo_token_key, session_key, KeyringStore};
use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::interactive::{prompts_allowed, select};
use crate::util::is_repo_id;

pub struct ContextResolver {
    config: Config,
    keyring: KeyringStore,
}

impl ContextResolver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            keyring: KeyringStore::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn keyring(&self) -> &KeyringStore {
        &self.keyring
    }

    /// Server URL from `--server`/`SEAFILE_SERVER`, then the config file.
    pub fn server_url(&self, options: &GlobalOptions) -> Result<String, ContextError> {
        options
            .server
            .as_deref()
            .or(self.config.core.server_url.as_deref())
            .map(normalize_server_url)
            .filter(|url| !url.is_empty())
            .ok_or(ContextError::NoServer)
    }

    /// Login name from `--user`/`SEAFILE_USER`, then the config file.
    pub fn login_name(&self, options: &GlobalOptions) -> Option<String> {
        options
            .user
            .clone()
            .or_else(|| self.config.core.login_name.clone())
            .filter(|name| !name.is_empty())
    }

    pub fn prompts_allowed(&self, options: &GlobalOptions) -> bool {
        prompts_allowed(options.no_prompt, self.config.prompt_enabled())
    }

    /// Classifies a `--repo` argument after alias expansion.
    pub fn parse_repo_arg(&self, repo: &str) -> RepoSelector {
        let repo = self.config.resolve_alias(repo.trim());
        if is_repo_id(repo) {
            RepoSelector::Id(repo.to_string())
        } else {
            RepoSelector::Name(repo.to_string())
        }
    }

    /// Builds an authenticated client from the stored account token.
    pub fn client(&self, options: &GlobalOptions) -> Result<SeafileClient> {
        let server = self.server_url(options)?;
        let token = self
            .keyring
            .get(&session_key(&server))?
            .ok_or_else(|| ContextError::NotLoggedIn(server.clone()))?;
        let login_name = self.login_name(options).unwrap_or_default();

        Ok(SeafileClient::with_token(&server, &login_name, &token)?)
    }

    /// Opens the repository a command should act on.
    ///
    /// A repository API token (from `--repo-token` or stored for the named
    /// repository) takes precedence over the account token.
    pub async fn open_repo(&self, options: &GlobalOptions) -> Result<Repo> {
        let server = self.server_url(options)?;

        if let Some(token) = options.repo_token.as_deref().filter(|t| !t.is_empty()) {
            debug!("Using repository token from options");
            return Ok(Repo::by_repo_token(&server, token)?);
        }

        if let Some(repo) = &options.repo {
            if let Some(token) = self.keyring.get(&repo_token_key(&server, repo))? {
                debug!(repo = %repo, "Using stored repository token");
                return Ok(Repo::by_repo_token(&server, &token)?);
            }

            let client = self.client(options)?;
            return self.lookup(&client, repo).await;
        }

        if self.prompts_allowed(options) {
            let client = self.client(options)?;
            return self.pick(&client).await;
        }

        Err(ContextError::NoRepo.into())
    }

    /// Finds a repository by alias, ID, or name.
    pub async fn lookup(&self, client: &SeafileClient, repo: &str) -> Result<Repo> {
        let found = match self.parse_repo_arg(repo) {
            RepoSelector::Id(id) => client.get_repository(&id).await?,
            RepoSelector::Name(name) => client.find_repository(&name).await?,
        };
        found.ok_or_else(|| ContextError::RepoNotFound(repo.to_string()).into())
    }

    async fn pick(&self, client: &SeafileClient) -> Result<Repo> {
        let listing = client.list_repositories().await?;
        let repos: Vec<RepoDetails> = listing
            .as_ref()
            .map(RepoDetails::list_from_value)
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.repo_id.is_some())
            .collect();

        let names: Vec<String> = repos
            .iter()
            .map(|r| r.repo_name.clone().unwrap_or_else(|| "(unnamed)".to_string()))
            .collect();
        let idx = select("Select repository", &names)?;

        let id = repos[idx].repo_id.as_deref().unwrap_or_default();
        client
            .get_repository(id)
            .await?
            .ok_or_else(|| ContextError::RepoNotFound(names[idx].clone()).into())
    }
}
