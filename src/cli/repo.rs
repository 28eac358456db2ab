//
//  seafile-cli
//  cli/repo.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository commands for the Seafile CLI.
//!
//! This module provides repository (library) management:
//! - Listing the repositories visible to the account
//! - Viewing repository details
//! - Creating and deleting repositories
//! - Showing how the selected repository is addressed

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use super::GlobalOptions;
use crate::api::{AuthMode, RepoDetails};
use crate::config::Config;
use crate::context::ContextResolver;
use crate::interactive::{prompt_confirm_with_default, prompt_password_confirm};
use crate::output::{print_field, print_header, OutputFormat, OutputWriter, TableBuilder, TableOutput};
use crate::util::{format_relative_time, format_size, truncate};

/// Manage repositories
#[derive(Args, Debug)]
pub struct RepoCommand {
    #[command(subcommand)]
    pub command: RepoSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories
    #[command(visible_alias = "ls")]
    List,

    /// View repository details
    View(ViewArgs),

    /// Create a new repository
    Create(CreateArgs),

    /// Delete a repository
    Delete(DeleteArgs),

    /// Show how the selected repository is addressed
    Info,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Repository ID, name, or alias (defaults to --repo)
    #[arg(value_name = "REPO")]
    pub target: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Repository name
    pub name: String,

    /// Encrypt the repository; prompts for the password
    #[arg(long, short = 'e')]
    pub encrypted: bool,

    /// Story ID to attach the repository to
    #[arg(long)]
    pub story_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Repository ID, name, or alias
    #[arg(value_name = "REPO")]
    pub target: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Display format for repository listings
#[derive(Debug, Serialize)]
#[serde(transparent)]
struct RepoList(Vec<RepoDetails>);

impl TableOutput for RepoList {
    fn print_table(&self, color: bool) {
        if self.0.is_empty() {
            println!("No repositories found");
            return;
        }

        TableBuilder::new()
            .color(color)
            .headers(["ID", "Name", "Size", "Modified"])
            .rows(self.0.iter().map(|r| {
                [
                    r.repo_id.clone().unwrap_or_default(),
                    truncate(r.repo_name.as_deref().unwrap_or("-"), 40),
                    r.size.map(format_size).unwrap_or_else(|| "-".to_string()),
                    modified(r),
                ]
            }))
            .print();
    }
}

impl TableOutput for RepoDetails {
    fn print_table(&self, color: bool) {
        print_header(self.repo_name.as_deref().unwrap_or("(unnamed repository)"));
        println!();

        if let Some(id) = &self.repo_id {
            print_field("ID", id, color);
        }
        if let Some(size) = self.size {
            print_field("Size", &format_size(size), color);
        }
        if let Some(count) = self.file_count {
            print_field("Files", &count.to_string(), color);
        }
        if self.last_modified.is_some() {
            print_field("Modified", &modified(self), color);
        }
    }
}

/// Relative modification time, falling back to the raw value.
fn modified(details: &RepoDetails) -> String {
    match details.last_modified.as_deref() {
        Some(raw) => chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| format_relative_time(dt.timestamp()))
            .unwrap_or_else(|_| raw.to_string()),
        None => "-".to_string(),
    }
}

/// Display format for `sf repo info`
#[derive(Debug, Serialize)]
struct RepoAddress {
    server_url: String,
    mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    repo_id: Option<String>,
}

impl TableOutput for RepoAddress {
    fn print_table(&self, color: bool) {
        print_field("Server", &self.server_url, color);
        print_field("Mode", self.mode, color);
        if let Some(id) = &self.repo_id {
            print_field("Repository ID", id, color);
        }
    }
}

impl RepoCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let resolver = ContextResolver::new(Config::load()?);
        let output = OutputWriter::new(OutputFormat::from_json_flag(global.json));

        match &self.command {
            RepoSubcommand::List => self.list(&resolver, &output, global).await,
            RepoSubcommand::View(args) => self.view(args, &resolver, &output, global).await,
            RepoSubcommand::Create(args) => self.create(args, &resolver, &output, global).await,
            RepoSubcommand::Delete(args) => self.delete(args, &resolver, &output, global).await,
            RepoSubcommand::Info => self.info(&resolver, &output, global).await,
        }
    }

    /// List repositories
    async fn list(
        &self,
        resolver: &ContextResolver,
        output: &OutputWriter,
        global: &GlobalOptions,
    ) -> Result<()> {
        let client = resolver.client(global)?;
        let listing = client
            .list_repositories()
            .await
            .context("Failed to list repositories")?;

        let repos = listing
            .as_ref()
            .map(RepoDetails::list_from_value)
            .unwrap_or_default();
        output.write(&RepoList(repos))
    }

    /// View repository details
    async fn view(
        &self,
        args: &ViewArgs,
        resolver: &ContextResolver,
        output: &OutputWriter,
        global: &GlobalOptions,
    ) -> Result<()> {
        let repo = match &args.target {
            Some(name) => resolver.lookup(&resolver.client(global)?, name).await?,
            None => resolver.open_repo(global).await?,
        };

        let details = repo
            .get_details()
            .await
            .context("Failed to fetch repository details")?;
        output.write(&details)
    }

    /// Create a repository
    async fn create(
        &self,
        args: &CreateArgs,
        resolver: &ContextResolver,
        output: &OutputWriter,
        global: &GlobalOptions,
    ) -> Result<()> {
        let client = resolver.client(global)?;

        let password = if args.encrypted {
            if !resolver.prompts_allowed(global) {
                bail!("Encrypted repositories need an interactive terminal for the password");
            }
            Some(prompt_password_confirm("Repository password")?)
        } else {
            None
        };

        let repo = client
            .create_repository(&args.name, password.as_deref(), args.story_id.as_deref())
            .await
            .context("Failed to create repository")?
            .ok_or_else(|| anyhow::anyhow!("Server did not create repository '{}'", args.name))?;

        let id = repo.repo_id().unwrap_or_default();
        if output.is_json() {
            crate::output::write_json(&serde_json::json!({ "repo_id": id, "name": args.name }))?;
        } else {
            output.write_success(&format!("Created repository {} ({})", args.name, id));
        }

        Ok(())
    }

    /// Delete a repository
    async fn delete(
        &self,
        args: &DeleteArgs,
        resolver: &ContextResolver,
        output: &OutputWriter,
        global: &GlobalOptions,
    ) -> Result<()> {
        let client = resolver.client(global)?;
        let repo = resolver.lookup(&client, &args.target).await?;
        let id = repo
            .repo_id()
            .context("Repository handle has no ID")?
            .to_string();

        if !args.yes {
            if !resolver.prompts_allowed(global) {
                bail!("Refusing to delete without confirmation. Pass --yes to confirm");
            }
            let confirmed = prompt_confirm_with_default(
                &format!(
                    "Are you sure you want to delete {}? This cannot be undone!",
                    args.target
                ),
                false,
            )?;
            if !confirmed {
                println!("Cancelled.");
                return Ok(());
            }
        }

        client
            .delete_repository(&id)
            .await
            .with_context(|| format!("Failed to delete repository {}", args.target))?;

        output.write_success(&format!("Deleted repository {}", args.target));
        Ok(())
    }

    /// Show how the selected repository is addressed
    async fn info(
        &self,
        resolver: &ContextResolver,
        output: &OutputWriter,
        global: &GlobalOptions,
    ) -> Result<()> {
        let repo = resolver.open_repo(global).await?;

        let address = RepoAddress {
            server_url: repo.server_url().to_string(),
            mode: match repo.auth_mode() {
                AuthMode::ByRepoToken => "repository token",
                AuthMode::BySessionToken { .. } => "account token",
            },
            repo_id: repo.repo_id().map(str::to_string),
        };
        output.write(&address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modified_falls_back_to_raw() {
        let details = RepoDetails {
            last_modified: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert_eq!(modified(&details), "yesterday");
        assert_eq!(modified(&RepoDetails::default()), "-");
    }

    #[test]
    fn test_repo_list_serializes_as_array() {
        let list = RepoList(vec![RepoDetails {
            repo_id: Some("abc".to_string()),
            ..Default::default()
        }]);
        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            serde_json::json!([{"repo_id": "abc"}])
        );
    }
}
