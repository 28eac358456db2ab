//
//  seafile-cli
//  cli/dir.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Directory commands for the Seafile CLI.
//!
//! All commands act on the repository selected with `--repo` or
//! `--repo-token`. Paths are absolute within the repository; `/` is the root.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;

use super::GlobalOptions;
use crate::api::DirEntry;
use crate::config::Config;
use crate::context::ContextResolver;
use crate::interactive::prompt_confirm_with_default;
use crate::output::{format_kind, write_json, OutputFormat, OutputWriter, TableBuilder, TableOutput};
use crate::util::{format_relative_time, format_size, normalize_remote_path};

/// Manage directories in a repository
#[derive(Args, Debug)]
pub struct DirCommand {
    #[command(subcommand)]
    pub command: DirSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum DirSubcommand {
    /// List a directory
    #[command(visible_alias = "list")]
    Ls {
        /// Directory path
        #[arg(default_value = "/")]
        path: String,
    },

    /// Create a directory
    Mkdir {
        /// Directory path
        path: String,
    },

    /// Rename a directory
    #[command(visible_alias = "mv")]
    Rename {
        /// Directory path
        path: String,

        /// New name (not a path)
        new_name: String,
    },

    /// Delete a directory and everything in it
    #[command(visible_alias = "delete")]
    Rm(RmArgs),
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// Directory path
    pub path: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Display format for directory listings
#[derive(Debug, Serialize)]
#[serde(transparent)]
struct DirListing(Vec<DirEntry>);

impl TableOutput for DirListing {
    fn print_table(&self, color: bool) {
        if self.0.is_empty() {
            println!("Directory is empty");
            return;
        }

        TableBuilder::new()
            .color(color)
            .headers(["Name", "Type", "Size", "Modified"])
            .rows(self.0.iter().map(|entry| {
                [
                    entry.name().unwrap_or("-").to_string(),
                    format_kind(entry.kind().unwrap_or("-"), color),
                    match entry.size() {
                        Some(size) if !entry.is_dir() => format_size(size),
                        _ => "-".to_string(),
                    },
                    entry
                        .mtime()
                        .map(format_relative_time)
                        .unwrap_or_else(|| "-".to_string()),
                ]
            }))
            .print();
    }
}

/// Prints a mutation result: the server's JSON in `--json` mode, a success line otherwise.
pub(super) fn report(output: &OutputWriter, result: Option<Value>, message: &str) -> Result<()> {
    if output.is_json() {
        write_json(&result.unwrap_or_else(|| serde_json::json!({ "success": true })))?;
    } else {
        output.write_success(message);
    }
    Ok(())
}

/// Asks before a deletion unless `--yes` was given.
pub(super) fn confirm_delete(
    resolver: &ContextResolver,
    global: &GlobalOptions,
    yes: bool,
    what: &str,
) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !resolver.prompts_allowed(global) {
        bail!("Refusing to delete without confirmation. Pass --yes to confirm");
    }
    prompt_confirm_with_default(&format!("Delete {}?", what), false)
}

impl DirCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let resolver = ContextResolver::new(Config::load()?);
        let output = OutputWriter::new(OutputFormat::from_json_flag(global.json));
        let repo = resolver.open_repo(global).await?;

        match &self.command {
            DirSubcommand::Ls { path } => {
                let path = normalize_remote_path(path);
                let entries = repo
                    .list_dir(&path)
                    .await
                    .with_context(|| format!("Failed to list {}", path))?;
                output.write(&DirListing(entries))
            }
            DirSubcommand::Mkdir { path } => {
                let path = normalize_remote_path(path);
                if path == "/" {
                    bail!("The repository root already exists");
                }
                let result = repo
                    .create_dir(&path)
                    .await
                    .with_context(|| format!("Failed to create {}", path))?;
                report(&output, result, &format!("Created directory {}", path))
            }
            DirSubcommand::Rename { path, new_name } => {
                let path = normalize_remote_path(path);
                check_new_name(new_name)?;
                let result = repo
                    .rename_dir(&path, new_name)
                    .await
                    .with_context(|| format!("Failed to rename {}", path))?;
                report(&output, result, &format!("Renamed {} to {}", path, new_name))
            }
            DirSubcommand::Rm(args) => {
                let path = normalize_remote_path(&args.path);
                if path == "/" {
                    bail!("Refusing to delete the repository root");
                }
                if !confirm_delete(&resolver, global, args.yes, &path)? {
                    println!("Cancelled.");
                    return Ok(());
                }
                let result = repo
                    .delete_dir(&path)
                    .await
                    .with_context(|| format!("Failed to delete {}", path))?;
                report(&output, result, &format!("Deleted directory {}", path))
            }
        }
    }
}

/// New names are plain names; moving between directories is not supported.
pub(super) fn check_new_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains('/') {
        bail!("New name must be a plain name without '/'");
    }
    Ok(())
}
