//
//  seafile-cli
//  cli/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! File commands for the Seafile CLI.
//!
//! Metadata and namespace operations only; file contents are not
//! transferred.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use serde_json::Value;

use super::dir::{check_new_name, confirm_delete, report};
use super::GlobalOptions;
use crate::config::Config;
use crate::context::ContextResolver;
use crate::output::{print_field, write_json, OutputFormat, OutputWriter};
use crate::util::{format_size, format_time, normalize_remote_path};

/// Manage files in a repository
#[derive(Args, Debug)]
pub struct FileCommand {
    #[command(subcommand)]
    pub command: FileSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum FileSubcommand {
    /// Show file metadata
    #[command(visible_alias = "view")]
    Info {
        /// File path
        path: String,
    },

    /// Create an empty file
    #[command(visible_alias = "touch")]
    Create {
        /// File path
        path: String,
    },

    /// Rename a file
    #[command(visible_alias = "mv")]
    Rename {
        /// File path
        path: String,

        /// New name (not a path)
        new_name: String,
    },

    /// Delete a file
    #[command(visible_alias = "delete")]
    Rm(RmArgs),
}

#[derive(Args, Debug)]
pub struct RmArgs {
    /// File path
    pub path: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

impl FileCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let resolver = ContextResolver::new(Config::load()?);
        let output = OutputWriter::new(OutputFormat::from_json_flag(global.json));
        let repo = resolver.open_repo(global).await?;

        match &self.command {
            FileSubcommand::Info { path } => {
                let path = file_path(path)?;
                let detail = repo
                    .get_file(&path)
                    .await
                    .with_context(|| format!("Failed to fetch {}", path))?
                    .ok_or_else(|| anyhow::anyhow!("No metadata returned for {}", path))?;

                if output.is_json() {
                    write_json(&detail)?;
                } else {
                    print_file_detail(&path, &detail, output.color_enabled());
                }
                Ok(())
            }
            FileSubcommand::Create { path } => {
                let path = file_path(path)?;
                let result = repo
                    .create_file(&path)
                    .await
                    .with_context(|| format!("Failed to create {}", path))?;
                report(&output, result, &format!("Created file {}", path))
            }
            FileSubcommand::Rename { path, new_name } => {
                let path = file_path(path)?;
                check_new_name(new_name)?;
                let result = repo
                    .rename_file(&path, new_name)
                    .await
                    .with_context(|| format!("Failed to rename {}", path))?;
                report(&output, result, &format!("Renamed {} to {}", path, new_name))
            }
            FileSubcommand::Rm(args) => {
                let path = file_path(&args.path)?;
                if !confirm_delete(&resolver, global, args.yes, &path)? {
                    println!("Cancelled.");
                    return Ok(());
                }
                let result = repo
                    .delete_file(&path)
                    .await
                    .with_context(|| format!("Failed to delete {}", path))?;
                report(&output, result, &format!("Deleted file {}", path))
            }
        }
    }
}

/// Normalizes a file path; the repository root is not a file.
fn file_path(path: &str) -> Result<String> {
    let path = normalize_remote_path(path);
    if path == "/" {
        bail!("A file path is required");
    }
    Ok(path)
}

fn print_file_detail(path: &str, detail: &Value, color: bool) {
    print_field("Path", path, color);
    if let Some(name) = detail.get("name").and_then(Value::as_str) {
        print_field("Name", name, color);
    }
    if let Some(size) = detail.get("size").and_then(Value::as_u64) {
        print_field("Size", &format_size(size), color);
    }
    if let Some(mtime) = detail.get("mtime").and_then(Value::as_i64) {
        print_field("Modified", &format_time(mtime), color);
    }
    if let Some(modifier) = detail
        .get("last_modifier_name")
        .or_else(|| detail.get("last_modifier_email"))
        .and_then(Value::as_str)
    {
        print_field("Modified by", modifier, color);
    }
    if let Some(id) = detail.get("id").and_then(Value::as_str) {
        print_field("Object ID", id, color);
    }
}
