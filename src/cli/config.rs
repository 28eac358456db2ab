//
//  seafile-cli
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Configuration commands for the Seafile CLI.
//!
//! Reads and writes the `[core]` settings and `[aliases]` table of the
//! configuration file. Tokens are managed by `sf auth`, never here.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use serde_json::json;

use crate::config::{Config, CONFIG_KEYS};
use crate::output::{write_json, TableBuilder};

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print the value of a configuration key
    Get(GetArgs),

    /// Set a configuration key
    Set(SetArgs),

    /// Reset a configuration key to its default
    Unset(GetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Print the configuration file path
    Path,

    /// Manage repository aliases
    Alias(AliasArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key (server_url, login_name, prompt)
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key (server_url, login_name, prompt)
    pub key: String,

    /// New value
    pub value: String,
}

#[derive(Args, Debug)]
pub struct AliasArgs {
    #[command(subcommand)]
    pub command: AliasSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AliasSubcommand {
    /// Map a short name to a repository ID
    Set {
        /// Alias name
        name: String,

        /// Repository ID
        repo_id: String,
    },

    /// Remove an alias
    #[command(visible_alias = "rm")]
    Delete {
        /// Alias name
        name: String,
    },

    /// List aliases
    #[command(visible_alias = "ls")]
    List,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::Unset(args) => self.unset(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
            ConfigSubcommand::Alias(args) => self.alias(args, global),
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        check_key(&args.key)?;
        let config = Config::load()?;
        let value = config.get(&args.key);

        if global.json {
            write_json(&json!({ "key": args.key, "value": value }))?;
        } else if let Some(v) = value {
            println!("{}", v);
        }

        Ok(())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        check_key(&args.key)?;

        if args.key == "server_url"
            && !(args.value.starts_with("http://") || args.value.starts_with("https://"))
        {
            bail!("Invalid value for server_url. Expected an http:// or https:// URL");
        }

        let mut config = Config::load()?;
        config.set(&args.key, args.value.clone())?;
        config.save()?;

        let stored = config.get(&args.key).unwrap_or_default();
        if global.json {
            write_json(&json!({ "success": true, "key": args.key, "value": stored }))?;
        } else {
            println!("{} Set {} = {}", style("✓").green(), style(&args.key).cyan(), stored);
        }

        Ok(())
    }

    fn unset(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        check_key(&args.key)?;

        let mut config = Config::load()?;
        config.unset(&args.key);
        config.save()?;

        if global.json {
            write_json(&json!({ "success": true, "key": args.key }))?;
        } else {
            println!("{} Unset {}", style("✓").green(), style(&args.key).cyan());
        }

        Ok(())
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;

        if global.json {
            write_json(&config)?;
            return Ok(());
        }

        for key in CONFIG_KEYS {
            let value = config.get(key).unwrap_or_default();
            println!("{}={}", key, value);
        }
        if !config.aliases.is_empty() {
            println!();
            for (name, repo_id) in &config.aliases {
                println!("alias.{}={}", name, repo_id);
            }
        }

        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = Config::config_path()?;

        if global.json {
            write_json(&json!({ "path": path.display().to_string() }))?;
        } else {
            println!("{}", path.display());
        }

        Ok(())
    }

    fn alias(&self, args: &AliasArgs, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;

        match &args.command {
            AliasSubcommand::Set { name, repo_id } => {
                config.aliases.insert(name.clone(), repo_id.clone());
                config.save()?;
                if !global.json {
                    println!("{} Added alias {} → {}", style("✓").green(), style(name).cyan(), repo_id);
                }
            }
            AliasSubcommand::Delete { name } => {
                if config.aliases.remove(name).is_none() {
                    bail!("No alias named '{}'", name);
                }
                config.save()?;
                if !global.json {
                    println!("{} Deleted alias {}", style("✓").green(), style(name).cyan());
                }
            }
            AliasSubcommand::List => {
                if global.json {
                    write_json(&config.aliases)?;
                } else if config.aliases.is_empty() {
                    println!("No aliases configured");
                } else {
                    TableBuilder::new()
                        .headers(["Alias", "Repository ID"])
                        .rows(config.aliases.iter().map(|(k, v)| [k.clone(), v.clone()]))
                        .print();
                }
            }
        }

        Ok(())
    }
}

fn check_key(key: &str) -> Result<()> {
    if !CONFIG_KEYS.contains(&key) {
        bail!(
            "Unknown configuration key '{}'. Valid keys: {}",
            key,
            CONFIG_KEYS.join(", ")
        );
    }
    Ok(())
}
