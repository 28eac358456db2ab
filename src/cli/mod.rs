//
//  seafile-cli
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod completion;
mod config;
mod dir;
mod file;
mod repo;

pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use dir::DirCommand;
pub use file::FileCommand;
pub use repo::RepoCommand;

use clap::{Parser, Subcommand};

/// Seafile CLI - Work with Seafile libraries from the command line
#[derive(Parser, Debug)]
#[command(
    name = "sf",
    version,
    about = "Work with Seafile from the command line",
    long_about = "sf is a CLI for the Seafile Web API.\n\n\
                  It manages libraries (repositories), directories, and files using an\n\
                  account token or a per-library API token.",
    propagate_version = true,
    after_help = "Use 'sf <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Seafile server URL, e.g. https://cloud.seafile.com
    #[arg(long, short = 's', global = true, env = "SEAFILE_SERVER")]
    pub server: Option<String>,

    /// Account login name (usually an email address)
    #[arg(long, short = 'u', global = true, env = "SEAFILE_USER")]
    pub user: Option<String>,

    /// Repository ID, name, or alias
    #[arg(long, short = 'R', global = true, env = "SEAFILE_REPO")]
    pub repo: Option<String>,

    /// Per-repository API token; no login needed
    #[arg(long, global = true, env = "SEAFILE_REPO_TOKEN", hide_env_values = true)]
    pub repo_token: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "SF_NO_PROMPT")]
    pub no_prompt: bool,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authenticate with a Seafile server
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Manage repositories (libraries)
    #[command(visible_alias = "r")]
    Repo(RepoCommand),

    /// Manage directories in a repository
    Dir(DirCommand),

    /// Manage files in a repository
    File(FileCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from([
            "sf",
            "--server",
            "https://x.com",
            "--repo",
            "notes",
            "--json",
            "dir",
            "ls",
            "/docs",
        ])
        .unwrap();

        assert_eq!(cli.global.server.as_deref(), Some("https://x.com"));
        assert_eq!(cli.global.repo.as_deref(), Some("notes"));
        assert!(cli.global.json);
        assert!(matches!(cli.command, Commands::Dir(_)));
    }
}
