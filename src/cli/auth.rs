//
//  seafile-cli
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands for the Seafile CLI.
//!
//! Logging in exchanges a login name and password for an account token,
//! which is kept in the system keyring. Per-repository API tokens can be
//! stored alongside it with `sf auth token --for <REPO> --set`.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use crate::api::SeafileClient;
use crate::auth::{read_line_from_stdin, read_token_from_stdin, repo_token_key, session_key};
use crate::config::Config;
use crate::context::ContextResolver;
use crate::interactive::{
    prompt_confirm_with_default, prompt_input, prompt_input_with_default, prompt_password,
};
use crate::output::{print_field, OutputFormat, OutputWriter};

use super::GlobalOptions;

/// Authenticate with a Seafile server.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Log in with a login name and password
    Login(LoginArgs),

    /// Log out and forget the stored account token
    Logout,

    /// View authentication status
    Status(StatusArgs),

    /// Print, store, or clear a token
    Token(TokenArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read an existing account token from standard input instead of logging in
    #[arg(long, conflicts_with = "password_stdin")]
    pub with_token: bool,

    /// Read the password from standard input
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show the authentication token (masked)
    #[arg(long, short = 't')]
    pub show_token: bool,
}

#[derive(Args, Debug)]
pub struct TokenArgs {
    /// Read a repository API token from standard input and store it
    #[arg(long, requires = "repo_name", conflicts_with = "clear")]
    pub set: bool,

    /// Forget the stored repository token
    #[arg(long, requires = "repo_name")]
    pub clear: bool,

    /// Repository the token belongs to
    #[arg(long = "for", id = "repo_name", value_name = "REPO")]
    pub repo_name: Option<String>,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global),
            AuthSubcommand::Status(args) => status(args, global).await,
            AuthSubcommand::Token(args) => token(args, global),
        }
    }
}

/// Performs the login flow.
async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    let resolver = ContextResolver::new(config.clone());
    let interactive = resolver.prompts_allowed(global);
    let output = OutputWriter::new(OutputFormat::from_json_flag(global.json));

    let server = match resolver.server_url(global) {
        Ok(server) => server,
        Err(_) if interactive => {
            let input = prompt_input_with_default("Seafile server URL", Some("https://cloud.seafile.com"))?;
            crate::api::url::normalize_server_url(&input)
        }
        Err(e) => return Err(e.into()),
    };

    let login_name = match resolver.login_name(global) {
        Some(name) => name,
        None if interactive => prompt_input("Login name")?,
        None => bail!("Login name required. Use --user or SEAFILE_USER"),
    };

    let keyring = resolver.keyring();
    let key = session_key(&server);

    if interactive && !args.with_token && keyring.get(&key)?.is_some() {
        output.write_info(&format!("Already logged in to {}", server));
        if !prompt_confirm_with_default("Re-authenticate?", false)? {
            return Ok(());
        }
    }

    let client = if args.with_token {
        let token = read_token_from_stdin()?;
        SeafileClient::with_token(&server, &login_name, &token)
            .context("Token is not a valid account token")?
    } else {
        let password = if args.password_stdin {
            read_line_from_stdin().context("No password found on standard input")?
        } else if interactive {
            prompt_password("Password")?
        } else {
            bail!("Password required. Use --password-stdin or --with-token");
        };

        let mut client = SeafileClient::new(&server, &login_name, &password)?;
        client
            .authenticate()
            .await
            .with_context(|| format!("Failed to log in to {}", server))?;
        client
    };

    let token = client
        .token()
        .context("Server did not issue an account token")?;
    keyring.store(&key, token)?;

    config.set("server_url", server.clone())?;
    config.set("login_name", login_name.clone())?;
    config.save()?;

    output.write_success(&format!("Logged in to {} as {}", server, login_name));
    Ok(())
}

/// Performs logout.
fn logout(global: &GlobalOptions) -> Result<()> {
    let resolver = ContextResolver::new(Config::load()?);
    let output = OutputWriter::new(OutputFormat::from_json_flag(global.json));
    let server = resolver.server_url(global)?;

    resolver.keyring().delete(&session_key(&server))?;
    output.write_success(&format!("Logged out of {}", server));
    Ok(())
}

/// Shows authentication status.
async fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let resolver = ContextResolver::new(Config::load()?);
    let color = console::colors_enabled();

    let server = match resolver.server_url(global) {
        Ok(server) => server,
        Err(_) => {
            println!("Not logged in to any Seafile server");
            println!();
            println!("Run 'sf auth login' to authenticate");
            return Ok(());
        }
    };

    let token = resolver.keyring().get(&session_key(&server))?;

    let state = match &token {
        Some(_) => match resolver.client(global) {
            Ok(client) => match client.list_repositories().await {
                Ok(_) => "Active",
                Err(_) => "Invalid/Expired",
            },
            Err(_) => "Invalid/Expired",
        },
        None => "Not logged in",
    };

    println!("{}", server);
    if let Some(name) = resolver.login_name(global) {
        print_field("  Logged in as", &name, color);
    }
    print_field("  Status", state, color);

    if args.show_token {
        if let Some(t) = &token {
            print_field("  Token", &mask_token(t), color);
        }
    }

    Ok(())
}

/// Prints, stores, or clears a token.
fn token(args: &TokenArgs, global: &GlobalOptions) -> Result<()> {
    let resolver = ContextResolver::new(Config::load()?);
    let keyring = resolver.keyring();
    let output = OutputWriter::new(OutputFormat::from_json_flag(global.json));

    let server = resolver.server_url(global)?;

    if let Some(repo) = &args.repo_name {
        let key = repo_token_key(&server, repo);

        if args.set {
            let token = read_token_from_stdin()?;
            keyring.store(&key, &token)?;
            output.write_success(&format!("Stored repository token for {} on {}", repo, server));
        } else if args.clear {
            keyring.delete(&key)?;
            output.write_success(&format!("Removed repository token for {}", repo));
        } else {
            let token = keyring
                .get(&key)?
                .ok_or_else(|| anyhow::anyhow!("No token stored for repository {}", repo))?;
            println!("{}", token);
        }
        return Ok(());
    }

    let token = keyring
        .get(&session_key(&server))?
        .ok_or_else(|| anyhow::anyhow!("No token found for {}", server))?;

    // Just the token, for piping to other commands
    println!("{}", token);

    Ok(())
}

/// Masks a token for display (shows first and last 4 characters).
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
