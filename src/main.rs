//
//  seafile-cli
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use seafile_cli::api::ApiError;
use seafile_cli::cli::{Cli, Commands};
use seafile_cli::context::ContextError;
use seafile_cli::exit_codes;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("SF_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Maps an error chain to a process exit code.
fn exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(api) = cause.downcast_ref::<ApiError>() {
            return match api {
                ApiError::AuthFailed(_) | ApiError::NotAuthenticated => exit_codes::AUTH_ERROR,
                ApiError::Http { status: 401 | 403, .. } => exit_codes::AUTH_ERROR,
                ApiError::Http { status: 404, .. } => exit_codes::NOT_FOUND,
                _ => exit_codes::ERROR,
            };
        }
        if let Some(ctx) = cause.downcast_ref::<ContextError>() {
            return match ctx {
                ContextError::NotLoggedIn(_) => exit_codes::AUTH_ERROR,
                ContextError::RepoNotFound(_) => exit_codes::NOT_FOUND,
                _ => exit_codes::ERROR,
            };
        }
    }
    exit_codes::ERROR
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Auth(cmd) => cmd.run(&cli.global).await,
        Commands::Repo(cmd) => cmd.run(&cli.global).await,
        Commands::Dir(cmd) => cmd.run(&cli.global).await,
        Commands::File(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", seafile_cli::APP_NAME, seafile_cli::VERSION);
            Ok(())
        }
    }
}
