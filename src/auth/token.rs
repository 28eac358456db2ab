//
//  seafile-cli
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Token Input Module
//!
//! Reading tokens supplied on standard input, for non-interactive logins:
//!
//! ```bash
//! echo "$SEAFILE_TOKEN" | sf auth login --with-token
//! ```

use anyhow::{bail, Result};

/// Reads the first line of standard input, trimmed.
///
/// # Notes
///
/// - Only the first line is read; subsequent input is ignored.
pub fn read_line_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin.lock().read_line(&mut line)?;

    let line = line.trim().to_string();
    if line.is_empty() {
        bail!("Nothing found on standard input");
    }
    Ok(line)
}

/// Reads a token from the first line of standard input.
pub fn read_token_from_stdin() -> Result<String> {
    let token = read_line_from_stdin()?;
    if !looks_like_token(&token) {
        bail!("Input on standard input is not a token");
    }
    Ok(token)
}

/// Basic format check: non-empty and free of whitespace.
///
/// Length is checked separately for account tokens, since repository API
/// tokens do not share their fixed length.
pub fn looks_like_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}
