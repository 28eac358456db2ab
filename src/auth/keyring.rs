//
//  seafile-cli
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Credential Storage Module
//!
//! Stores account and repository tokens in the system's native keyring.
//!
//! ## Platform Support
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! - **Service**: Application identifier (`seafile-cli`)
//! - **Key**: the server URL for account tokens, `repo-token:<server>:<repo>`
//!   for per-repository API tokens
//! - **Value**: the token itself
//!
//! ## Example
//!
//! ```rust,no_run
//! use seafile_cli::auth::{session_key, KeyringStore};
//!
//! fn manage_credentials() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     let key = session_key("https://cloud.seafile.com");
//!
//!     store.store(&key, "0123456789abcdef0123456789abcdef01234567")?;
//!     if let Some(token) = store.get(&key)? {
//!         println!("Found stored token ({} characters)", token.len());
//!     }
//!     store.delete(&key)?;
//!
//!     Ok(())
//! }
//! ```

use anyhow::Result;
use keyring::Entry;

use crate::api::url::normalize_server_url;

/// The service name used to identify this application in the system keyring.
const SERVICE_NAME: &str = "seafile-cli";

/// Keyring key for the account token of a server.
///
/// Trailing slashes are ignored so `https://x.com/` and `https://x.com`
/// share one entry.
pub fn session_key(server_url: &str) -> String {
    normalize_server_url(server_url)
}

/// Keyring key for a per-repository API token.
///
/// Scoped to the server, so a repository name reused on another server does
/// not pick up this token.
pub fn repo_token_key(server_url: &str, repo: &str) -> String {
    format!("repo-token:{}:{}", normalize_server_url(server_url), repo)
}

/// Secure credential storage using the system's native keyring service.
///
/// # Notes
///
/// - The keyring may require user interaction (password, biometrics) on first access.
/// - On Linux, a secret service daemon (GNOME Keyring, KWallet) must be running.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Creates a store. No keyring access occurs until a method is called.
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Stores a token, replacing any existing entry under the same key.
    pub fn store(&self, key: &str, token: &str) -> Result<()> {
        let entry = Entry::new(&self.service, key)?;
        entry.set_password(token)?;
        Ok(())
    }

    /// Retrieves a token.
    ///
    /// Returns `Ok(None)` if no entry exists for `key`.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, key)?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a token. Deleting a missing entry succeeds.
    pub fn delete(&self, key: &str) -> Result<()> {
        let entry = Entry::new(&self.service, key)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(e.into()),
        }
    }
}
