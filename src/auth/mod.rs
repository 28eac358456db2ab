//
//  seafile-cli
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credential handling for the command-line front end. Logging in itself is
//! done by [`Session`](crate::api::Session); this module keeps the resulting
//! tokens between runs.
//!
//! ## Supported Credentials
//!
//! - **Account token**: obtained by `sf auth login`, stored per server
//! - **Repository API token**: issued for a single repository, stored per repository
//!
//! ## Module Structure
//!
//! - [`keyring`]: Secure token storage using the system keyring
//! - [`token`]: Reading tokens from standard input

mod keyring;
mod token;

pub use keyring::*;
pub use token::*;
