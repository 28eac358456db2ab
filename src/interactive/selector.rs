//
//  seafile-cli
//  interactive/selector.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! List selection, used to pick a repository when none was named.
//!
//! ```no_run
//! use seafile_cli::interactive::select;
//!
//! let names = vec!["My Library", "Photos"];
//! let idx = select("Select repository", &names).unwrap();
//! println!("Using {}", names[idx]);
//! ```

use anyhow::{bail, Result};
use dialoguer::Select;

/// Prompts the user to pick one item; returns its index.
///
/// # Errors
///
/// Fails on an empty list, or if the terminal interaction is cancelled.
pub fn select<T: ToString>(message: &str, items: &[T]) -> Result<usize> {
    if items.is_empty() {
        bail!("Nothing to select from");
    }
    let selection = Select::new()
        .with_prompt(message)
        .items(items)
        .default(0)
        .interact()?;
    Ok(selection)
}
