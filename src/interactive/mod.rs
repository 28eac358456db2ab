//
//  seafile-cli
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Interactive Module
//!
//! Terminal prompts for values the user did not pass on the command line.
//!
//! Prompts are skipped entirely when `--no-prompt` is given, when the config
//! sets `prompt = "disabled"`, or when stdin is not a terminal.
//!
//! - [`prompt`]: text, password, and confirmation prompts
//! - [`selector`]: picking one item from a list

mod prompt;
mod selector;

pub use prompt::*;
pub use selector::*;

use std::io::IsTerminal;

use console::Term;

/// Checks whether interactive prompts may be shown.
pub fn prompts_allowed(no_prompt_flag: bool, config_enabled: bool) -> bool {
    !no_prompt_flag && config_enabled && std::io::stdin().is_terminal() && Term::stderr().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_disables_prompts() {
        assert!(!prompts_allowed(true, true));
        assert!(!prompts_allowed(false, false));
    }
}
