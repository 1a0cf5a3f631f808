//! User interface module - interaction (prompts) and formatting.
//!
//! - `formatter` - Pure formatting functions
//! - This module - the release confirmation prompt

use std::io::{BufRead, Write};

use crate::error::Result;

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_command_output, display_commit_message, display_error,
    display_proposed_version, display_status, display_success,
};

/// The only answer that confirms a release.
pub const AFFIRMATIVE: &str = "y";

/// Asks the operator to confirm tagging and pushing `version`.
///
/// Reads exactly one line from `input`. Only the literal [AFFIRMATIVE] token
/// (ignoring the line terminator) confirms; anything else, including end of
/// input, declines.
///
/// # Returns
/// * `Ok(true)` - Operator typed `y`
/// * `Ok(false)` - Anything else
/// * `Err` - If reading input fails
pub fn confirm_release(
    version: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<bool> {
    write!(
        output,
        "\nAre you sure you want to tag and push v{} to staging? (y/n): ",
        version
    )?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let answer = line.trim_end_matches(&['\n', '\r'][..]);
    Ok(answer == AFFIRMATIVE)
}
