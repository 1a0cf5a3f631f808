//! Pure formatting functions for UI output.
//!
//! All display logic lives here, separate from user interaction.

use crate::boundary::BoundaryWarning;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("fatal:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Echo the captured output of a failed git command.
pub fn display_command_output(output: &str) {
    let output = output.trim_end();
    if !output.is_empty() {
        eprintln!("{}", style(output).dim());
    }
}

/// Display the proposed version change.
///
/// # Arguments
/// * `module` - Module being released
/// * `current` - Version of the latest tag
/// * `next` - Version that will be tagged
pub fn display_proposed_version(module: &str, current: &str, next: &str) {
    println!("\n{}", style(format!("Proposed release of {}:", module)).bold());
    println!("  Current version: {}", style(current).red());
    println!("  New version:     {}", style(next).green());
}

/// Display the commit message that will be used in the site repo.
pub fn display_commit_message(message: &str) {
    println!("\n{}", style(message).cyan());
}
