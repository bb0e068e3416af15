//! Console output for build progress.
//!
//! Everything the user sees during a build goes through these functions so
//! the output has one consistent look.

use console::style;
use std::path::Path;

/// Print a section header for a major build step.
pub fn display_header(message: &str) {
    println!("\n{}", style(format!("==> {}", message)).bold().cyan());
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Echo a command line before it runs.
pub fn display_command(line: &str) {
    println!("{}", style(format!("$ {}", line)).dim());
}

/// Explain how to get back to a clean checkout after version creation failed
/// partway through.
pub fn display_recovery_hint(restore_target: &str, descriptor: &Path) {
    eprintln!(
        "\n{} the working tree may still be on the release tag with a generated {}",
        style("Recovery:").yellow().bold(),
        descriptor.display()
    );
    eprintln!("  git checkout -- {}", descriptor.display());
    eprintln!("  git checkout {}", restore_target);
}
