//! Terminal output for the bump workflow.

use console::style;

use crate::bumper::BumpOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// List the files that made `directory` count as having new content.
pub fn display_added_files(directory: &str, files: &[&str]) {
    println!(
        "\n{}",
        style(format!("New files in '{}':", directory)).bold()
    );
    for file in files {
        println!("  {}", file);
    }
}

/// Summarise what a run did (or would do, when `dry_run` is set).
pub fn display_outcome(outcome: &BumpOutcome, dry_run: bool) {
    match outcome {
        BumpOutcome::Skipped { version_file } => {
            display_status(&format!(
                "{} was modified manually, leaving it alone",
                version_file
            ));
        }
        BumpOutcome::Bumped {
            component,
            from,
            to,
            reason,
        } => {
            let verb = if dry_run { "Would bump" } else { "Bumped" };
            display_success(&format!(
                "{} {} version: {} -> {} ({})",
                verb,
                component,
                style(from).red(),
                style(to).green(),
                reason
            ));
        }
    }
}
