//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

/// Short description with ANSI styling for clap help output.
/// Bold "gitscribe", dimmed rest.
pub const BANNER_STYLED: &str =
    "\x1b[1mgitscribe\x1b[0m \x1b[2m· Commit messages, diffs and notes for your working tree.\x1b[0m";

/// Print the banner line to stderr.
pub fn print_banner(provider: &str, model: &str) {
    use colored::Colorize;
    use std::io::Write;
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle);
    let _ = writeln!(
        handle,
        "  {} {}",
        "gitscribe".bold(),
        format!("· {provider} / {model}").dimmed(),
    );
    let _ = writeln!(handle);
    let _ = handle.flush();
}
