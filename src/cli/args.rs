//! Clap argument types and validation.

use clap::Parser;
use std::path::PathBuf;

use gitscribe::constants::MAX_SUBJECT_LENGTH_CAP;
use gitscribe::models::CommitType;

/// Commit messages, diffs and Markdown notes for local git changes.
#[derive(Parser, Debug)]
#[command(
    name = "gitscribe",
    version = gitscribe::constants::VERSION,
    about = super::BANNER_STYLED,
)]
pub struct Cli {
    /// Enable debug logging (same as RUST_LOG=gitscribe=debug).
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Let the model inspect the changes with the built-in tools.
    Review(ReviewArgs),

    /// Print a Conventional Commit message for the working tree.
    CommitMessage(CommitMessageArgs),

    /// Print per-file zero-context diffs of the working tree.
    Changes(ChangesArgs),

    /// List the tools offered to the model with their JSON schemas.
    Tools,

    /// Print version and build information.
    Version,
}

/// Arguments for the `review` subcommand.
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Path to the repository or working directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Task for the model (default: review the changes and propose a commit message).
    #[arg(long, short)]
    pub instructions: Option<String>,

    /// Maximum tool round-trips (overrides config).
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Hide the per-tool-call trace on stderr.
    #[arg(long, short, default_value_t = false)]
    pub quiet: bool,
}

/// Arguments for the `commit-message` subcommand.
#[derive(Parser, Debug)]
pub struct CommitMessageArgs {
    /// Path to the repository (default: current directory).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Commit type, e.g. feat, fix, docs (default: inferred).
    #[arg(long = "type", value_name = "TYPE")]
    pub commit_type: Option<CommitType>,

    /// Commit scope (default: derived from the changed paths).
    #[arg(long)]
    pub scope: Option<String>,

    /// Subject line (default: derived from the changed files).
    #[arg(long)]
    pub subject: Option<String>,

    /// Print the header line only.
    #[arg(long, default_value_t = false)]
    pub no_body: bool,

    /// Maximum subject length in characters (overrides config).
    #[arg(long)]
    pub max_subject_length: Option<usize>,

    /// Print the result as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl CommitMessageArgs {
    /// Check flag values clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        match self.max_subject_length {
            Some(n) if n == 0 || n > MAX_SUBJECT_LENGTH_CAP => Err(format!(
                "--max-subject-length must be between 1 and {MAX_SUBJECT_LENGTH_CAP}"
            )),
            _ => Ok(()),
        }
    }
}

/// Arguments for the `changes` subcommand.
#[derive(Parser, Debug)]
pub struct ChangesArgs {
    /// Path to the repository (default: current directory).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Print the entries as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gitscribe").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn review_defaults() {
        match parse(&["review"]).command {
            Command::Review(args) => {
                assert_eq!(args.path, PathBuf::from("."));
                assert!(args.instructions.is_none());
                assert!(args.max_turns.is_none());
                assert!(!args.quiet);
            }
            _ => panic!("expected Review command"),
        }
    }

    #[test]
    fn review_flags() {
        let cli = parse(&[
            "review",
            "--path",
            "/repo",
            "-i",
            "write NOTES.md",
            "--max-turns",
            "3",
            "-q",
            "-v",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Review(args) => {
                assert_eq!(args.path, PathBuf::from("/repo"));
                assert_eq!(args.instructions.as_deref(), Some("write NOTES.md"));
                assert_eq!(args.max_turns, Some(3));
                assert!(args.quiet);
            }
            _ => panic!("expected Review command"),
        }
    }

    #[test]
    fn commit_message_parses_type_case_insensitively() {
        match parse(&["commit-message", "--type", "FIX", "--scope", "api", "--no-body"]).command {
            Command::CommitMessage(args) => {
                assert_eq!(args.commit_type, Some(CommitType::Fix));
                assert_eq!(args.scope.as_deref(), Some("api"));
                assert!(args.no_body);
                assert!(args.validate().is_ok());
            }
            _ => panic!("expected CommitMessage command"),
        }
    }

    #[test]
    fn commit_message_rejects_unknown_type() {
        let result = Cli::try_parse_from(["gitscribe", "commit-message", "--type", "feature"]);
        assert!(result.is_err());
    }

    #[test]
    fn commit_message_validates_subject_length() {
        for bad in ["0", "101"] {
            match parse(&["commit-message", "--max-subject-length", bad]).command {
                Command::CommitMessage(args) => assert!(args.validate().is_err()),
                _ => panic!("expected CommitMessage command"),
            }
        }
    }

    #[test]
    fn changes_json_flag() {
        match parse(&["changes", "--json"]).command {
            Command::Changes(args) => assert!(args.json),
            _ => panic!("expected Changes command"),
        }
    }

    #[test]
    fn verbose_is_global() {
        assert!(parse(&["tools", "--verbose"]).verbose);
        assert!(!parse(&["version"]).verbose);
    }
}
