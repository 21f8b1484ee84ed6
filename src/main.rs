//! gitscribe: commit messages, diffs and notes for local git changes.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use gitscribe::changes;
use gitscribe::commit;
use gitscribe::config;
use gitscribe::constants;
use gitscribe::env;
use gitscribe::models;
use gitscribe::providers;
use gitscribe::review;
use gitscribe::tools;
use gitscribe::vcs;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;

use cli::args::{ChangesArgs, Cli, Command, CommitMessageArgs, ReviewArgs};
use config::Config;
use env::Env;
use models::CommitMessageRequest;
use providers::rig::RigProvider;
use tools::Toolbox;
use tools::commit_message::CommitMessageOutput;
use vcs::GitCli;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    // A missing .env is fine; values already in the environment win.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Review(args) => run_review(args).await,
        Command::CommitMessage(args) => run_commit_message(args).await,
        Command::Changes(args) => run_changes(args).await,
        Command::Tools => run_tools().await,
        Command::Version => run_version(),
    }
}

/// Install the stderr log subscriber.
///
/// `--verbose` forces debug output for this crate; otherwise `RUST_LOG`
/// applies, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(format!("{}=debug", constants::APP_NAME))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Print detailed version and build information.
fn run_version() -> Result<()> {
    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}

/// Resolve `--path` to an absolute directory.
fn resolve_path(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path)
        .with_context(|| format!("--path directory not found: {}", path.display()))
}

/// Run the model with the repository tools and print its reply.
async fn run_review(args: ReviewArgs) -> Result<()> {
    let root = resolve_path(&args.path)?;
    let config = Config::load(Some(&root), &Env::real()).context("failed to load configuration")?;

    let max_turns = args.max_turns.unwrap_or(config.agent.max_turns);
    tools::set_trace_tool_calls(!args.quiet);

    let toolbox = Toolbox::local(root.clone(), config.commit.clone());
    let provider =
        RigProvider::new(config.provider.clone(), toolbox).context("failed to set up provider")?;

    if !args.quiet {
        cli::print_banner(&config.provider.name.to_string(), &config.provider.model);
    }

    let request = review::ReviewRequest {
        root,
        instructions: args.instructions,
        max_turns,
    };
    let reply = review::run_review(&provider, &request)
        .await
        .context("review failed")?;

    println!("{}", reply.trim_end());
    Ok(())
}

/// Synthesize a commit message without a model.
async fn run_commit_message(args: CommitMessageArgs) -> Result<()> {
    args.validate().map_err(|e| anyhow::anyhow!("{e}"))?;

    let root = resolve_path(&args.path)?;
    let config = Config::load(Some(&root), &Env::real()).context("failed to load configuration")?;

    let request = CommitMessageRequest {
        root,
        commit_type: args.commit_type,
        scope: args.scope,
        subject: args.subject,
        include_body: !args.no_body && config.commit.include_body,
        max_subject_length: args
            .max_subject_length
            .unwrap_or(config.commit.max_subject_length),
    };

    let result = commit::generate_commit_message(&GitCli::new(), &request).await?;

    if args.json {
        let output = CommitMessageOutput {
            message: result.message(),
            result,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{result}");
    }
    Ok(())
}

/// Print per-file diffs of the working tree.
async fn run_changes(args: ChangesArgs) -> Result<()> {
    let root = resolve_path(&args.path)?;
    let entries = changes::get_file_changes_in_directory(&GitCli::new(), &root).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        eprintln!("No changes.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.file.bold());
        for line in entry.diff.lines() {
            if line.starts_with('+') && !line.starts_with("+++") {
                println!("{}", line.green());
            } else if line.starts_with('-') && !line.starts_with("---") {
                println!("{}", line.red());
            } else if line.starts_with("@@") {
                println!("{}", line.cyan());
            } else {
                println!("{}", line.dimmed());
            }
        }
        println!();
    }
    Ok(())
}

/// List tool names, descriptions and parameter schemas.
async fn run_tools() -> Result<()> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let toolbox = Toolbox::local(cwd, config::CommitConfig::default());

    for definition in toolbox.definitions().await {
        println!("{}", definition.name.bold());
        println!("  {}", definition.description.dimmed());
        let schema = serde_json::to_string_pretty(&definition.parameters)?;
        for line in schema.lines() {
            println!("  {line}");
        }
        println!();
    }
    Ok(())
}
