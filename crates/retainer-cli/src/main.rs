mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, RetentionArgs};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(
    name = "retainer",
    about = "Decide which releases to retain: the N most recently deployed per project and environment",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from retainer.yaml)
    #[arg(long, global = true, env = "RETAINER_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the releases to retain and why each one was kept
    Retain {
        #[command(flatten)]
        args: RetentionArgs,
    },

    /// List the releases not retained for any project/environment pair
    Expired {
        #[command(flatten)]
        args: RetentionArgs,
    },

    /// Inspect and validate retainer.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Retain { args } => cmd::retain::run(&root, args, cli.json),
        Commands::Expired { args } => cmd::expired::run(&root, args, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
