use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Set up a Next.js app for Cloudflare Workers", long_about = None)]
struct Cli {
    /// Debug diagnostics on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision resources and configure the project
    Setup {
        /// Project root (defaults to the current directory)
        #[arg(long)]
        project_dir: Option<PathBuf>,

        /// Accept every default without prompting
        #[arg(short, long)]
        yes: bool,

        /// Skip the R2 bucket step
        #[arg(long, conflicts_with = "with_bucket")]
        skip_bucket: bool,

        /// Run the R2 bucket step without asking
        #[arg(long)]
        with_bucket: bool,
    },

    /// List the Cloudflare accounts of the current login
    Accounts {
        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the effective setup settings
    Config {
        /// Output results as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    worker_setup::logging::init(cli.verbose);

    match cli.command {
        Commands::Setup {
            project_dir,
            yes,
            skip_bucket,
            with_bucket,
        } => {
            let exit_code = commands::setup::execute(project_dir, yes, skip_bucket, with_bucket)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Commands::Accounts { json } => {
            let exit_code = commands::accounts::execute(json)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Commands::Config { json } => {
            commands::config::execute(json)?;
        }
    }

    Ok(())
}
