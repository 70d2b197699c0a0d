use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, error};

use tally::driver;
use tally::subprocess::SubprocessManager;

/// Count word frequencies across input files
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Count word frequencies across input files", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write the sorted counts to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count in a single sequential pass (reads stdin when no files given)
    Seq { files: Vec<PathBuf> },
    /// Count with one worker process per file, merged over pipes
    Fork { files: Vec<PathBuf> },
    /// Count with one thread per file sharing a single locked store
    Threads { files: Vec<PathBuf> },
    /// Fork-mode worker: count one file and emit the merge transport
    #[command(hide = true)]
    Worker { file: PathBuf },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // Logs go to stderr: in worker mode stdout is the merge transport.
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_writer(io::stderr)
        .init();

    debug!("tally started with verbosity level: {}", cli.verbose);

    if let Err(e) = run(cli).await {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let store = match cli.command {
        Commands::Seq { files } => driver::sequential::run(&files)?,
        Commands::Fork { files } => {
            driver::process::run(&files, &SubprocessManager::production()).await?
        }
        Commands::Threads { files } => driver::threads::run(&files)?,
        Commands::Worker { file } => {
            driver::worker::run(&file, &mut io::stdout().lock())?;
            return Ok(());
        }
    };

    let mut sink: Box<dyn Write> = match cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    driver::emit(store, &mut sink)?;
    Ok(())
}
