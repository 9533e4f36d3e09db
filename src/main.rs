use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use redo_dump::DumpConfig;

#[derive(Parser, Debug)]
#[command(name = "redo-dump")]
#[command(about = "Prints the header, checkpoints and log blocks of a redo log file")]
#[command(version)]
struct Cli {
    /// Path to the redo log file (e.g. ib_logfile0)
    #[arg(env = "REDO_LOG_FILE")]
    log_file: PathBuf,

    /// Fail on a truncated header or checkpoint instead of printing zero-filled fields
    #[arg(long)]
    strict: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = DumpConfig { strict: cli.strict };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    redo_dump::dump_file(&cli.log_file, &mut out, &config)
        .context("Error while dumping redo log")?;
    out.flush().context("Error while flushing report")?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
