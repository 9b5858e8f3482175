use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use supercontig_extender::config::{Config, SearchBackend};
use supercontig_extender::pipeline;
use supercontig_extender::util::StopFlag;

#[derive(Parser, Debug)]
#[command(
    name = "supercontig-extender",
    author,
    version,
    about = "Greedy read-based extension of supercontig fragments",
    arg_required_else_help = true
)]
struct Cli {
    /// TOML configuration file (built-in defaults when absent)
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extend every OPEN supercontig and write the updated collection
    Extend {
        /// Reads file (FASTA or FASTQ)
        #[arg(long)]
        reads: Option<PathBuf>,
        /// Input supercontigs file
        #[arg(short = 's', long)]
        supercontigs: Option<PathBuf>,
        /// Output supercontigs file
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Prebuilt corpus index (.fm); selects the index backend
        #[arg(short = 'i', long = "index")]
        index: Option<PathBuf>,
    },
    /// Build an FM index over the reads corpus
    Index {
        /// Reads file (FASTA or FASTQ)
        reads: PathBuf,
        /// Output prefix for the index file
        #[arg(short, long, default_value = "reads")]
        output: String,
    },
    /// Write the default configuration as TOML
    InitConfig {
        /// Destination (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Extend { reads, supercontigs, output, index } => {
            run_extend(&cli.config, reads, supercontigs, output, index)
        }
        Commands::Index { reads, output } => run_index(&reads, &output),
        Commands::InitConfig { out } => run_init_config(out),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run_extend(
    config_path: &std::path::Path,
    reads: Option<PathBuf>,
    supercontigs: Option<PathBuf>,
    output: Option<PathBuf>,
    index: Option<PathBuf>,
) -> Result<()> {
    let mut cfg = Config::load(config_path)?;
    for issue in cfg.sanitize() {
        warn!("{}", issue);
    }
    if let Some(p) = reads {
        cfg.paths.reads_path = p;
    }
    if let Some(p) = supercontigs {
        cfg.paths.supercontigs_path = p;
    }
    if let Some(p) = output {
        cfg.paths.supercontigs_output_path = p;
    }
    if let Some(p) = index {
        cfg.paths.index_path = Some(p);
        cfg.searcher.backend = SearchBackend::Index;
    }

    let stop = StopFlag::new();
    let handler_stop = stop.clone();
    ctrlc::set_handler(move || {
        warn!("interrupt received, finishing current step and saving");
        handler_stop.stop();
    })
    .context("cannot install interrupt handler")?;

    info!(backend = ?cfg.searcher.backend, "starting extension");
    pipeline::run_extend(&cfg, &stop)?;
    Ok(())
}

fn run_index(reads: &std::path::Path, output: &str) -> Result<()> {
    let build_args = Some(std::env::args().collect::<Vec<_>>().join(" "));
    let (index, out_path) = pipeline::build_index(reads, output, build_args)?;

    println!("reads: {}", reads.display());
    println!("sequences: {}", index.corpus.len());
    println!("total_len: {}", index.corpus.total_len());
    println!("corpus index saved: {}", out_path);
    Ok(())
}

fn run_init_config(out: Option<PathBuf>) -> Result<()> {
    let text = Config::default().to_toml_string()?;
    match out {
        Some(p) => {
            std::fs::write(&p, text).with_context(|| format!("cannot write config to '{}'", p.display()))?;
            println!("default configuration written: {}", p.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
