use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use guide_scan::pipeline::{self, ScanOpt};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "guide-scan", author, version, about = "Find every occurrence of sgRNA guides in a genome", arg_required_else_help = true)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Only warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report match offsets and counts per guide as JSON
    Scan {
        /// Guide file, one guide per line
        #[arg(short, long)]
        guides: PathBuf,
        /// Genome files (plain lines or FASTA)
        #[arg(required = true)]
        genomes: Vec<PathBuf>,
        /// Base name for <BASE>.json and <BASE>_count.json
        #[arg(short, long, default_value = "output")]
        output: String,
        /// Genome files scanned concurrently
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        /// Also write <BASE>_meta.json with run provenance
        #[arg(long)]
        meta: bool,
    },
    /// Count genome occurrences of every guide and write a TSV report
    Check {
        #[arg(short, long)]
        guides: PathBuf,
        #[arg(required = true)]
        genomes: Vec<PathBuf>,
        /// Output TSV path
        #[arg(short, long, default_value = "filtered.tsv")]
        output: PathBuf,
        /// Leave out guides occurring more than once
        #[arg(long = "drop-multi")]
        drop_multi: bool,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
}

fn init_logger(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => log::LevelFilter::Warn,
        (false, 0) => log::LevelFilter::Info,
        (false, 1) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Scan { guides, genomes, output, threads, meta } => {
            let report = pipeline::scan_all(&guides, &genomes, ScanOpt { threads })
                .map_err(|e| anyhow::anyhow!("scan failed: {}", e))?;
            let written = pipeline::write_scan(&report, &guides, &genomes, &output, meta)
                .map_err(|e| anyhow::anyhow!("cannot save results for {} guides: {}", report.table.counts.len(), e))?;
            println!("offsets written: {}", written.outputs.offsets.display());
            println!("counts written: {}", written.outputs.counts.display());
            if let Some(p) = written.meta {
                println!("metadata written: {}", p.display());
            }
        }
        Commands::Check { guides, genomes, output, drop_multi, threads } => {
            let report = pipeline::scan_all(&guides, &genomes, ScanOpt { threads })
                .map_err(|e| anyhow::anyhow!("check failed: {}", e))?;
            let summary = pipeline::write_check(&report, &output, drop_multi)
                .map_err(|e| anyhow::anyhow!("cannot save report: {}", e))?;
            println!("{} guides written to {}", summary.rows, output.display());
        }
    }
    Ok(())
}
