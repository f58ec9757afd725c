use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use policyseg::{
    PartyType, PipelineConfig, PolicysegConfig, ProcessedPolicy, process_policy_file,
    process_text,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "policyseg")]
#[command(about = "Section trees and provenance-tagged chunks for privacy policies")]
#[command(version)]
struct Cli {
    /// YAML pipeline configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the section tree, one JSON section per line
    Sections {
        /// Policy file (.txt, .md, .html); "-" reads stdin
        path: PathBuf,

        /// Party type: 1P or 3P
        #[arg(short, long, default_value = "1P")]
        party: PartyType,

        /// Policy id for stdin input
        #[arg(long, default_value = "stdin")]
        policy_id: String,
    },
    /// Print the chunks, one JSON chunk per line
    Chunks {
        /// Policy file (.txt, .md, .html); "-" reads stdin
        path: PathBuf,

        /// Party type: 1P or 3P
        #[arg(short, long, default_value = "1P")]
        party: PartyType,

        /// Policy id for stdin input
        #[arg(long, default_value = "stdin")]
        policy_id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs)?;

    let cfg = match &cli.config {
        Some(path) => PolicysegConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?
            .pipeline_config()?,
        None => PipelineConfig::default(),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Commands::Sections {
            path,
            party,
            policy_id,
        } => {
            let processed = process(&path, party, &policy_id, &cfg)?;
            for section in &processed.sections {
                serde_json::to_writer(&mut out, section)?;
                writeln!(out)?;
            }
        }
        Commands::Chunks {
            path,
            party,
            policy_id,
        } => {
            let processed = process(&path, party, &policy_id, &cfg)?;
            for chunk in &processed.chunks {
                serde_json::to_writer(&mut out, chunk)?;
                writeln!(out)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn process(
    path: &Path,
    party: PartyType,
    policy_id: &str,
    cfg: &PipelineConfig,
) -> Result<ProcessedPolicy> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading policy from stdin")?;
        return Ok(process_text(policy_id, party, &text, cfg)?);
    }
    process_policy_file(path, party, cfg).with_context(|| format!("processing {}", path.display()))
}

fn init_tracing(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| anyhow!("invalid log filter {level:?}: {err}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
