use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use coalsim::core::{CoalescenceConfig, Coalescer, SeededStream};
use coalsim::driver::{self, RunLimits};
use coalsim::input::TextEventReader;
use coalsim::output::merge;

#[derive(Parser)]
#[command(name = "coalsim")]
#[command(about = "Deuteron coalescence over generated nucleon events", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Coalesce every event of a particle listing
    Run {
        /// Event listing (`pdg final px py pz e` per line, blank line between events)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file of `pdg pT pz eta` records
        #[arg(short, long)]
        output: PathBuf,

        /// RNG seed; omitted means nondeterministic
        #[arg(long, env = "COALSIM_SEED")]
        seed: Option<u64>,

        /// TOML file overriding the physical constants
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Stop after this many events
        #[arg(long)]
        max_events: Option<u64>,

        /// Abort when this many events have failed
        #[arg(long, default_value_t = 10)]
        max_errors: u64,
    },
    /// Concatenate output files and sum their event counts
    Merge {
        /// Merged output file
        #[arg(short, long)]
        output: PathBuf,

        /// Output files to merge, in order
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            input,
            output,
            seed,
            config,
            max_events,
            max_errors,
        } => {
            let config = match &config {
                Some(path) => CoalescenceConfig::load(path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => CoalescenceConfig::default(),
            };
            let active = toml::to_string(&config).context("serializing configuration")?;
            log::info!("configuration:\n{active}");

            let events = File::open(&input)
                .with_context(|| format!("opening event listing {}", input.display()))?;
            let sink = File::create(&output)
                .with_context(|| format!("creating output {}", output.display()))?;

            let mut coalescer = Coalescer::new(config, SeededStream::new(seed))?;
            let limits = RunLimits {
                max_events,
                max_errors,
            };
            let summary = driver::run(
                &mut coalescer,
                TextEventReader::new(BufReader::new(events)),
                BufWriter::new(sink),
                &limits,
            )?;
            println!(
                "{} events, {} deuterons, {} anti-deuterons -> {}",
                summary.events,
                summary.deuterons,
                summary.antideuterons,
                output.display()
            );
            if summary.aborted {
                anyhow::bail!(
                    "run aborted after {} failed events",
                    summary.failures
                );
            }
        }
        Commands::Merge { output, inputs } => {
            let mut readers = Vec::with_capacity(inputs.len());
            for path in &inputs {
                let f = File::open(path)
                    .with_context(|| format!("opening {}", path.display()))?;
                readers.push(BufReader::new(f));
            }
            let sink = File::create(&output)
                .with_context(|| format!("creating output {}", output.display()))?;
            let summary = merge(readers, BufWriter::new(sink))?;
            println!(
                "{} records from {} events -> {}",
                summary.records,
                summary.events,
                output.display()
            );
        }
    }
    Ok(())
}
