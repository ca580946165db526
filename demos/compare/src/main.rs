//! compare: runs the wsn clustering protocols and reports network lifetime.
//!
//! ```text
//! compare run --protocol rlbeep --rounds 3000
//! compare compare --nodes 200 --output results/
//! compare compare --config scenario.json --derive-seeds
//! ```
//!
//! Every run writes `<protocol>_alive.csv` (and `<protocol>_energy.csv` unless
//! `--no-energy` is given) to the output directory, then prints a table of
//! first-node-dead, half-dead and last-node-dead rounds.
//!
//! Set `RUST_LOG=wsn_sim=debug` (or pass `-vv`) for per-round logging.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wsn_output::{CsvWriter, RoundSeriesObserver, write_series};
use wsn_protocol::{ClusterProtocol, Protocol, ProtocolKind};
use wsn_sim::{BatchSpec, Lifetime, RunOutcome, SeedPolicy, SimBuilder, run_all};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a single protocol, streaming its series to CSV.
    Run {
        #[arg(short, long, default_value = "abose")]
        protocol: ProtocolKind,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Simulate several protocols (all six by default) over the same inputs.
    Compare {
        #[arg(short, long, value_delimiter = ',')]
        protocols: Vec<ProtocolKind>,
        /// Give each protocol its own child seed instead of the shared one.
        #[arg(long)]
        derive_seeds: bool,
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// JSON scenario file; command-line flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    nodes: Option<usize>,
    #[arg(short, long)]
    rounds: Option<u64>,
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(short, long, default_value = "results")]
    output: PathBuf,
    /// Skip the residual-energy series.
    #[arg(long)]
    no_energy: bool,
}

impl CommonArgs {
    fn batch_spec(&self) -> Result<BatchSpec> {
        let mut spec = match &self.config {
            Some(path) => load_spec(path)?,
            None => BatchSpec::default(),
        };
        if let Some(n) = self.nodes {
            spec.nodes = n;
        }
        if let Some(r) = self.rounds {
            spec.config.total_rounds = r;
        }
        if let Some(s) = self.seed {
            spec.config.seed = s;
        }
        if self.no_energy {
            spec.config.record_energy = false;
        }
        Ok(spec)
    }
}

fn load_spec(path: &Path) -> Result<BatchSpec> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let spec = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!(path = %path.display(), "loaded scenario");
    Ok(spec)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Run { protocol, common } => run_single(protocol, &common),
        Command::Compare { protocols, derive_seeds, common } => {
            let kinds = if protocols.is_empty() { ProtocolKind::ALL.to_vec() } else { protocols };
            run_compare(&kinds, derive_seeds, &common)
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_single(kind: ProtocolKind, args: &CommonArgs) -> Result<()> {
    let spec = args.batch_spec()?;
    let protocol = Protocol::with_params(kind, &spec.params);

    let mut builder = SimBuilder::new(spec.config.clone(), protocol)
        .nodes(spec.nodes)
        .radio(spec.radio);
    if let Some(p) = spec.placement {
        builder = builder.placement(p);
    }
    let mut sim = builder.build()?;

    let writer = CsvWriter::new(&args.output, kind.name(), spec.config.record_energy)?;
    let mut obs = RoundSeriesObserver::new(writer);

    let t0 = Instant::now();
    let records = sim.run(&mut obs)?;
    let elapsed = t0.elapsed();
    if let Some(e) = obs.take_error() {
        return Err(e).context("writing round series");
    }

    let outcome = RunOutcome {
        protocol:      sim.protocol.name().to_owned(),
        seed:          spec.config.seed,
        initial_nodes: sim.network.initial_count,
        records,
    };
    print_table(&[outcome], spec.config.total_rounds);
    println!("\n{} rounds in {:.2?}; CSV written to {}", spec.config.total_rounds, elapsed, args.output.display());
    Ok(())
}

fn run_compare(kinds: &[ProtocolKind], derive_seeds: bool, args: &CommonArgs) -> Result<()> {
    if kinds.is_empty() {
        bail!("no protocols selected");
    }
    let mut spec = args.batch_spec()?;
    if derive_seeds {
        spec.seeds = SeedPolicy::Derived;
    }

    let t0 = Instant::now();
    let outcomes = run_all(kinds, &spec)?;
    let elapsed = t0.elapsed();

    for (kind, outcome) in kinds.iter().zip(&outcomes) {
        let mut writer = CsvWriter::new(&args.output, kind.name(), spec.config.record_energy)?;
        write_series(&mut writer, &outcome.records)
            .with_context(|| format!("writing {} series", kind.name()))?;
    }

    print_table(&outcomes, spec.config.total_rounds);
    println!(
        "\n{} protocols × {} rounds in {:.2?}; CSV written to {}",
        kinds.len(),
        spec.config.total_rounds,
        elapsed,
        args.output.display()
    );
    Ok(())
}

// ── Report ────────────────────────────────────────────────────────────────────

fn print_table(outcomes: &[RunOutcome], total_rounds: u64) {
    println!("{:<10} {:>8} {:>8} {:>8} {:>8} {:>12}", "protocol", "seed", "FND", "HND", "LND", "final alive");
    println!("{}", "-".repeat(59));
    for o in outcomes {
        let Lifetime { first_dead, half_dead, last_dead } = o.lifetime();
        let alive = o.records.last().map_or(o.initial_nodes, |r| r.alive_nodes);
        println!(
            "{:<10} {:>8} {:>8} {:>8} {:>8} {:>12}",
            o.protocol,
            o.seed,
            milestone(first_dead.map(|r| r.0), total_rounds),
            milestone(half_dead.map(|r| r.0), total_rounds),
            milestone(last_dead.map(|r| r.0), total_rounds),
            alive,
        );
    }
}

/// Round number, or `>budget` when the milestone was never reached.
fn milestone(round: Option<u64>, total_rounds: u64) -> String {
    match round {
        Some(r) => r.to_string(),
        None => format!(">{total_rounds}"),
    }
}
