use std::path::PathBuf;

use clap::Parser;

use durak_bench::config::{ResolvedOutputs, SimulationConfig};
use durak_bench::logging::init_logging;
use durak_bench::runner::SimulationRunner;
use durak_core::AppInfo;

/// Batch simulation harness for the Durak engine.
#[derive(Debug, Parser)]
#[command(
    name = "durak-bench",
    author,
    version,
    about = "Deterministic Durak seed sweep harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the first seed of the sweep.
    #[arg(long, value_name = "SEED")]
    seed_start: Option<u64>,

    /// Override the number of seeds played per player count.
    #[arg(long, value_name = "GAMES")]
    count: Option<usize>,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,

    /// Forward every game's trace lines as log events.
    #[arg(long)]
    trace: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = SimulationConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(seed_start) = cli.seed_start {
        config.games.seed_start = seed_start;
    }

    if let Some(count) = cli.count {
        config.games.count = count;
    }

    if cli.trace {
        config.logging.game_trace = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let counts = config
        .games
        .player_counts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/");

    println!(
        "{} {} ({}): loaded '{run_id}' with {} seed{} from {} for {counts} players",
        AppInfo::name(),
        AppInfo::version(),
        AppInfo::codename(),
        config.games.count,
        if config.games.count == 1 { "" } else { "s" },
        config.games.seed_start,
    );

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let runner = SimulationRunner::new(config, outputs);
    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {} games → {} rows at {}",
        summary.games_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    for report in &summary.analytics.reports {
        println!(
            "  {} players: {} games, {} draws, mean {:.2} rounds (max {})",
            report.player_count,
            report.games,
            report.draws,
            report.mean_rounds,
            report.max_rounds
        );
    }
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
