use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use durak_core::game::record::GameRecord;
use durak_core::{GameEngine, GameError, GameOutcome};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsCollector, AnalyticsError, AnalyticsSummary, GameSample};
use crate::config::{ResolvedOutputs, SimulationConfig};

/// Plays every configured (player count, seed) pair and writes the artifacts.
pub struct SimulationRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
}

/// Summary details returned after a run.
#[derive(Debug)]
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub analytics: AnalyticsSummary,
}

/// One JSONL row: the game record plus the run coordinates.
#[derive(Debug, Serialize)]
struct GameLogRow<'a> {
    run_id: &'a str,
    game_id: String,
    player_count: usize,
    #[serde(flatten)]
    record: GameRecord,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> Self {
        Self { config, outputs }
    }

    /// Execute the sweep, streaming one JSONL row per game.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut analytics =
            AnalyticsCollector::new(self.config.run_id.clone(), &self.config.games.player_counts);
        let mut rows_written = 0usize;

        for &player_count in &self.config.games.player_counts {
            for seed in self.config.games.seeds() {
                let (record, sample) = self.play_game(player_count, seed)?;
                analytics.record_game(sample)?;

                let row = GameLogRow {
                    run_id: &self.config.run_id,
                    game_id: game_id(player_count, seed),
                    player_count,
                    record,
                };
                serde_json::to_writer(&mut writer, &row)?;
                writer.write_all(b"\n")?;
                rows_written += 1;
            }
        }

        writer.flush()?;

        let summary = analytics.finalize();
        summary.write_markdown(&self.outputs.summary_md)?;

        event!(
            target: "durak_bench::run",
            Level::INFO,
            run_id = %self.config.run_id,
            games = summary.total_games(),
            rows_written,
            "simulation complete"
        );

        Ok(RunSummary {
            games_played: summary.total_games(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            analytics: summary,
        })
    }

    fn play_game(
        &self,
        player_count: usize,
        seed: u64,
    ) -> Result<(GameRecord, GameSample), RunnerError> {
        let names = self.config.seated(player_count);
        let mut engine = GameEngine::with_rules(seed, names, self.config.rules.clone())
            .map_err(|source| RunnerError::game(player_count, seed, source))?
            .with_trace(self.config.logging.game_trace);

        let outcome = engine
            .run()
            .map_err(|source| RunnerError::game(player_count, seed, source))?;

        if self.config.logging.game_trace {
            for line in engine.log_lines() {
                event!(
                    target: "durak_bench::trace",
                    Level::INFO,
                    game_id = %game_id(player_count, seed),
                    "{line}"
                );
            }
        }

        let fool_seat = match &outcome {
            GameOutcome::Fool(name) => names.iter().position(|seated| seated == name),
            GameOutcome::Draw => None,
        };

        event!(
            target: "durak_bench::game",
            Level::DEBUG,
            player_count,
            seed,
            rounds = engine.rounds_played(),
            result = %outcome,
        );

        let sample = GameSample {
            player_count,
            rounds: engine.rounds_played(),
            fool_seat,
        };
        Ok((GameRecord::capture(&engine), sample))
    }
}

fn game_id(player_count: usize, seed: u64) -> String {
    format!("P{player_count}_S{seed:06}")
}

fn ensure_parent(path: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game with {player_count} players and seed {seed} failed: {source}")]
    Game {
        player_count: usize,
        seed: u64,
        #[source]
        source: GameError,
    },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

impl RunnerError {
    fn game(player_count: usize, seed: u64, source: GameError) -> Self {
        RunnerError::Game {
            player_count,
            seed,
            source,
        }
    }
}
