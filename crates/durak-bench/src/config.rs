use durak_core::{GameError, RulesConfig};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub run_id: String,
    pub games: GamesConfig,
    pub players: Vec<String>,
    #[serde(default)]
    pub rules: RulesConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimulationConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        validate_rules(&self.rules)?;
        self.games.validate(&self.rules)?;
        validate_players(&self.players, self.games.max_player_count())?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
            summary_md: resolve_template(&self.run_id, &self.outputs.summary_md),
        }
    }

    /// Names seated for an `count`-player game.
    pub fn seated(&self, count: usize) -> &[String] {
        &self.players[..count.min(self.players.len())]
    }
}

/// Which games to play: every seed in the range, for every player count.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    #[serde(default)]
    pub seed_start: u64,
    pub count: usize,
    #[serde(default = "default_player_counts")]
    pub player_counts: Vec<usize>,
}

impl GamesConfig {
    fn validate(&self, rules: &RulesConfig) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.count".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }

        if self.seed_start.checked_add(self.count as u64).is_none() {
            return Err(ValidationError::InvalidField {
                field: "games.seed_start".to_string(),
                message: "seed range overflows".to_string(),
            });
        }

        if self.player_counts.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "games.player_counts".to_string(),
                message: "at least one player count must be specified".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for &count in &self.player_counts {
            if !rules.supports_player_count(count) {
                return Err(ValidationError::InvalidField {
                    field: "games.player_counts".to_string(),
                    message: format!(
                        "{count} players is outside the supported range {}..={}",
                        rules.min_players, rules.max_players
                    ),
                });
            }
            if !seen.insert(count) {
                return Err(ValidationError::InvalidField {
                    field: "games.player_counts".to_string(),
                    message: format!("player count {count} listed more than once"),
                });
            }
        }

        Ok(())
    }

    pub fn max_player_count(&self) -> usize {
        self.player_counts.iter().copied().max().unwrap_or(0)
    }

    pub fn seeds(&self) -> impl Iterator<Item = u64> {
        let start = self.seed_start;
        (0..self.count as u64).map(move |offset| start + offset)
    }
}

fn default_player_counts() -> Vec<usize> {
    vec![2, 3, 4]
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
    pub summary_md: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    /// Forward every game's human-readable trace as info events.
    #[serde(default)]
    pub game_trace: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            game_trace: false,
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_rules(rules: &RulesConfig) -> Result<(), ValidationError> {
    rules.validate().map_err(|err| match err {
        GameError::InvalidRules { field, message } => ValidationError::InvalidField {
            field: format!("rules.{field}"),
            message,
        },
        other => ValidationError::InvalidField {
            field: "rules".to_string(),
            message: other.to_string(),
        },
    })
}

fn validate_players(players: &[String], needed: usize) -> Result<(), ValidationError> {
    if players.len() < needed {
        return Err(ValidationError::InvalidField {
            field: "players".to_string(),
            message: format!(
                "{needed} player names are needed but only {} are defined",
                players.len()
            ),
        });
    }

    let mut seen = HashSet::new();
    for name in players {
        if name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: "player name must not be empty".to_string(),
            });
        }

        if !seen.insert(name.as_str()) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("player name '{name}' defined more than once"),
            });
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
    pub summary_md: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
