use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("player count {0} was not configured for this run")]
    UnknownPlayerCount(usize),
    #[error("fool seat {seat} is out of range for a {player_count}-player game")]
    SeatOutOfRange { seat: usize, player_count: usize },
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// One finished game as seen by the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSample {
    pub player_count: usize,
    pub rounds: u32,
    /// Seat index of the loser, `None` for a draw.
    pub fool_seat: Option<usize>,
}

pub struct AnalyticsCollector {
    run_id: String,
    groups: BTreeMap<usize, GroupAccumulator>,
}

impl AnalyticsCollector {
    pub fn new(run_id: impl Into<String>, player_counts: &[usize]) -> Self {
        let groups = player_counts
            .iter()
            .map(|&count| (count, GroupAccumulator::new(count)))
            .collect();
        Self {
            run_id: run_id.into(),
            groups,
        }
    }

    pub fn record_game(&mut self, sample: GameSample) -> Result<(), AnalyticsError> {
        let group = self
            .groups
            .get_mut(&sample.player_count)
            .ok_or(AnalyticsError::UnknownPlayerCount(sample.player_count))?;
        group.record(sample)
    }

    pub fn finalize(self) -> AnalyticsSummary {
        AnalyticsSummary {
            run_id: self.run_id,
            reports: self
                .groups
                .into_values()
                .map(GroupAccumulator::into_report)
                .collect(),
        }
    }
}

struct GroupAccumulator {
    player_count: usize,
    games: usize,
    draws: usize,
    fool_counts: Vec<usize>,
    total_rounds: u64,
    max_rounds: u32,
}

impl GroupAccumulator {
    fn new(player_count: usize) -> Self {
        Self {
            player_count,
            games: 0,
            draws: 0,
            fool_counts: vec![0; player_count],
            total_rounds: 0,
            max_rounds: 0,
        }
    }

    fn record(&mut self, sample: GameSample) -> Result<(), AnalyticsError> {
        match sample.fool_seat {
            Some(seat) => {
                let slot =
                    self.fool_counts
                        .get_mut(seat)
                        .ok_or(AnalyticsError::SeatOutOfRange {
                            seat,
                            player_count: self.player_count,
                        })?;
                *slot += 1;
            }
            None => self.draws += 1,
        }
        self.games += 1;
        self.total_rounds += u64::from(sample.rounds);
        self.max_rounds = self.max_rounds.max(sample.rounds);
        Ok(())
    }

    fn into_report(self) -> PlayerCountReport {
        let mean_rounds = if self.games == 0 {
            0.0
        } else {
            self.total_rounds as f64 / self.games as f64
        };
        PlayerCountReport {
            player_count: self.player_count,
            games: self.games,
            draws: self.draws,
            fool_counts: self.fool_counts,
            mean_rounds,
            max_rounds: self.max_rounds,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlayerCountReport {
    pub player_count: usize,
    pub games: usize,
    pub draws: usize,
    pub fool_counts: Vec<usize>,
    pub mean_rounds: f64,
    pub max_rounds: u32,
}

impl PlayerCountReport {
    /// Share of games (draws included) in which `seat` ended as the fool.
    pub fn fool_share(&self, seat: usize) -> f64 {
        match (self.games, self.fool_counts.get(seat)) {
            (0, _) | (_, None) => 0.0,
            (games, Some(&count)) => count as f64 / games as f64,
        }
    }

    pub fn draw_share(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.draws as f64 / self.games as f64
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalyticsSummary {
    pub run_id: String,
    pub reports: Vec<PlayerCountReport>,
}

impl AnalyticsSummary {
    pub fn total_games(&self) -> usize {
        self.reports.iter().map(|report| report.games).sum()
    }

    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Simulation Summary\n\n");
        out.push_str(&format!("Run: `{}`\n", self.run_id));

        for report in &self.reports {
            out.push_str(&format!("\n## {} players\n\n", report.player_count));
            out.push_str(&format!(
                "Games: {} | Draws: {} ({:.1}%) | Mean rounds: {:.2} | Max rounds: {}\n\n",
                report.games,
                report.draws,
                report.draw_share() * 100.0,
                report.mean_rounds,
                report.max_rounds,
            ));
            out.push_str("| Seat | Fool | Fool % |\n");
            out.push_str("|------|------|--------|\n");
            for (seat, count) in report.fool_counts.iter().enumerate() {
                out.push_str(&format!(
                    "| {seat} | {count} | {share:.1}% |\n",
                    share = report.fool_share(seat) * 100.0,
                ));
            }
        }

        out
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        fs::write(path.as_ref(), self.render_markdown()).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(player_count: usize, rounds: u32, fool_seat: Option<usize>) -> GameSample {
        GameSample {
            player_count,
            rounds,
            fool_seat,
        }
    }

    #[test]
    fn aggregates_per_player_count() {
        let mut collector = AnalyticsCollector::new("unit", &[3, 2]);
        collector.record_game(sample(2, 14, Some(1))).unwrap();
        collector.record_game(sample(2, 10, None)).unwrap();
        collector.record_game(sample(3, 9, Some(0))).unwrap();

        let summary = collector.finalize();
        assert_eq!(summary.total_games(), 3);
        assert_eq!(summary.reports.len(), 2);

        let two = &summary.reports[0];
        assert_eq!(two.player_count, 2);
        assert_eq!(two.games, 2);
        assert_eq!(two.draws, 1);
        assert_eq!(two.fool_counts, vec![0, 1]);
        assert_eq!(two.max_rounds, 14);
        assert!((two.mean_rounds - 12.0).abs() < f64::EPSILON);
        assert!((two.fool_share(1) - 0.5).abs() < f64::EPSILON);

        let three = &summary.reports[1];
        assert_eq!(three.fool_counts, vec![1, 0, 0]);
        assert_eq!(three.draws, 0);
    }

    #[test]
    fn rejects_unconfigured_player_count() {
        let mut collector = AnalyticsCollector::new("unit", &[2]);
        let err = collector.record_game(sample(4, 3, None)).unwrap_err();
        assert!(matches!(err, AnalyticsError::UnknownPlayerCount(4)));
    }

    #[test]
    fn rejects_seat_outside_table() {
        let mut collector = AnalyticsCollector::new("unit", &[2]);
        let err = collector.record_game(sample(2, 3, Some(2))).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::SeatOutOfRange {
                seat: 2,
                player_count: 2
            }
        ));
    }

    #[test]
    fn empty_group_renders_zero_shares() {
        let summary = AnalyticsCollector::new("unit", &[4]).finalize();
        let report = &summary.reports[0];
        assert_eq!(report.fool_share(0), 0.0);
        assert_eq!(report.draw_share(), 0.0);

        let markdown = summary.render_markdown();
        assert!(markdown.contains("## 4 players"));
        assert!(markdown.contains("| 3 | 0 | 0.0% |"));
    }
}
