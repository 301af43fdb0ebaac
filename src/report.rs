//! Report builder deriving win rates, violations and the casino balance delta

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::types::{Action, PlayerReplay, Verdict};

/// A compliant player's line in the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegitimateEntry {
    pub player_id: String,
    pub balance: i64,
    pub win_rate: f64,
}

/// A non-compliant player's line in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllegitimateEntry {
    pub player_id: String,
    pub violation: Action,
    pub descriptor: String,
}

/// The three-section audit report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub legitimate: Vec<LegitimateEntry>,
    pub illegitimate: Vec<IllegitimateEntry>,
    pub casino_delta: i128,
}

impl AuditReport {
    /// Render the report as written to the results file
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.legitimate.is_empty() {
            writeln!(f)?;
        }
        for entry in &self.legitimate {
            writeln!(
                f,
                "{} {} {}",
                entry.player_id,
                entry.balance,
                format_rate(entry.win_rate)
            )?;
        }
        writeln!(f)?;

        if self.illegitimate.is_empty() {
            writeln!(f)?;
        }
        for entry in &self.illegitimate {
            writeln!(f, "{} {}", entry.player_id, entry.descriptor)?;
        }
        writeln!(f)?;

        write!(f, "{}", self.casino_delta)
    }
}

/// Builds reports from replay results
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the report, keeping the order of `replays`
    pub fn build(&self, replays: &[PlayerReplay]) -> AuditReport {
        let mut legitimate = Vec::new();
        let mut illegitimate = Vec::new();

        for replay in replays {
            match (&replay.verdict, self.violation_descriptor(replay)) {
                (Verdict::Violated { action, .. }, Some(descriptor)) => {
                    illegitimate.push(IllegitimateEntry {
                        player_id: replay.player_id.clone(),
                        violation: action.clone(),
                        descriptor,
                    })
                }
                _ => legitimate.push(LegitimateEntry {
                    player_id: replay.player_id.clone(),
                    balance: replay.final_balance,
                    win_rate: self.win_rate(replay),
                }),
            }
        }

        let casino_delta = self.casino_delta(replays);
        log::info!(
            "report built: {} legitimate, {} illegitimate, casino delta {}",
            legitimate.len(),
            illegitimate.len(),
            casino_delta
        );

        AuditReport {
            legitimate,
            illegitimate,
            casino_delta,
        }
    }

    /// Share of won bets over every bet in the player's full action list,
    /// rounded to two decimals; 0.0 without bets
    pub fn win_rate(&self, replay: &PlayerReplay) -> f64 {
        let total = replay.bet_outcomes.len();
        if total == 0 {
            return 0.0;
        }
        let won = replay.bet_outcomes.iter().filter(|o| o.is_win()).count();
        round_to_hundredths(won as f64 / total as f64)
    }

    /// Descriptor of the first illegal action, if the player has one
    pub fn violation_descriptor(&self, replay: &PlayerReplay) -> Option<String> {
        replay.first_violation().map(Action::descriptor)
    }

    /// Net house result over every bet of every player, applied or not
    pub fn casino_delta(&self, replays: &[PlayerReplay]) -> i128 {
        replays
            .iter()
            .flat_map(|replay| replay.bet_outcomes.iter())
            .map(|outcome| outcome.casino_delta())
            .sum()
    }
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a rate with at least one fractional digit
pub fn format_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{:.1}", rate)
    } else {
        rate.to_string()
    }
}
