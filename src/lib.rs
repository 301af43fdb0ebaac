//! Casino ledger audit
//!
//! Replays each player's deposits, bets and withdrawals against match results,
//! separates players who kept to the balance rules from those who broke them,
//! and reports the casino's net result.

pub mod audit;
pub mod config;
pub mod error;
pub mod ledger;
pub mod loader;
pub mod match_registry;
pub mod processor;
pub mod replay_engine;
pub mod report;
pub mod rules;
pub mod traits;
pub mod types;

// Re-export core types and traits
pub use audit::{audit, run};
pub use config::AuditConfig;
pub use error::{AuditError, ConfigError, ParseError, ValidationError};
pub use ledger::{ActionLedger, ActionRecord};
pub use match_registry::MatchRegistry;
pub use processor::{BalanceProcessor, Rejection};
pub use replay_engine::{ReplayEngine, ReplayEngineBuilder};
pub use report::{AuditReport, IllegitimateEntry, LegitimateEntry, ReportBuilder};
pub use rules::StandardRules;
pub use traits::RuleSet;
pub use types::{
    Action, ActionKind, BalanceTransition, BetOutcome, Match, Outcome, Player, PlayerReplay,
    ReplayTrace, Side, Verdict,
};
