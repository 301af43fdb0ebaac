//! Core traits for the casino audit

use crate::error::ValidationError;
use crate::match_registry::MatchRegistry;
use crate::types::{Action, BetOutcome};

/// Trait for rule sets that decide legality and settle bets
pub trait RuleSet: Send + Sync {
    /// Check whether an action may be applied to a balance
    fn validate(&self, action: &Action, balance: i64) -> Result<(), ValidationError>;

    /// Classify a bet against the match it references
    fn settle(&self, bet: &Action, registry: &MatchRegistry) -> BetOutcome;
}
