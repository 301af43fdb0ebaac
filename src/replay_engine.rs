//! Replay engine that folds each player's actions into a balance and verdict

use crate::match_registry::MatchRegistry;
use crate::processor::BalanceProcessor;
use crate::rules::StandardRules;
use crate::traits::RuleSet;
use crate::types::{Action, ActionKind, BetOutcome, Player, PlayerReplay, Verdict};
use rayon::prelude::*;

/// Replay engine for auditing player ledgers against match results
#[derive(Debug)]
pub struct ReplayEngine<R: RuleSet> {
    registry: MatchRegistry,
    rules: R,
    parallel: bool,
}

impl ReplayEngine<StandardRules> {
    /// Engine using the standard house rules, replaying sequentially
    pub fn standard(registry: MatchRegistry) -> Self {
        Self::new(registry, StandardRules)
    }
}

impl<R: RuleSet> ReplayEngine<R> {
    /// Create a new replay engine with the specified registry and rule set
    pub fn new(registry: MatchRegistry, rules: R) -> Self {
        Self {
            registry,
            rules,
            parallel: false,
        }
    }

    /// Toggle replaying players on the rayon thread pool
    pub fn in_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create a builder for constructing a replay engine
    pub fn builder() -> ReplayEngineBuilder<R> {
        ReplayEngineBuilder::new()
    }

    /// Replay one player's actions from a zero balance
    ///
    /// Every bet in the full action list is settled up front so reporting can
    /// use the same classification; only the replayed prefix moves the balance.
    pub fn replay(&self, player: &Player) -> PlayerReplay {
        let settlements: Vec<Option<BetOutcome>> = player
            .actions
            .iter()
            .map(|action| match action.kind {
                ActionKind::Bet => Some(self.settle(action)),
                _ => None,
            })
            .collect();

        let mut processor = BalanceProcessor::new();
        let verdict = match processor.process_actions(&player.actions, &settlements, &self.rules) {
            Ok(()) => Verdict::Compliant,
            Err(rejection) => {
                log::debug!(
                    "player {} halted at action {}: {}",
                    player.id,
                    rejection.index,
                    rejection.reason
                );
                Verdict::Violated {
                    index: rejection.index,
                    action: player.actions[rejection.index].clone(),
                    reason: rejection.reason,
                }
            }
        };

        let (final_balance, trace) = processor.into_result();
        log::debug!(
            "player {} replayed {}/{} actions, balance {}",
            player.id,
            trace.actions_applied,
            player.actions.len(),
            final_balance
        );

        PlayerReplay {
            player_id: player.id.clone(),
            final_balance,
            verdict,
            bet_outcomes: settlements.into_iter().flatten().collect(),
            trace,
        }
    }

    /// Replay every player, returning results in the players' order
    pub fn replay_all(&self, players: &[Player]) -> Vec<PlayerReplay> {
        if self.parallel {
            players.par_iter().map(|player| self.replay(player)).collect()
        } else {
            players.iter().map(|player| self.replay(player)).collect()
        }
    }

    fn settle(&self, bet: &Action) -> BetOutcome {
        let outcome = self.rules.settle(bet, &self.registry);
        if outcome == BetOutcome::UnknownMatch {
            log::warn!(
                "bet references unknown match {}, treated as a no-op",
                bet.match_id.as_deref().unwrap_or("<none>")
            );
        }
        outcome
    }

    pub fn registry(&self) -> &MatchRegistry {
        &self.registry
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }
}

/// Builder for constructing replay engines with a fluent API
pub struct ReplayEngineBuilder<R: RuleSet> {
    registry: Option<MatchRegistry>,
    rules: Option<R>,
    parallel: bool,
}

impl<R: RuleSet> ReplayEngineBuilder<R> {
    pub fn new() -> Self {
        Self {
            registry: None,
            rules: None,
            parallel: false,
        }
    }

    pub fn with_registry(mut self, registry: MatchRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_rules(mut self, rules: R) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Replay players on the rayon thread pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn build(self) -> Result<ReplayEngine<R>, String> {
        let registry = self.registry.ok_or("Match registry is required")?;
        let rules = self.rules.ok_or("Rule set is required")?;

        Ok(ReplayEngine::new(registry, rules).in_parallel(self.parallel))
    }
}

impl<R: RuleSet> Default for ReplayEngineBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}
