//! Balance processor that applies actions one at a time and traces each step

use crate::error::ValidationError;
use crate::traits::RuleSet;
use crate::types::{Action, ActionKind, BalanceTransition, BetOutcome, ReplayTrace};

/// First action the processor refused, with its position in the sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub index: usize,
    pub reason: ValidationError,
}

/// Running balance of one player with its execution trace
#[derive(Debug, Clone, Default)]
pub struct BalanceProcessor {
    balance: i64,
    trace: ReplayTrace,
}

impl BalanceProcessor {
    /// Create a processor starting from a zero balance
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single action
    ///
    /// `settlement` is the pre-classified result of the action when it is a bet.
    /// A rejected action leaves the balance and trace untouched, including one
    /// whose result would not fit the balance.
    pub fn process_action<R: RuleSet + ?Sized>(
        &mut self,
        index: usize,
        action: &Action,
        settlement: Option<BetOutcome>,
        rules: &R,
    ) -> Result<BalanceTransition, ValidationError> {
        rules.validate(action, self.balance)?;

        let from = self.balance;
        let delta = match action.kind {
            ActionKind::Deposit => action.amount,
            ActionKind::Withdraw => action.amount.saturating_neg(),
            ActionKind::Bet => settlement.map_or(0, |outcome| outcome.balance_delta()),
        };
        let to = from
            .checked_add(delta)
            .ok_or(ValidationError::BalanceOverflow { balance: from, delta })?;

        let transition = BalanceTransition { index, kind: action.kind, from, to };
        self.balance = to;
        self.trace.transitions.push(transition);
        self.trace.actions_applied += 1;

        Ok(transition)
    }

    /// Apply a sequence of actions, halting at the first illegal one
    ///
    /// `settlements` is aligned with `actions`. Actions after a rejection are
    /// never applied.
    pub fn process_actions<R: RuleSet + ?Sized>(
        &mut self,
        actions: &[Action],
        settlements: &[Option<BetOutcome>],
        rules: &R,
    ) -> Result<(), Rejection> {
        for (index, action) in actions.iter().enumerate() {
            let settlement = settlements.get(index).copied().flatten();
            self.process_action(index, action, settlement, rules)
                .map_err(|reason| Rejection { index, reason })?;
        }
        Ok(())
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn trace(&self) -> &ReplayTrace {
        &self.trace
    }

    pub fn actions_applied(&self) -> usize {
        self.trace.actions_applied
    }

    /// Consume the processor and return the final balance and trace
    pub fn into_result(self) -> (i64, ReplayTrace) {
        (self.balance, self.trace)
    }
}
