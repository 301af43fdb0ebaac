//! Standard balance rules for deposits, bets and withdrawals

use crate::error::ValidationError;
use crate::match_registry::MatchRegistry;
use crate::traits::RuleSet;
use crate::types::{Action, BetOutcome, Outcome};

/// The house rules: a Bet or Withdraw may never exceed the balance, winning
/// bets pay `stake * rate` truncated, losing bets forfeit the stake and draws
/// leave the balance alone
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl RuleSet for StandardRules {
    fn validate(&self, action: &Action, balance: i64) -> Result<(), ValidationError> {
        if !action.kind.draws_on_balance() {
            return Ok(());
        }
        if action.amount < 0 {
            return Err(ValidationError::NegativeAmount { amount: action.amount });
        }
        if action.amount > balance {
            return Err(ValidationError::InsufficientBalance {
                amount: action.amount,
                balance,
            });
        }
        Ok(())
    }

    fn settle(&self, bet: &Action, registry: &MatchRegistry) -> BetOutcome {
        let Some(m) = bet.match_id.as_deref().and_then(|id| registry.lookup(id)) else {
            return BetOutcome::UnknownMatch;
        };
        match (m.outcome, bet.side) {
            (Outcome::Won(winner), Some(side)) if winner == side => BetOutcome::Won {
                payout: m.payout(side, bet.amount),
            },
            (Outcome::Draw, _) => BetOutcome::Draw,
            _ => BetOutcome::Lost { stake: bet.amount },
        }
    }
}
