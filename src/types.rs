//! Core data types for the casino audit

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::error::ValidationError;

/// Kind of a ledger action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Deposit,
    Bet,
    Withdraw,
}

impl ActionKind {
    /// Parse the upper-case token used in action records
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "DEPOSIT" => Some(ActionKind::Deposit),
            "BET" => Some(ActionKind::Bet),
            "WITHDRAW" => Some(ActionKind::Withdraw),
            _ => None,
        }
    }

    /// Whether the action draws on the balance and must pass the legality check
    pub fn draws_on_balance(&self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Withdraw)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            ActionKind::Deposit => "DEPOSIT",
            ActionKind::Bet => "BET",
            ActionKind::Withdraw => "WITHDRAW",
        };
        f.write_str(token)
    }
}

/// Side of a match a bet is placed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "A" => Some(Side::A),
            "B" => Some(Side::B),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// Decided result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Won(Side),
    Draw,
}

impl Outcome {
    /// Parse the single result character of a match record
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Outcome::Won(Side::A)),
            'B' => Some(Outcome::Won(Side::B)),
            'D' => Some(Outcome::Draw),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

/// One ledger entry attributed to a player
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub match_id: Option<String>,
    pub amount: i64,
    pub side: Option<Side>,
}

impl Action {
    pub fn deposit(amount: i64) -> Self {
        Self { kind: ActionKind::Deposit, match_id: None, amount, side: None }
    }

    pub fn withdraw(amount: i64) -> Self {
        Self { kind: ActionKind::Withdraw, match_id: None, amount, side: None }
    }

    pub fn bet(match_id: impl Into<String>, amount: i64, side: Side) -> Self {
        Self {
            kind: ActionKind::Bet,
            match_id: Some(match_id.into()),
            amount,
            side: Some(side),
        }
    }

    /// Render the action the way the illegitimate section of the report lists it
    ///
    /// An absent match id renders empty, a zero amount and an absent side render
    /// as `null`.
    pub fn descriptor(&self) -> String {
        let amount = if self.amount != 0 {
            self.amount.to_string()
        } else {
            "null".to_string()
        };
        let side = self
            .side
            .map(|s| s.to_string())
            .unwrap_or_else(|| "null".to_string());
        format!(
            "{} {} {} {}",
            self.kind,
            self.match_id.as_deref().unwrap_or(""),
            amount,
            side
        )
    }
}

/// A wagering event with its payout multipliers and result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub rate_a: f64,
    pub rate_b: f64,
    pub outcome: Outcome,
}

impl Match {
    pub fn new(id: impl Into<String>, rate_a: f64, rate_b: f64, outcome: Outcome) -> Self {
        Self { id: id.into(), rate_a, rate_b, outcome }
    }

    pub fn rate_for(&self, side: Side) -> f64 {
        match side {
            Side::A => self.rate_a,
            Side::B => self.rate_b,
        }
    }

    /// Payout for a winning stake, truncated toward zero
    pub fn payout(&self, side: Side, amount: i64) -> i64 {
        (amount as f64 * self.rate_for(side)) as i64
    }
}

/// A player and their actions in file order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub actions: Vec<Action>,
}

impl Player {
    pub fn new(id: impl Into<String>, actions: Vec<Action>) -> Self {
        Self { id: id.into(), actions }
    }
}

/// Settlement class of a single bet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetOutcome {
    Won { payout: i64 },
    Lost { stake: i64 },
    Draw,
    UnknownMatch,
}

impl BetOutcome {
    pub fn is_win(&self) -> bool {
        matches!(self, BetOutcome::Won { .. })
    }

    /// Change to the player's balance when this bet is applied
    pub fn balance_delta(&self) -> i64 {
        match self {
            BetOutcome::Won { payout } => *payout,
            BetOutcome::Lost { stake } => stake.saturating_neg(),
            BetOutcome::Draw | BetOutcome::UnknownMatch => 0,
        }
    }

    /// Change to the casino's balance caused by this bet, widened so a
    /// house-wide total cannot overflow
    pub fn casino_delta(&self) -> i128 {
        -i128::from(self.balance_delta())
    }
}

/// Compliance verdict of a replayed player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Compliant,
    Violated {
        index: usize,
        action: Action,
        reason: ValidationError,
    },
}

/// One applied action and the balance it moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceTransition {
    pub index: usize,
    pub kind: ActionKind,
    pub from: i64,
    pub to: i64,
}

/// Trace of a single player's replay for audit purposes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayTrace {
    pub actions_applied: usize,
    pub transitions: Vec<BalanceTransition>,
}

/// Result of replaying one player's actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerReplay {
    pub player_id: String,
    pub final_balance: i64,
    pub verdict: Verdict,
    /// Settlement of every bet in the full action list, in list order,
    /// including bets past a violation
    pub bet_outcomes: Vec<BetOutcome>,
    pub trace: ReplayTrace,
}

impl PlayerReplay {
    pub fn is_compliant(&self) -> bool {
        matches!(self.verdict, Verdict::Compliant)
    }

    pub fn first_violation(&self) -> Option<&Action> {
        match &self.verdict {
            Verdict::Compliant => None,
            Verdict::Violated { action, .. } => Some(action),
        }
    }
}
