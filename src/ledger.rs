//! Per-player action ledger grouped in first-appearance order

use std::collections::HashMap;
use crate::types::{Action, Player};

/// A parsed action record before grouping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub player_id: String,
    pub action: Action,
}

impl ActionRecord {
    pub fn new(player_id: impl Into<String>, action: Action) -> Self {
        Self { player_id: player_id.into(), action }
    }
}

/// Ordered per-player action sequences
///
/// Players keep the order in which their id first appeared, and each player's
/// actions keep file order. Nothing is reordered once grouped.
#[derive(Debug, Clone, Default)]
pub struct ActionLedger {
    players: Vec<Player>,
    index: HashMap<String, usize>,
}

impl ActionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group records by player id
    pub fn from_records(records: impl IntoIterator<Item = ActionRecord>) -> Self {
        let mut ledger = Self::new();
        for record in records {
            ledger.push(record);
        }
        ledger
    }

    /// Append one record to its player's sequence
    pub fn push(&mut self, record: ActionRecord) {
        match self.index.get(&record.player_id) {
            Some(&slot) => self.players[slot].actions.push(record.action),
            None => {
                self.index.insert(record.player_id.clone(), self.players.len());
                self.players.push(Player::new(record.player_id, vec![record.action]));
            }
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.index.get(player_id).map(|&slot| &self.players[slot])
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
}
