//! Immutable lookup of matches by identifier

use std::collections::HashMap;
use crate::types::Match;

/// Registry of every known match, built once before replay
#[derive(Debug, Clone, Default)]
pub struct MatchRegistry {
    matches: HashMap<String, Match>,
}

impl MatchRegistry {
    /// Build a registry from match records in file order
    ///
    /// When an id appears more than once the first record wins.
    pub fn new(records: impl IntoIterator<Item = Match>) -> Self {
        let mut matches = HashMap::new();
        for record in records {
            if matches.contains_key(&record.id) {
                log::warn!("duplicate match id {}, keeping the first record", record.id);
                continue;
            }
            matches.insert(record.id.clone(), record);
        }
        Self { matches }
    }

    /// Look up a match by id
    pub fn lookup(&self, match_id: &str) -> Option<&Match> {
        self.matches.get(match_id)
    }

    pub fn contains(&self, match_id: &str) -> bool {
        self.matches.contains_key(match_id)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl FromIterator<Match> for MatchRegistry {
    fn from_iter<I: IntoIterator<Item = Match>>(iter: I) -> Self {
        Self::new(iter)
    }
}
