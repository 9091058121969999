use crate::model::{Card, Category};
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Certainty about whether a player holds a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriState {
    Yes,
    No,
    Unknown,
}

impl TriState {
    pub const fn is_yes(self) -> bool {
        matches!(self, TriState::Yes)
    }

    pub const fn is_no(self) -> bool {
        matches!(self, TriState::No)
    }

    pub const fn is_unknown(self) -> bool {
        matches!(self, TriState::Unknown)
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TriState::Yes => "yes",
            TriState::No => "no",
            TriState::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// One row of the knowledge table: everything known about a single card.
///
/// Invariant: at most one player's entry in `in_player_hand` is `Yes` at any
/// time. The mutator that promotes a player to `Yes` demotes every other
/// tracked player to `No` in the same step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFact {
    pub card: Card,
    /// Set once at initialization for cards dealt to the local player.
    pub in_your_hand: bool,
    pub in_player_hand: BTreeMap<String, TriState>,
    /// Advisory flags: players heuristically believed to hold the card.
    /// Never treated as certain knowledge; cleared once the holder resolves.
    pub likely_has: BTreeSet<String>,
    pub in_solution: TriState,
    pub eliminated_from_solution: bool,
}

impl CardFact {
    pub fn name(&self) -> &str {
        &self.card.name
    }

    pub fn category(&self) -> Category {
        self.card.category
    }

    pub fn player_fact(&self, player: &str) -> TriState {
        self.in_player_hand
            .get(player)
            .copied()
            .unwrap_or(TriState::Unknown)
    }

    /// True when some tracked player is confirmed to hold the card.
    pub fn held_by_someone(&self) -> bool {
        self.in_player_hand.values().any(|state| state.is_yes())
    }

    /// The confirmed holder, if any.
    pub fn holder(&self) -> Option<&str> {
        self.in_player_hand
            .iter()
            .find(|(_, state)| state.is_yes())
            .map(|(player, _)| player.as_str())
    }

    /// True when the card's location teaches the local player nothing new:
    /// it is in their own hand, confirmed in the solution, or confirmed in
    /// one specific other hand.
    pub fn fully_resolved(&self) -> bool {
        self.in_your_hand || self.in_solution.is_yes() || self.held_by_someone()
    }
}

#[cfg(test)]
mod tests {
    use super::{CardFact, TriState};
    use crate::model::{Card, Category};
    use std::collections::{BTreeMap, BTreeSet};

    fn fact(states: &[(&str, TriState)]) -> CardFact {
        let mut in_player_hand = BTreeMap::new();
        for (player, state) in states {
            in_player_hand.insert((*player).to_string(), *state);
        }
        CardFact {
            card: Card::new("Rope", Category::Weapon),
            in_your_hand: false,
            in_player_hand,
            likely_has: BTreeSet::new(),
            in_solution: TriState::Unknown,
            eliminated_from_solution: false,
        }
    }

    #[test]
    fn untracked_player_reads_unknown() {
        let fact = fact(&[("Alice", TriState::No)]);
        assert_eq!(fact.player_fact("Alice"), TriState::No);
        assert_eq!(fact.player_fact("Nobody"), TriState::Unknown);
    }

    #[test]
    fn holder_found_when_marked_yes() {
        let fact = fact(&[("Alice", TriState::Yes), ("Bob", TriState::No)]);
        assert_eq!(fact.holder(), Some("Alice"));
        assert!(fact.held_by_someone());
        assert!(fact.fully_resolved());
    }

    #[test]
    fn unresolved_card_is_not_fully_resolved() {
        let fact = fact(&[("Alice", TriState::Unknown)]);
        assert!(!fact.fully_resolved());
    }
}
