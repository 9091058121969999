use super::fact::{CardFact, TriState};
use crate::model::CardRegistry;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// The knowledge base: one row per registry card, one tri-state fact per
/// tracked player. Every mutator is copy-on-write; callers never observe
/// in-place mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeTable {
    facts: Vec<CardFact>,
    players: Vec<String>,
    current_user: String,
}

impl KnowledgeTable {
    /// An empty table: the "setup incomplete" value returned when
    /// initialization fails.
    pub fn empty() -> Self {
        Self {
            facts: Vec::new(),
            players: Vec::new(),
            current_user: String::new(),
        }
    }

    /// Builds the initial table from the local player's dealt hand.
    ///
    /// Returns an empty table (and logs why) when the registry is missing a
    /// category or no players were supplied. Hand cards absent from the
    /// registry are logged and excluded; duplicates collapse to one row.
    pub fn initialize(
        your_hand: &[String],
        registry: &CardRegistry,
        players: &[String],
        current_user: &str,
    ) -> Self {
        if !registry.is_complete() {
            warn!(
                missing = ?registry.missing_categories(),
                "registry is missing categories; knowledge table not created"
            );
            return Self::empty();
        }
        if players.is_empty() {
            warn!("no players provided; knowledge table not created");
            return Self::empty();
        }
        registry.check_names(your_hand, "your hand");

        let hand: BTreeSet<&str> = your_hand
            .iter()
            .filter(|card| registry.contains(card))
            .map(String::as_str)
            .collect();

        let facts = registry
            .iter_cards()
            .map(|card| {
                let in_your_hand = hand.contains(card.name.as_str());
                let mut in_player_hand = BTreeMap::new();
                for player in players {
                    let state = if player == current_user {
                        if in_your_hand {
                            TriState::Yes
                        } else {
                            TriState::No
                        }
                    } else if in_your_hand {
                        // A card in your hand can be in nobody else's.
                        TriState::No
                    } else {
                        TriState::Unknown
                    };
                    in_player_hand.insert(player.clone(), state);
                }
                CardFact {
                    card,
                    in_your_hand,
                    in_player_hand,
                    likely_has: BTreeSet::new(),
                    in_solution: if in_your_hand {
                        TriState::No
                    } else {
                        TriState::Unknown
                    },
                    eliminated_from_solution: in_your_hand,
                }
            })
            .collect();

        Self {
            facts,
            players: players.to_vec(),
            current_user: current_user.to_string(),
        }
    }

    pub fn facts(&self) -> &[CardFact] {
        &self.facts
    }

    pub fn fact(&self, card: &str) -> Option<&CardFact> {
        self.facts.iter().find(|fact| fact.name() == card)
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn current_user(&self) -> &str {
        &self.current_user
    }

    pub fn tracks_player(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    pub fn tracks_card(&self, card: &str) -> bool {
        self.fact(card).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Marks `card` as held by `player`: the single path by which a card's
    /// holder becomes certain. Every other tracked player is demoted to
    /// `No`, the card leaves the solution, and advisory flags clear.
    ///
    /// Unknown card or player: logged no-op returning the table unchanged.
    pub fn mark_held(&self, card: &str, player: &str) -> Self {
        if !self.validate_refs(card, player, "mark_held") {
            return self.clone();
        }
        let mut next = self.clone();
        for fact in &mut next.facts {
            if fact.name() != card {
                continue;
            }
            for (tracked, state) in fact.in_player_hand.iter_mut() {
                *state = if tracked == player {
                    TriState::Yes
                } else {
                    TriState::No
                };
            }
            if player == next.current_user {
                fact.in_your_hand = true;
            }
            fact.in_solution = TriState::No;
            fact.eliminated_from_solution = true;
            fact.likely_has.clear();
        }
        next
    }

    /// Marks `card` as definitely not held by `player`. Only that one cell
    /// changes; other players' facts and the solution state are untouched.
    pub fn mark_not_held(&self, card: &str, player: &str) -> Self {
        if !self.validate_refs(card, player, "mark_not_held") {
            return self.clone();
        }
        let mut next = self.clone();
        for fact in &mut next.facts {
            if fact.name() != card {
                continue;
            }
            fact.in_player_hand
                .insert(player.to_string(), TriState::No);
            fact.likely_has.remove(player);
        }
        next
    }

    /// Records the advisory "likely holds" flag. A fact already resolved in
    /// either direction is never overridden.
    pub fn mark_likely_held(&self, card: &str, player: &str) -> Self {
        if !self.validate_refs(card, player, "mark_likely_held") {
            return self.clone();
        }
        let mut next = self.clone();
        for fact in &mut next.facts {
            if fact.name() != card {
                continue;
            }
            if fact.player_fact(player).is_unknown() {
                fact.likely_has.insert(player.to_string());
            }
        }
        next
    }

    fn validate_refs(&self, card: &str, player: &str, operation: &str) -> bool {
        let mut valid = true;
        if !self.tracks_card(card) {
            warn!(card, operation, "card does not exist in the game");
            valid = false;
        }
        if !self.tracks_player(player) {
            warn!(player, operation, "player does not exist in the game");
            valid = false;
        }
        valid
    }

    pub(crate) fn facts_mut(&mut self) -> &mut Vec<CardFact> {
        &mut self.facts
    }
}
