use crate::knowledge::KnowledgeTable;
use crate::model::{Category, Guess};
use serde::{Deserialize, Serialize};

/// A place a card can be, consistent with current knowledge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardLocation {
    Player(String),
    Solution,
}

/// Everything the search layer reads: the knowledge table, the turn order,
/// and the triples guessed so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub knowledge: KnowledgeTable,
    pub player_order: Vec<String>,
    pub previous_guesses: Vec<Guess>,
}

impl GameState {
    pub fn new(
        knowledge: KnowledgeTable,
        player_order: Vec<String>,
        previous_guesses: Vec<Guess>,
    ) -> Self {
        Self {
            knowledge,
            player_order,
            previous_guesses,
        }
    }

    /// Every location `card` could still occupy. A card confirmed in the
    /// solution has exactly one; a card the table does not know is
    /// unconstrained.
    pub fn possible_card_locations(&self, card: &str) -> Vec<CardLocation> {
        let Some(fact) = self.knowledge.fact(card) else {
            let mut locations: Vec<CardLocation> = self
                .player_order
                .iter()
                .map(|player| CardLocation::Player(player.clone()))
                .collect();
            locations.push(CardLocation::Solution);
            return locations;
        };
        if fact.in_solution.is_yes() {
            return vec![CardLocation::Solution];
        }
        let mut locations: Vec<CardLocation> = self
            .player_order
            .iter()
            .filter(|player| !fact.player_fact(player).is_no())
            .map(|player| CardLocation::Player(player.clone()))
            .collect();
        if !fact.in_solution.is_no() {
            locations.push(CardLocation::Solution);
        }
        locations
    }

    /// Cards of `category` that could still be the solution.
    pub fn solution_candidates(&self, category: Category) -> Vec<&str> {
        self.knowledge
            .facts()
            .iter()
            .filter(|fact| fact.category() == category)
            .filter(|fact| {
                self.possible_card_locations(fact.name())
                    .contains(&CardLocation::Solution)
            })
            .map(|fact| fact.name())
            .collect()
    }

    /// Shannon entropy of the solution under a uniform distribution over
    /// the remaining suspect/weapon/room combinations. Zero when no
    /// combination remains (degenerate input) or exactly one does.
    pub fn solution_entropy(&self) -> f64 {
        let combinations = Category::ALL
            .iter()
            .map(|category| self.solution_candidates(*category).len())
            .product::<usize>();
        if combinations == 0 {
            return 0.0;
        }
        (combinations as f64).log2()
    }
}
