use crate::weights::ScoreWeights;
use sleuth_core::game::GameState;
use sleuth_core::model::Guess;
use tracing::warn;

/// A guessed card's status from the local player's viewpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardStatus {
    InYourHand,
    KnownInSolution,
    /// Definitely in this specific other player's hand.
    KnownInHand(String),
    /// Suspected (advisory) to be in this player's hand.
    LikelyInHand(String),
    Unresolved,
}

impl CardStatus {
    /// True when the card's location is certain and the guess can teach the
    /// player nothing about it.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            CardStatus::InYourHand | CardStatus::KnownInSolution | CardStatus::KnownInHand(_)
        )
    }
}

/// Classifies `card` against the knowledge table. `None` for a card the
/// table does not track.
pub fn classify(card: &str, state: &GameState) -> Option<CardStatus> {
    let fact = state.knowledge.fact(card)?;
    if fact.in_your_hand {
        return Some(CardStatus::InYourHand);
    }
    if fact.in_solution.is_yes() {
        return Some(CardStatus::KnownInSolution);
    }
    if let Some(holder) = fact.holder() {
        return Some(CardStatus::KnownInHand(holder.to_string()));
    }
    if let Some(player) = fact.likely_has.iter().next() {
        return Some(CardStatus::LikelyInHand(player.clone()));
    }
    Some(CardStatus::Unresolved)
}

/// Scores one candidate guess. Deterministic and pure; higher is better.
///
/// Returns exactly `0.0` when every guessed card is already resolved: such
/// a guess cannot teach the player anything, whatever the weights.
pub fn score_guess(guess: &Guess, state: &GameState, weights: &ScoreWeights) -> f64 {
    let statuses: Vec<CardStatus> = match guess
        .cards()
        .iter()
        .map(|card| classify(card, state))
        .collect()
    {
        Some(statuses) => statuses,
        None => {
            warn!(guess = %guess, "guess names a card unknown to the table; scored 0");
            return 0.0;
        }
    };

    if statuses.iter().all(CardStatus::is_resolved) {
        return 0.0;
    }

    let mut score = 0.0;
    for status in &statuses {
        match status {
            CardStatus::KnownInHand(_) => {
                score += weights.penalty_definitely_in_other_hands;
            }
            CardStatus::LikelyInHand(_) => {
                score += weights.penalty_likely_in_other_hands;
            }
            _ => {}
        }
    }

    // Guessing a room from your own hand cannot produce a misleading
    // non-response for the room, so it safely probes the other two cards.
    let unresolved = statuses
        .iter()
        .filter(|status| !status.is_resolved())
        .count();
    let room_status = &statuses[2];
    if *room_status == CardStatus::InYourHand && unresolved >= 2 {
        score += weights.strategic_value_multiplier * weights.strategic_elimination_bonus;
    }

    score += entropy_estimate(&statuses, weights)
        * weights.entropy_weight
        * weights.information_bonus_weight;

    score
}

/// Shannon entropy over the per-card probability masses implied by status.
fn entropy_estimate(statuses: &[CardStatus], weights: &ScoreWeights) -> f64 {
    let masses: Vec<f64> = statuses
        .iter()
        .map(|status| match status {
            CardStatus::Unresolved => weights.probability_definitely_known,
            CardStatus::LikelyInHand(_) => weights.probability_likely,
            _ => weights.probability_unlikely,
        })
        .collect();
    let total: f64 = masses.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    masses
        .iter()
        .filter(|mass| **mass > 0.0)
        .map(|mass| {
            let p = mass / total;
            -p * p.log2()
        })
        .sum()
}
