use super::table::KnowledgeTable;
use core::fmt;
use std::collections::BTreeMap;

/// Cards dealt to players in the standard game: 21 cards minus the 3 in the
/// solution envelope.
pub const DEALT_CARDS: usize = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandSizeError {
    UnsupportedPlayerCount(usize),
}

impl fmt::Display for HandSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandSizeError::UnsupportedPlayerCount(count) => {
                write!(f, "unsupported number of players: {count}")
            }
        }
    }
}

impl std::error::Error for HandSizeError {}

/// The hand sizes a single player can have, smallest first.
pub fn possible_hand_sizes(players: usize) -> Result<Vec<usize>, HandSizeError> {
    match players {
        3 => Ok(vec![6]),
        4 => Ok(vec![4, 5]),
        5 => Ok(vec![3, 4]),
        6 => Ok(vec![3]),
        other => Err(HandSizeError::UnsupportedPlayerCount(other)),
    }
}

/// Every per-player hand-size assignment that sums to exactly
/// [`DEALT_CARDS`].
pub fn valid_hand_size_combinations(players: usize) -> Result<Vec<Vec<usize>>, HandSizeError> {
    let sizes = possible_hand_sizes(players)?;
    let mut combinations = Vec::new();
    let mut current = Vec::with_capacity(players);
    collect_combinations(&sizes, players, &mut current, &mut combinations);
    Ok(combinations)
}

fn collect_combinations(
    sizes: &[usize],
    remaining: usize,
    current: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if remaining == 0 {
        if current.iter().sum::<usize>() == DEALT_CARDS {
            out.push(current.clone());
        }
        return;
    }
    for &size in sizes {
        current.push(size);
        collect_combinations(sizes, remaining - 1, current, out);
        current.pop();
    }
}

pub fn is_valid_hand_size_combination(hand_sizes: &BTreeMap<String, usize>) -> bool {
    hand_sizes.values().sum::<usize>() == DEALT_CARDS
}

/// If a player's full hand is known, no other card can be in it: every card
/// not among their confirmed holdings is marked `No` for them. A confirmed
/// `Yes` is never flipped.
pub fn deduce_full_hands(
    table: &KnowledgeTable,
    hand_sizes: &BTreeMap<String, usize>,
) -> KnowledgeTable {
    let mut next = table.clone();
    for (player, &hand_size) in hand_sizes {
        let known: Vec<String> = table
            .facts()
            .iter()
            .filter(|fact| fact.player_fact(player).is_yes())
            .map(|fact| fact.name().to_string())
            .collect();
        if known.len() != hand_size {
            continue;
        }
        for fact in next.facts_mut() {
            if known.iter().any(|name| name == fact.name()) {
                continue;
            }
            if !fact.player_fact(player).is_no() {
                fact.in_player_hand
                    .insert(player.clone(), super::fact::TriState::No);
                fact.likely_has.remove(player);
            }
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::fact::TriState;
    use crate::model::CardRegistry;

    #[test]
    fn hand_sizes_match_player_counts() {
        assert_eq!(possible_hand_sizes(3).unwrap(), [6]);
        assert_eq!(possible_hand_sizes(4).unwrap(), [4, 5]);
        assert_eq!(possible_hand_sizes(5).unwrap(), [3, 4]);
        assert_eq!(possible_hand_sizes(6).unwrap(), [3]);
        assert!(possible_hand_sizes(7).is_err());
    }

    #[test]
    fn three_player_combination_is_exact() {
        let combos = valid_hand_size_combinations(3).unwrap();
        assert_eq!(combos, vec![vec![6, 6, 6]]);
    }

    #[test]
    fn four_player_combinations_sum_to_dealt_cards() {
        let combos = valid_hand_size_combinations(4).unwrap();
        assert!(!combos.is_empty());
        for combo in &combos {
            assert_eq!(combo.iter().sum::<usize>(), DEALT_CARDS);
        }
    }

    #[test]
    fn combination_validity_checks_total() {
        let mut sizes = BTreeMap::new();
        sizes.insert("A".to_string(), 6);
        sizes.insert("B".to_string(), 6);
        sizes.insert("C".to_string(), 6);
        assert!(is_valid_hand_size_combination(&sizes));
        sizes.insert("C".to_string(), 5);
        assert!(!is_valid_hand_size_combination(&sizes));
    }

    #[test]
    fn full_hand_rules_out_every_other_card() {
        let registry = CardRegistry::new(
            vec!["S1".into(), "S2".into()],
            vec!["W1".into()],
            vec!["R1".into()],
        );
        let players = vec!["A".to_string(), "B".to_string()];
        let table = KnowledgeTable::initialize(&[], &registry, &players, "A");
        let table = table.mark_held("S1", "B");

        let mut hand_sizes = BTreeMap::new();
        hand_sizes.insert("B".to_string(), 1);
        let table = deduce_full_hands(&table, &hand_sizes);

        assert_eq!(table.fact("S1").unwrap().player_fact("B"), TriState::Yes);
        for card in ["S2", "W1", "R1"] {
            assert_eq!(table.fact(card).unwrap().player_fact("B"), TriState::No);
        }
    }

    #[test]
    fn partial_hand_deduces_nothing() {
        let registry = CardRegistry::new(
            vec!["S1".into(), "S2".into()],
            vec!["W1".into()],
            vec!["R1".into()],
        );
        let players = vec!["A".to_string(), "B".to_string()];
        let table = KnowledgeTable::initialize(&[], &registry, &players, "A");
        let table = table.mark_held("S1", "B");

        let mut hand_sizes = BTreeMap::new();
        hand_sizes.insert("B".to_string(), 2);
        let after = deduce_full_hands(&table, &hand_sizes);
        assert_eq!(table, after);
    }
}
