use super::fact::{CardFact, TriState};
use super::table::KnowledgeTable;
use crate::model::Category;
use tracing::debug;

/// Promotes cards to "definitely in solution" wherever the table justifies
/// it, then propagates the consequences. Pure and idempotent; never
/// un-resolves a card.
///
/// A card enters the solution on either ground:
/// - elimination by exhaustion: the card is not in your hand and every
///   tracked player is confirmed not to hold it, or
/// - category exhaustion: every other card of its category is confirmed to
///   be in some hand.
///
/// Once a category's solution is known, every other card in that category
/// is eliminated from the solution and the solution card is confirmed out
/// of every hand.
pub fn infer_solution(table: &KnowledgeTable) -> KnowledgeTable {
    let mut next = table.clone();
    let mut resolved: Vec<(String, Category)> = Vec::new();

    for category in Category::ALL {
        let in_category: Vec<&CardFact> = table
            .facts()
            .iter()
            .filter(|fact| fact.category() == category)
            .collect();

        // Category exhaustion only means anything with at least two cards.
        if in_category.len() > 1 {
            let unheld: Vec<&CardFact> = in_category
                .iter()
                .copied()
                .filter(|fact| !fact.held_by_someone())
                .collect();
            if let [last] = unheld.as_slice() {
                if !last.in_your_hand {
                    resolved.push((last.name().to_string(), category));
                }
            }
        }

        for fact in &in_category {
            let all_players_no = fact
                .in_player_hand
                .values()
                .all(|state| state.is_no());
            if !fact.in_your_hand && !fact.held_by_someone() && all_players_no {
                resolved.push((fact.name().to_string(), category));
            }
        }
    }

    resolved.dedup();
    for (name, category) in &resolved {
        debug!(card = %name, category = %category, "card resolved into the solution");
        for fact in next.facts_mut() {
            if fact.category() != *category {
                continue;
            }
            if fact.name() == name {
                fact.in_solution = TriState::Yes;
                fact.eliminated_from_solution = false;
                for state in fact.in_player_hand.values_mut() {
                    *state = TriState::No;
                }
                fact.likely_has.clear();
            } else {
                fact.in_solution = TriState::No;
                fact.eliminated_from_solution = true;
            }
        }
    }

    next
}

/// Once a category's solution is known, any other card of that category
/// must be in some hand. If all players but one are confirmed not to hold
/// such a card, the remaining player must hold it.
pub fn resolve_last_possible_holders(table: &KnowledgeTable) -> KnowledgeTable {
    let mut next = table.clone();
    for category in Category::ALL {
        let solution_known = table
            .facts()
            .iter()
            .any(|fact| fact.category() == category && fact.in_solution.is_yes());
        if !solution_known {
            continue;
        }
        let pending: Vec<(String, String)> = table
            .facts()
            .iter()
            .filter(|fact| fact.category() == category && !fact.in_solution.is_yes())
            .filter_map(|fact| {
                let possible: Vec<&String> = fact
                    .in_player_hand
                    .iter()
                    .filter(|(_, state)| !state.is_no())
                    .map(|(player, _)| player)
                    .collect();
                match possible.as_slice() {
                    [only] => Some((fact.name().to_string(), (*only).clone())),
                    _ => None,
                }
            })
            .collect();
        for (card, player) in pending {
            next = next.mark_held(&card, &player);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::{infer_solution, resolve_last_possible_holders};
    use crate::knowledge::fact::TriState;
    use crate::knowledge::table::KnowledgeTable;
    use crate::model::CardRegistry;

    fn registry() -> CardRegistry {
        CardRegistry::new(
            vec!["S1".into(), "S2".into()],
            vec!["W1".into()],
            vec!["R1".into(), "R2".into()],
        )
    }

    fn players() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    #[test]
    fn card_nobody_holds_enters_solution() {
        let table = KnowledgeTable::initialize(&[], &registry(), &players(), "A");
        let table = table.mark_not_held("W1", "B").mark_not_held("W1", "C");
        let table = infer_solution(&table);
        let fact = table.fact("W1").unwrap();
        assert_eq!(fact.in_solution, TriState::Yes);
        assert!(!fact.eliminated_from_solution);
    }

    #[test]
    fn solution_card_leaves_every_hand() {
        let table = KnowledgeTable::initialize(&[], &registry(), &players(), "A");
        let table = table.mark_not_held("W1", "B").mark_not_held("W1", "C");
        let table = infer_solution(&table);
        let fact = table.fact("W1").unwrap();
        assert!(fact.in_player_hand.values().all(|state| state.is_no()));
    }

    #[test]
    fn category_exhaustion_resolves_the_remainder() {
        let table = KnowledgeTable::initialize(&[], &registry(), &players(), "A");
        let table = table.mark_held("S1", "B");
        let table = infer_solution(&table);
        let fact = table.fact("S2").unwrap();
        assert_eq!(fact.in_solution, TriState::Yes);
        assert_eq!(table.fact("S1").unwrap().in_solution, TriState::No);
    }

    #[test]
    fn hand_card_never_enters_solution() {
        let table = KnowledgeTable::initialize(&["W1".into()], &registry(), &players(), "A");
        let table = infer_solution(&table);
        assert_eq!(table.fact("W1").unwrap().in_solution, TriState::No);
    }

    #[test]
    fn inference_is_idempotent() {
        let table = KnowledgeTable::initialize(&[], &registry(), &players(), "A");
        let table = table.mark_not_held("W1", "B").mark_not_held("W1", "C");
        let once = infer_solution(&table);
        let twice = infer_solution(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn unresolved_cards_stay_unknown() {
        let table = KnowledgeTable::initialize(&[], &registry(), &players(), "A");
        let table = infer_solution(&table);
        assert_eq!(table.fact("R1").unwrap().in_solution, TriState::Unknown);
    }

    #[test]
    fn known_solution_pins_the_last_possible_holder() {
        let table = KnowledgeTable::initialize(&[], &registry(), &players(), "A");
        // R1 is the solution; R2 is ruled out for everyone but C.
        let table = table
            .mark_not_held("R1", "B")
            .mark_not_held("R1", "C")
            .mark_not_held("R2", "B");
        let table = infer_solution(&table);
        assert_eq!(table.fact("R1").unwrap().in_solution, TriState::Yes);

        let table = resolve_last_possible_holders(&table);
        assert_eq!(table.fact("R2").unwrap().player_fact("C"), TriState::Yes);
        assert_eq!(table.fact("R2").unwrap().in_solution, TriState::No);
    }
}
