use crate::deduction::update_knowledge_with_deductions;
use crate::knowledge::KnowledgeTable;
use crate::ledger::{GuessEvent, GuessLedger};
use crate::model::Guess;
use std::collections::BTreeMap;
use tracing::warn;

/// One guess/response observation, as collected by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResponse {
    pub guess: Guess,
    pub guessed_by: String,
    /// `None` when nobody showed a card.
    pub shown_by: Option<String>,
    /// Players consulted, in turn order, exclusive of the guesser.
    pub asked_players: Vec<String>,
}

/// Records a guess response: appends the event to the ledger, marks the
/// immediate non-holders, then re-derives knowledge from the full ledger.
///
/// Any unknown player or card in the response makes the whole operation a
/// logged no-op returning the inputs unchanged.
pub fn record_response(
    ledger: &GuessLedger,
    table: &KnowledgeTable,
    response: &GuessResponse,
    hand_sizes: Option<&BTreeMap<String, usize>>,
) -> (GuessLedger, KnowledgeTable) {
    if !validate(table, response) {
        return (ledger.clone(), table.clone());
    }

    let event = GuessEvent::new(
        response.guess.clone(),
        response.guessed_by.clone(),
        response.shown_by.clone(),
        response.asked_players.clone(),
    );
    let ledger = ledger.append(event);

    // Every asked player other than the shower had nothing to show.
    let mut table = table.clone();
    for player in &response.asked_players {
        if response.shown_by.as_deref() == Some(player.as_str()) {
            continue;
        }
        for card in response.guess.cards() {
            table = table.mark_not_held(card, player);
        }
    }

    let table = update_knowledge_with_deductions(&table, &ledger, hand_sizes);
    (ledger, table)
}

fn validate(table: &KnowledgeTable, response: &GuessResponse) -> bool {
    let mut valid = true;
    if !table.tracks_player(&response.guessed_by) {
        warn!(player = %response.guessed_by, "guesser does not exist in the game");
        valid = false;
    }
    for player in &response.asked_players {
        if !table.tracks_player(player) {
            warn!(player = %player, "asked player does not exist in the game");
            valid = false;
        }
    }
    if let Some(shower) = &response.shown_by {
        if !table.tracks_player(shower) {
            warn!(player = %shower, "shower does not exist in the game");
            valid = false;
        }
    }
    for card in response.guess.cards() {
        if !table.tracks_card(card) {
            warn!(card, "guessed card does not exist in the game");
            valid = false;
        }
    }
    valid
}

#[cfg(test)]
mod tests {
    use super::{GuessResponse, record_response};
    use crate::knowledge::{KnowledgeTable, TriState};
    use crate::ledger::{GuessLedger, NO_RESPONSE};
    use crate::model::{CardRegistry, Guess};

    fn registry() -> CardRegistry {
        CardRegistry::new(
            vec!["S1".into(), "S2".into()],
            vec!["W1".into(), "W2".into()],
            vec!["R1".into(), "R2".into()],
        )
    }

    fn setup() -> (GuessLedger, KnowledgeTable) {
        let players = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        (
            GuessLedger::new(),
            KnowledgeTable::initialize(&[], &registry(), &players, "A"),
        )
    }

    fn response(shown_by: Option<&str>) -> GuessResponse {
        GuessResponse {
            guess: Guess::new("S1", "W1", "R1"),
            guessed_by: "A".into(),
            shown_by: shown_by.map(String::from),
            asked_players: vec!["B".into(), "C".into()],
        }
    }

    #[test]
    fn no_response_marks_every_asked_player() {
        let (ledger, table) = setup();
        let (ledger, table) = record_response(&ledger, &table, &response(None), None);
        assert!(ledger.group(NO_RESPONSE).is_some());
        for player in ["B", "C"] {
            for card in ["S1", "W1", "R1"] {
                assert_eq!(table.fact(card).unwrap().player_fact(player), TriState::No);
            }
        }
    }

    #[test]
    fn response_spares_the_shower() {
        let (ledger, table) = setup();
        let (ledger, table) = record_response(&ledger, &table, &response(Some("C")), None);
        assert_eq!(ledger.group("C").unwrap().events.len(), 1);
        // B was asked before C and had nothing to show.
        assert_eq!(table.fact("S1").unwrap().player_fact("B"), TriState::No);
        // C showed one of the three; analysis marks them all likely.
        assert!(table.fact("S1").unwrap().likely_has.contains("C"));
        assert_eq!(
            table.fact("S1").unwrap().player_fact("C"),
            TriState::Unknown
        );
    }

    #[test]
    fn narrowing_responses_promote_certain_facts() {
        let (ledger, table) = setup();
        let table = table.mark_not_held("S1", "B").mark_not_held("W1", "B");
        let shown = GuessResponse {
            asked_players: vec!["B".into()],
            ..response(Some("B"))
        };
        let (_, table) = record_response(&ledger, &table, &shown, None);
        let fact = table.fact("R1").unwrap();
        assert_eq!(fact.player_fact("B"), TriState::Yes);
        assert_eq!(fact.in_solution, TriState::No);
    }

    #[test]
    fn invalid_player_makes_record_a_no_op() {
        let (ledger, table) = setup();
        let bad = GuessResponse {
            guessed_by: "Nobody".into(),
            ..response(Some("B"))
        };
        let (ledger_after, table_after) = record_response(&ledger, &table, &bad, None);
        assert!(ledger_after.is_empty());
        assert_eq!(table_after, table);
    }

    #[test]
    fn invalid_card_makes_record_a_no_op() {
        let (ledger, table) = setup();
        let bad = GuessResponse {
            guess: Guess::new("Ghost", "W1", "R1"),
            ..response(None)
        };
        let (ledger_after, table_after) = record_response(&ledger, &table, &bad, None);
        assert!(ledger_after.is_empty());
        assert_eq!(table_after, table);
    }

    #[test]
    fn repeated_responses_accumulate_in_one_group() {
        let (ledger, table) = setup();
        let (ledger, table) = record_response(&ledger, &table, &response(Some("B")), None);
        let second = GuessResponse {
            guess: Guess::new("S2", "W2", "R2"),
            ..response(Some("B"))
        };
        let (ledger, _) = record_response(&ledger, &table, &second, None);
        assert_eq!(ledger.group("B").unwrap().events.len(), 2);
    }
}
