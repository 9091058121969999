//! Full flow: setup, recorded responses, then a background recommendation.

use sleuth_ai::{Preset, ScoreWeights, find_best_guess, score_guess};
use sleuth_core::game::GameState;
use sleuth_core::knowledge::KnowledgeTable;
use sleuth_core::ledger::GuessLedger;
use sleuth_core::model::{CardRegistry, Guess};
use sleuth_core::recorder::{GuessResponse, record_response};

fn registry() -> CardRegistry {
    CardRegistry::new(
        vec!["Scarlet".into(), "Mustard".into(), "Plum".into()],
        vec!["Rope".into(), "Dagger".into()],
        vec!["Study".into(), "Hall".into(), "Library".into()],
    )
}

fn players() -> Vec<String> {
    vec!["You".into(), "Alice".into(), "Bob".into()]
}

#[test]
fn own_suspect_probe_outscores_a_resolved_guess() {
    let knowledge =
        KnowledgeTable::initialize(&["Scarlet".into()], &registry(), &players(), "You");
    let knowledge = knowledge
        .mark_held("Rope", "Alice")
        .mark_held("Study", "Bob");
    let state = GameState::new(knowledge, players(), Vec::new());
    let weights = ScoreWeights::default();

    // Suspect in hand, weapon and room unresolved.
    let probing = score_guess(&Guess::new("Scarlet", "Dagger", "Hall"), &state, &weights);
    // All three resolved: nothing left to learn.
    let resolved = score_guess(&Guess::new("Scarlet", "Rope", "Study"), &state, &weights);

    assert_eq!(resolved, 0.0);
    assert!(probing > resolved);
}

#[test]
fn recommendation_avoids_cards_in_known_hands() {
    let knowledge = KnowledgeTable::initialize(&[], &registry(), &players(), "You");
    let ledger = GuessLedger::new();

    // Alice shows for a guess where she is already out of two cards.
    let knowledge = knowledge
        .mark_not_held("Scarlet", "Alice")
        .mark_not_held("Rope", "Alice");
    let response = GuessResponse {
        guess: Guess::new("Scarlet", "Rope", "Study"),
        guessed_by: "You".into(),
        shown_by: Some("Alice".into()),
        asked_players: vec!["Alice".into()],
    };
    let (_, knowledge) = record_response(&ledger, &knowledge, &response, None);
    assert!(
        knowledge
            .fact("Study")
            .unwrap()
            .player_fact("Alice")
            .is_yes()
    );

    let state = GameState::new(knowledge, players(), Vec::new());
    let best = find_best_guess(&[], &state, &ScoreWeights::default()).expect("candidates exist");
    assert_ne!(best.guess.room, "Study");
    assert!(best.score > 0.0);
}

#[test]
fn accessible_rooms_bound_the_recommendation() {
    let knowledge = KnowledgeTable::initialize(&[], &registry(), &players(), "You");
    let state = GameState::new(knowledge, players(), Vec::new());
    let accessible = vec!["Library".to_string()];
    let best = find_best_guess(&accessible, &state, &ScoreWeights::default())
        .expect("candidates exist");
    assert_eq!(best.guess.room, "Library");
}

#[test]
fn every_preset_produces_a_recommendation() {
    let knowledge = KnowledgeTable::initialize(&["Scarlet".into()], &registry(), &players(), "You");
    let state = GameState::new(knowledge, players(), Vec::new());
    for preset in Preset::ALL {
        let best = find_best_guess(&[], &state, &preset.weights());
        assert!(best.is_some(), "{preset:?} produced no recommendation");
    }
}
