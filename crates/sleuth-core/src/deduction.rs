use crate::knowledge::{
    KnowledgeTable, TriState, deduce_full_hands, infer_solution, resolve_last_possible_holders,
};
use crate::ledger::{GuessEvent, GuessLedger, NO_RESPONSE};
use crate::model::Guess;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{error, warn};

/// A (player, card) pair produced by tuple analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCard {
    pub player: String,
    pub card: String,
}

/// A response event whose shower is ruled out for all three guessed cards.
/// Indicates bad prior input or a tracking bug upstream; surfaced loudly
/// but never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    pub player: String,
    pub guess: Guess,
}

impl fmt::Display for Contradiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "player \"{}\" is marked as not having any of {}",
            self.player, self.guess
        )
    }
}

/// Output of a full pass over the ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deductions {
    /// Advisory only: cards the analysis believes some shower holds.
    /// Deduplicated card names; never written back as certain knowledge.
    pub likely_has: Vec<String>,
    pub definitely_has: Vec<PlayerCard>,
    pub definitely_does_not_have: Vec<PlayerCard>,
    pub contradictions: Vec<Contradiction>,
    /// Which shower each advisory card is attributed to; drives the
    /// per-player advisory flags when the table is updated.
    likely_pairs: Vec<PlayerCard>,
}

impl Deductions {
    pub fn is_empty(&self) -> bool {
        self.likely_has.is_empty()
            && self.definitely_has.is_empty()
            && self.definitely_does_not_have.is_empty()
            && self.contradictions.is_empty()
    }

    fn push_likely(&mut self, player: &str, card: &str) {
        if !self.likely_has.iter().any(|name| name == card) {
            self.likely_has.push(card.to_string());
        }
        self.likely_pairs.push(PlayerCard {
            player: player.to_string(),
            card: card.to_string(),
        });
    }
}

/// Derives new facts purely from the shape of recorded guesses.
///
/// Evaluated independently per event:
/// - no-response events rule out all three cards for every asked player;
/// - response events narrow down which card the shower revealed, promoting
///   to a certain fact once two of the three are ruled out.
///
/// Events naming players or cards the table does not track contribute
/// nothing; a skipped event can never promote a fact.
pub fn analyze(ledger: &GuessLedger, table: &KnowledgeTable) -> Deductions {
    let mut out = Deductions::default();

    for group in ledger.groups() {
        if group.responder == NO_RESPONSE {
            for event in &group.events {
                analyze_no_response(event, table, &mut out);
            }
            continue;
        }
        for event in &group.events {
            analyze_response(&group.responder, event, table, &mut out);
        }
    }

    out
}

fn analyze_no_response(event: &GuessEvent, table: &KnowledgeTable, out: &mut Deductions) {
    for player in &event.asked_players {
        if !table.tracks_player(player) {
            warn!(player = %player, "asked player unknown to the table; skipped");
            continue;
        }
        for card in event.guess.cards() {
            if !table.tracks_card(card) {
                warn!(card, "guessed card unknown to the table; skipped");
                continue;
            }
            out.definitely_does_not_have.push(PlayerCard {
                player: player.clone(),
                card: card.to_string(),
            });
        }
    }
}

fn analyze_response(shower: &str, event: &GuessEvent, table: &KnowledgeTable, out: &mut Deductions) {
    // The local player showing a card teaches the local player nothing.
    if shower == table.current_user() {
        return;
    }
    if !table.tracks_player(shower) {
        warn!(player = %shower, "shower unknown to the table; event skipped");
        return;
    }
    let cards = event.guess.cards();
    if cards.iter().any(|card| !table.tracks_card(card)) {
        warn!(guess = %event.guess, "guess names a card unknown to the table; event skipped");
        return;
    }

    let states: Vec<TriState> = cards
        .iter()
        .filter_map(|card| table.fact(card))
        .map(|fact| {
            // A card in your own hand cannot be the one shown.
            if fact.in_your_hand {
                TriState::No
            } else {
                fact.player_fact(shower)
            }
        })
        .collect();

    // Already know which card was shown; nothing new here.
    if states.iter().any(|state| state.is_yes()) {
        return;
    }

    let ruled_out = states.iter().filter(|state| state.is_no()).count();
    let unknown: Vec<&str> = cards
        .iter()
        .zip(&states)
        .filter(|(_, state)| state.is_unknown())
        .map(|(card, _)| *card)
        .collect();

    match (ruled_out, unknown.len()) {
        (0, 3) | (1, 2) => {
            for card in unknown {
                out.push_likely(shower, card);
            }
        }
        (2, 1) => {
            // The shower must have shown one of the three, and two are
            // ruled out.
            out.definitely_has.push(PlayerCard {
                player: shower.to_string(),
                card: unknown[0].to_string(),
            });
        }
        (3, 0) => {
            let contradiction = Contradiction {
                player: shower.to_string(),
                guess: event.guess.clone(),
            };
            error!(%contradiction, "contradiction detected in recorded responses");
            out.contradictions.push(contradiction);
        }
        _ => {}
    }
}

/// Materializes the certain lists of `deductions` into the table and
/// refreshes the advisory flags. Idempotent; an already-resolved fact is
/// never overwritten.
pub fn apply(table: &KnowledgeTable, deductions: &Deductions) -> KnowledgeTable {
    let mut next = table.clone();
    for PlayerCard { player, card } in &deductions.definitely_does_not_have {
        if next
            .fact(card)
            .is_some_and(|fact| fact.player_fact(player).is_no())
        {
            continue;
        }
        next = next.mark_not_held(card, player);
    }
    for PlayerCard { player, card } in &deductions.definitely_has {
        if next
            .fact(card)
            .is_some_and(|fact| fact.player_fact(player).is_yes())
        {
            continue;
        }
        next = next.mark_held(card, player);
    }
    for PlayerCard { player, card } in &deductions.likely_pairs {
        next = next.mark_likely_held(card, player);
    }
    next
}

/// Global re-derivation: tuple analysis over the whole ledger, then the
/// follow-up passes in dependency order (full hands, solution inference,
/// last-possible-holder). Re-derives from scratch each time; ledger sizes
/// are bounded by game length.
pub fn update_knowledge_with_deductions(
    table: &KnowledgeTable,
    ledger: &GuessLedger,
    hand_sizes: Option<&BTreeMap<String, usize>>,
) -> KnowledgeTable {
    let deductions = analyze(ledger, table);
    let mut next = apply(table, &deductions);
    if let Some(sizes) = hand_sizes {
        next = deduce_full_hands(&next, sizes);
    }
    next = infer_solution(&next);
    resolve_last_possible_holders(&next)
}
