use crate::model::Guess;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Reserved responder key for guesses nobody answered.
pub const NO_RESPONSE: &str = "NO_RESPONSE";

/// One recorded guess/response. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessEvent {
    pub guess: Guess,
    pub guessed_by: String,
    /// `None` when every asked player passed.
    pub shown_by: Option<String>,
    /// Players consulted between the guesser and the responder, in turn
    /// order, exclusive of the guesser.
    pub asked_players: Vec<String>,
    pub timestamp_ms: u64,
}

impl GuessEvent {
    pub fn new(
        guess: Guess,
        guessed_by: impl Into<String>,
        shown_by: Option<String>,
        asked_players: Vec<String>,
    ) -> Self {
        Self {
            guess,
            guessed_by: guessed_by.into(),
            shown_by,
            asked_players,
            timestamp_ms: now_ms(),
        }
    }

    /// The ledger group this event files under.
    pub fn responder_key(&self) -> &str {
        self.shown_by.as_deref().unwrap_or(NO_RESPONSE)
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Events for a single responder, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponderEvents {
    pub responder: String,
    pub events: Vec<GuessEvent>,
}

/// Append-only grouping of guess events by responder identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessLedger {
    groups: Vec<ResponderEvents>,
}

impl GuessLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files `event` under its responder's group, creating the group if the
    /// responder has not answered before. Returns a new ledger.
    pub fn append(&self, event: GuessEvent) -> Self {
        let mut next = self.clone();
        let key = event.responder_key().to_string();
        match next.groups.iter_mut().find(|group| group.responder == key) {
            Some(group) => group.events.push(event),
            None => next.groups.push(ResponderEvents {
                responder: key,
                events: vec![event],
            }),
        }
        next
    }

    pub fn groups(&self) -> &[ResponderEvents] {
        &self.groups
    }

    pub fn group(&self, responder: &str) -> Option<&ResponderEvents> {
        self.groups.iter().find(|group| group.responder == responder)
    }

    pub fn iter_events(&self) -> impl Iterator<Item = &GuessEvent> {
        self.groups.iter().flat_map(|group| group.events.iter())
    }

    pub fn event_count(&self) -> usize {
        self.groups.iter().map(|group| group.events.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every recorded triple in chronological order; responder identity is
    /// dropped, matching what the search layer needs.
    pub fn guesses_chronological(&self) -> Vec<Guess> {
        let mut events: Vec<&GuessEvent> = self.iter_events().collect();
        events.sort_by_key(|event| event.timestamp_ms);
        events.into_iter().map(|event| event.guess.clone()).collect()
    }
}
