use crate::score::score_guess;
use crate::weights::ScoreWeights;
use crossbeam_channel::{Receiver, bounded};
use serde::{Deserialize, Serialize};
use sleuth_core::game::GameState;
use sleuth_core::model::{Category, Guess};
use std::thread;
use tracing::{debug, warn};

/// The winning candidate and its score under the dispatched weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestGuess {
    pub guess: Guess,
    pub score: f64,
}

/// Lifecycle of one evaluation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Dispatching,
    Evaluating,
    Completed,
    Cancelled,
}

/// Non-blocking view of an in-flight search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPoll {
    /// No evaluation was requested.
    Idle,
    /// The worker has not reported yet.
    Pending,
    /// The worker finished; `None` means no candidate survived filtering.
    Ready(Option<BestGuess>),
}

/// Enumerates the candidate guess space: {possible suspects} x {possible
/// weapons} x {accessible or all rooms}.
///
/// Cards definitely held by another player are removed up front, and any
/// guess with no unresolved solution status is discarded before scoring
/// (it would score zero anyway).
pub fn enumerate_candidates(accessible_rooms: &[String], state: &GameState) -> Vec<Guess> {
    let suspects = open_cards(state, Category::Suspect);
    let weapons = open_cards(state, Category::Weapon);
    let rooms = candidate_rooms(accessible_rooms, state);

    let mut candidates = Vec::new();
    for suspect in &suspects {
        for weapon in &weapons {
            for room in &rooms {
                let informative = [suspect.as_str(), weapon.as_str(), room.as_str()]
                    .into_iter()
                    .any(|card| {
                        state
                            .knowledge
                            .fact(card)
                            .is_some_and(|fact| fact.in_solution.is_unknown())
                    });
                if informative {
                    candidates.push(Guess::new(suspect.clone(), weapon.clone(), room.clone()));
                }
            }
        }
    }
    candidates
}

/// Cards of `category` not definitely sitting in another player's hand.
fn open_cards(state: &GameState, category: Category) -> Vec<String> {
    state
        .knowledge
        .facts()
        .iter()
        .filter(|fact| fact.category() == category)
        .filter(|fact| fact.in_your_hand || !fact.held_by_someone())
        .map(|fact| fact.name().to_string())
        .collect()
}

fn candidate_rooms(accessible_rooms: &[String], state: &GameState) -> Vec<String> {
    let all_rooms = open_cards(state, Category::Room);
    if accessible_rooms.is_empty() {
        return all_rooms;
    }
    accessible_rooms
        .iter()
        .filter(|room| {
            if !state.knowledge.tracks_card(room.as_str()) {
                warn!(room = %room, "accessible room unknown to the table; skipped");
                return false;
            }
            true
        })
        .filter(|room| all_rooms.iter().any(|open| open.as_str() == room.as_str()))
        .cloned()
        .collect()
}

/// Arg-max over the candidates; ties resolve to the first candidate in
/// enumeration order.
fn evaluate_candidates(
    candidates: &[Guess],
    state: &GameState,
    weights: &ScoreWeights,
) -> Option<BestGuess> {
    let mut best: Option<BestGuess> = None;
    for guess in candidates {
        let score = score_guess(guess, state, weights);
        let improves = best.as_ref().is_none_or(|current| score > current.score);
        if improves {
            best = Some(BestGuess {
                guess: guess.clone(),
                score,
            });
        }
    }
    best
}

struct WorkerReport {
    generation: u64,
    best: Option<BestGuess>,
}

/// Dispatches candidate scoring to a background worker and collects the
/// result without blocking other work.
///
/// Exactly one evaluation is outstanding at a time: a new dispatch
/// supersedes the in-flight one, whose report is discarded when it
/// eventually arrives. State and candidates are copied into the worker at
/// dispatch time; nothing is shared across the thread boundary.
pub struct GuessSearcher {
    generation: u64,
    phase: SearchPhase,
    pending: Option<Receiver<WorkerReport>>,
}

impl GuessSearcher {
    pub fn new() -> Self {
        Self {
            generation: 0,
            phase: SearchPhase::Idle,
            pending: None,
        }
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Enumerates candidates and hands them to a fresh worker. Any
    /// in-flight evaluation is cancelled.
    pub fn dispatch(
        &mut self,
        accessible_rooms: &[String],
        state: &GameState,
        weights: &ScoreWeights,
    ) {
        if self.pending.take().is_some() {
            debug!(
                generation = self.generation,
                "superseding in-flight evaluation"
            );
        }
        self.generation += 1;
        self.phase = SearchPhase::Dispatching;

        let candidates = enumerate_candidates(accessible_rooms, state);
        debug!(
            generation = self.generation,
            candidates = candidates.len(),
            "dispatching guess evaluation"
        );

        let generation = self.generation;
        let state = state.clone();
        let weights = *weights;
        let (sender, receiver) = bounded(1);
        thread::spawn(move || {
            let best = evaluate_candidates(&candidates, &state, &weights);
            // A superseded request's receiver is gone; the report is
            // silently dropped.
            let _ = sender.send(WorkerReport { generation, best });
        });

        self.pending = Some(receiver);
        self.phase = SearchPhase::Evaluating;
    }

    /// Blocks until the outstanding worker reports. `None` when nothing is
    /// outstanding, no candidate survived, or the worker died.
    pub fn wait(&mut self) -> Option<BestGuess> {
        let receiver = self.pending.take()?;
        match receiver.recv() {
            Ok(report) => {
                if report.generation != self.generation {
                    debug!(
                        generation = report.generation,
                        "discarding stale worker report"
                    );
                    return None;
                }
                self.phase = SearchPhase::Completed;
                let best = report.best;
                self.phase = SearchPhase::Idle;
                best
            }
            Err(_) => {
                warn!("evaluation worker terminated without reporting");
                self.phase = SearchPhase::Cancelled;
                None
            }
        }
    }

    /// Non-blocking check on the outstanding worker.
    pub fn poll(&mut self) -> SearchPoll {
        let Some(receiver) = &self.pending else {
            return SearchPoll::Idle;
        };
        match receiver.try_recv() {
            Ok(report) => {
                self.pending = None;
                if report.generation != self.generation {
                    debug!(
                        generation = report.generation,
                        "discarding stale worker report"
                    );
                    return SearchPoll::Idle;
                }
                self.phase = SearchPhase::Idle;
                SearchPoll::Ready(report.best)
            }
            Err(crossbeam_channel::TryRecvError::Empty) => SearchPoll::Pending,
            Err(crossbeam_channel::TryRecvError::Disconnected) => {
                self.pending = None;
                self.phase = SearchPhase::Cancelled;
                warn!("evaluation worker terminated without reporting");
                SearchPoll::Ready(None)
            }
        }
    }
}

impl Default for GuessSearcher {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot convenience: dispatch a worker for `state` and block on its
/// answer.
pub fn find_best_guess(
    accessible_rooms: &[String],
    state: &GameState,
    weights: &ScoreWeights,
) -> Option<BestGuess> {
    let mut searcher = GuessSearcher::new();
    searcher.dispatch(accessible_rooms, state, weights);
    searcher.wait()
}
