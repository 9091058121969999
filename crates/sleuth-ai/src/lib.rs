//! Guess-evaluation engine for the deduction assistant.
//!
//! Scores candidate guesses against the knowledge table under a
//! configurable weighted heuristic and runs the arg-max search on a
//! background worker so the interactive path never blocks.

#![deny(warnings)]

pub mod score;
pub mod search;
pub mod weights;

pub use score::{CardStatus, classify, score_guess};
pub use search::{BestGuess, GuessSearcher, SearchPhase, SearchPoll, enumerate_candidates,
    find_best_guess};
pub use weights::{Preset, ScoreWeights};
