//! Deduction engine for a Cluedo-style social deduction game.
//!
//! Tracks what the local player can know about every card (knowledge
//! table), records guess/response events (ledger), and derives new facts
//! from the shape of those events (tuple analysis and solution inference).
//! Every operation is copy-on-write; callers never observe in-place
//! mutation.

#![deny(warnings)]

pub mod deduction;
pub mod game;
pub mod knowledge;
pub mod ledger;
pub mod model;
pub mod recorder;

pub use deduction::{Contradiction, Deductions, PlayerCard, analyze, apply,
    update_knowledge_with_deductions};
pub use game::{CardLocation, GameState};
pub use knowledge::{CardFact, KnowledgeTable, TriState, infer_solution};
pub use ledger::{GuessEvent, GuessLedger, NO_RESPONSE};
pub use model::{Card, CardRegistry, Category, Guess};
pub use recorder::{GuessResponse, record_response};
