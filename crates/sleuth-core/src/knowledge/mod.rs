pub mod fact;
pub mod hand_size;
pub mod solution;
pub mod table;

pub use fact::{CardFact, TriState};
pub use hand_size::{
    DEALT_CARDS, HandSizeError, deduce_full_hands, is_valid_hand_size_combination,
    possible_hand_sizes, valid_hand_size_combinations,
};
pub use solution::{infer_solution, resolve_last_possible_holders};
pub use table::KnowledgeTable;
