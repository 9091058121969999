pub mod card;
pub mod guess;

pub use card::{Card, CardRegistry, Category};
pub use guess::Guess;
