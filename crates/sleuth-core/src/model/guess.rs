use core::fmt;
use serde::{Deserialize, Serialize};

/// One suspect/weapon/room triple, as named in a guess.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guess {
    pub suspect: String,
    pub weapon: String,
    pub room: String,
}

impl Guess {
    pub fn new(
        suspect: impl Into<String>,
        weapon: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            suspect: suspect.into(),
            weapon: weapon.into(),
            room: room.into(),
        }
    }

    /// The three named cards, in suspect/weapon/room order.
    pub fn cards(&self) -> [&str; 3] {
        [&self.suspect, &self.weapon, &self.room]
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.suspect, self.weapon, self.room)
    }
}

#[cfg(test)]
mod tests {
    use super::Guess;

    #[test]
    fn cards_keep_suspect_weapon_room_order() {
        let guess = Guess::new("Scarlet", "Rope", "Study");
        assert_eq!(guess.cards(), ["Scarlet", "Rope", "Study"]);
    }
}
