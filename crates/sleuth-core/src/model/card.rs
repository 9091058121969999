use core::fmt;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Suspect,
    Weapon,
    Room,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Suspect, Category::Weapon, Category::Room];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Suspect => "suspect",
            Category::Weapon => "weapon",
            Category::Room => "room",
        };
        f.write_str(label)
    }
}

/// A single card of the game, identified by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub category: Category,
}

impl Card {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}

/// The fixed universe of cards for one game instance. Built once at setup,
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRegistry {
    suspects: Vec<String>,
    weapons: Vec<String>,
    rooms: Vec<String>,
}

impl CardRegistry {
    pub fn new(suspects: Vec<String>, weapons: Vec<String>, rooms: Vec<String>) -> Self {
        Self {
            suspects,
            weapons,
            rooms,
        }
    }

    /// A registry is complete when every category has at least one card.
    /// `initialize` refuses to build a knowledge table from an incomplete
    /// registry.
    pub fn is_complete(&self) -> bool {
        self.missing_categories().is_empty()
    }

    pub fn missing_categories(&self) -> Vec<Category> {
        let mut missing = Vec::new();
        if self.suspects.is_empty() {
            missing.push(Category::Suspect);
        }
        if self.weapons.is_empty() {
            missing.push(Category::Weapon);
        }
        if self.rooms.is_empty() {
            missing.push(Category::Room);
        }
        missing
    }

    pub fn suspects(&self) -> &[String] {
        &self.suspects
    }

    pub fn weapons(&self) -> &[String] {
        &self.weapons
    }

    pub fn rooms(&self) -> &[String] {
        &self.rooms
    }

    pub fn category_of(&self, name: &str) -> Option<Category> {
        if self.suspects.iter().any(|c| c == name) {
            Some(Category::Suspect)
        } else if self.weapons.iter().any(|c| c == name) {
            Some(Category::Weapon)
        } else if self.rooms.iter().any(|c| c == name) {
            Some(Category::Room)
        } else {
            None
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.category_of(name).is_some()
    }

    /// All card names in registry order: suspects, then weapons, then rooms.
    pub fn iter_cards(&self) -> impl Iterator<Item = Card> + '_ {
        let suspects = self
            .suspects
            .iter()
            .map(|name| Card::new(name.clone(), Category::Suspect));
        let weapons = self
            .weapons
            .iter()
            .map(|name| Card::new(name.clone(), Category::Weapon));
        let rooms = self
            .rooms
            .iter()
            .map(|name| Card::new(name.clone(), Category::Room));
        suspects.chain(weapons).chain(rooms)
    }

    pub fn len(&self) -> usize {
        self.suspects.len() + self.weapons.len() + self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Logs a warning for every entry in `names` that is not a registry
    /// card. Returns true when all names resolved.
    pub fn check_names(&self, names: &[String], context: &str) -> bool {
        let mut all_known = true;
        for name in names {
            if !self.contains(name) {
                warn!(card = %name, context, "card is not present in the registry");
                all_known = false;
            }
        }
        all_known
    }
}
