use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;

/// Weights governing the relative value of different scoring components.
///
/// Scores are comparable only within one weight configuration; never rank
/// guesses scored under different weights against each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Penalty per card definitely known to sit in another player's hand.
    pub penalty_definitely_in_other_hands: f64,
    /// Smaller penalty per card only suspected to sit in another hand.
    pub penalty_likely_in_other_hands: f64,
    /// Multiplier on the own-room probe bonus.
    pub strategic_value_multiplier: f64,
    /// Base bonus for probing two unknowns through a room in your own hand.
    pub strategic_elimination_bonus: f64,
    /// Probability mass assigned to a fully unresolved card.
    pub probability_definitely_known: f64,
    /// Probability mass assigned to a card likely in some hand.
    pub probability_likely: f64,
    /// Probability mass assigned to an already-resolved card.
    pub probability_unlikely: f64,
    /// Scale on the entropy estimate.
    pub entropy_weight: f64,
    /// Scale on the expected information bonus.
    pub information_bonus_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Preset::Balanced.weights()
    }
}

/// Named configurations ranging from conservative to aggressive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    Balanced,
    Conservative,
    Aggressive,
    InformationFocused,
    Strategic,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Balanced,
        Preset::Conservative,
        Preset::Aggressive,
        Preset::InformationFocused,
        Preset::Strategic,
    ];

    pub const fn weights(self) -> ScoreWeights {
        match self {
            Preset::Balanced => ScoreWeights {
                penalty_definitely_in_other_hands: -1.0,
                penalty_likely_in_other_hands: -0.3,
                strategic_value_multiplier: 2.0,
                strategic_elimination_bonus: 0.5,
                probability_definitely_known: 3.0,
                probability_likely: 1.5,
                probability_unlikely: 0.3,
                entropy_weight: 1.0,
                information_bonus_weight: 1.0,
            },
            Preset::Conservative => ScoreWeights {
                penalty_definitely_in_other_hands: -1.5,
                penalty_likely_in_other_hands: -0.6,
                strategic_value_multiplier: 1.0,
                strategic_elimination_bonus: 0.3,
                probability_definitely_known: 3.0,
                probability_likely: 1.2,
                probability_unlikely: 0.2,
                entropy_weight: 0.8,
                information_bonus_weight: 0.8,
            },
            Preset::Aggressive => ScoreWeights {
                penalty_definitely_in_other_hands: -0.5,
                penalty_likely_in_other_hands: -0.1,
                strategic_value_multiplier: 3.0,
                strategic_elimination_bonus: 0.8,
                probability_definitely_known: 3.5,
                probability_likely: 2.0,
                probability_unlikely: 0.5,
                entropy_weight: 1.2,
                information_bonus_weight: 1.5,
            },
            Preset::InformationFocused => ScoreWeights {
                penalty_definitely_in_other_hands: -0.8,
                penalty_likely_in_other_hands: -0.2,
                strategic_value_multiplier: 1.5,
                strategic_elimination_bonus: 0.4,
                probability_definitely_known: 4.0,
                probability_likely: 1.0,
                probability_unlikely: 0.1,
                entropy_weight: 2.0,
                information_bonus_weight: 2.0,
            },
            Preset::Strategic => ScoreWeights {
                penalty_definitely_in_other_hands: -1.2,
                penalty_likely_in_other_hands: -0.4,
                strategic_value_multiplier: 4.0,
                strategic_elimination_bonus: 1.0,
                probability_definitely_known: 3.0,
                probability_likely: 1.5,
                probability_unlikely: 0.3,
                entropy_weight: 0.9,
                information_bonus_weight: 1.0,
            },
        }
    }

    /// Preset selected through `SLEUTH_AI_PRESET`, defaulting to Balanced.
    /// Cached for the life of the process.
    pub fn from_env() -> Self {
        static CACHED: OnceLock<Preset> = OnceLock::new();
        *CACHED.get_or_init(|| match std::env::var("SLEUTH_AI_PRESET") {
            Ok(raw) => raw.trim().parse().unwrap_or_default(),
            Err(_) => Preset::default(),
        })
    }
}

impl Default for Preset {
    fn default() -> Self {
        Preset::Balanced
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "balanced" | "default" => Ok(Preset::Balanced),
            "conservative" => Ok(Preset::Conservative),
            "aggressive" => Ok(Preset::Aggressive),
            "information" | "information-focused" | "information_focused" => {
                Ok(Preset::InformationFocused)
            }
            "strategic" => Ok(Preset::Strategic),
            _ => Err(UnknownPreset(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown weight preset: {}", self.0)
    }
}

impl std::error::Error for UnknownPreset {}
