use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    pub id: String,
    pub name: String,
    pub color: String,
    pub description: String,
    pub symbol: String,
    pub affirmations: Vec<String>,
}

impl Mood {
    fn builtin(
        id: &str,
        name: &str,
        color: &str,
        description: &str,
        symbol: &str,
        affirmations: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            description: description.to_string(),
            symbol: symbol.to_string(),
            affirmations: affirmations.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Pick one affirmation uniformly from the pool.
    pub fn random_affirmation(&self) -> Option<&str> {
        self.affirmations
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
    }
}

static CATALOG: LazyLock<Vec<Mood>> = LazyLock::new(|| {
    vec![
        Mood::builtin(
            "pink-bloom",
            "Pink Bloom",
            "#FF69B4",
            "A warm and tender state, when the heart is open to love, beauty and care.",
            "Symbolizes: self-love, softness, emotional warmth.",
            &[
                "Embrace yourself - you deserve love.",
                "Your heart is open to beautiful experiences today.",
                "You are worthy of all the love and care you give to others.",
                "Let your gentle spirit shine through today.",
                "You are a beautiful soul deserving of tenderness.",
            ],
        ),
        Mood::builtin(
            "blue-serenity",
            "Blue Serenity",
            "#4A90E2",
            "A state of inner peace and harmony.",
            "Symbolizes: clarity of thought, balance, a soft flow of energy.",
            &[
                "Breathe deeply and find your center.",
                "You are in perfect harmony with yourself.",
                "Peace flows through you like a gentle stream.",
                "Your mind is clear and your heart is calm.",
                "You have found your inner sanctuary.",
            ],
        ),
        Mood::builtin(
            "golden-spirit",
            "Golden Spirit",
            "#FFD700",
            "A sunny, inspired state when you want to act and share joy.",
            "Symbolizes: happiness, energy, faith in light and goodness.",
            &[
                "Your light brightens the world around you.",
                "Today is filled with endless possibilities.",
                "You radiate joy and positive energy.",
                "Your enthusiasm is contagious and beautiful.",
                "You are a beacon of hope and happiness.",
            ],
        ),
    ]
});

/// The built-in mood flowers, in display order.
pub fn catalog() -> &'static [Mood] {
    &CATALOG
}

pub fn find(id: &str) -> Option<&'static Mood> {
    catalog().iter().find(|m| m.id == id)
}
