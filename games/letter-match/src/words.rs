//! Word lists for normal and boss rounds.

use serde::{Deserialize, Serialize};

use modulith_engine::{char_code, Rng};

use crate::round::RoundType;

const NORMAL_WORDS: [&str; 10] = [
    "HOLA", "MUNDO", "CODIGO", "ARTE", "DISEÑO", "FUTURO", "SOL", "LUNA", "TIEMPO", "MANU",
];

const BOSS_WORDS: [&str; 6] = [
    "CONSTELACION", "ARQUITECTURA", "TIPOGRAFIA", "MODULARIDAD", "GEOMETRIA", "LABERINTO",
];

/// Words the game draws from. Boss rounds use the `boss` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordBank {
    pub normal: Vec<String>,
    pub boss: Vec<String>,
}

impl Default for WordBank {
    fn default() -> Self {
        Self {
            normal: NORMAL_WORDS.iter().map(|w| w.to_string()).collect(),
            boss: BOSS_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

impl WordBank {
    /// Parse and sanitise a word bank.
    /// Lists left empty after sanitising fall back to the built-in words.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let bank: WordBank = serde_json::from_str(json)?;
        Ok(bank.sanitized())
    }

    /// Upper-case every word and drop words with characters the alphabet
    /// cannot display.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            normal: clean_list(self.normal, defaults.normal, "normal"),
            boss: clean_list(self.boss, defaults.boss, "boss"),
        }
    }

    /// Uniformly random word for a round of the given type.
    pub fn pick(&self, round_type: RoundType, rng: &mut Rng) -> Vec<char> {
        let list = match round_type {
            RoundType::Boss => &self.boss,
            RoundType::Normal | RoundType::Frenzy => &self.normal,
        };
        rng.pick(list)
            .or_else(|| rng.pick(&self.normal))
            .map(|w| w.chars().collect())
            .unwrap_or_else(|| NORMAL_WORDS[0].chars().collect())
    }
}

fn clean_list(words: Vec<String>, fallback: Vec<String>, name: &str) -> Vec<String> {
    let cleaned: Vec<String> = words
        .into_iter()
        .map(|w| w.trim().to_uppercase())
        .filter(|w| !w.is_empty() && w.chars().all(|c| char_code(c) != 0))
        .collect();
    if cleaned.is_empty() {
        log::warn!("{} word list is empty, using built-in words", name);
        fallback
    } else {
        cleaned
    }
}
