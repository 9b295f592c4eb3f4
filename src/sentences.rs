use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SENTENCES: [&str; 5] = [
    "Practice makes you a better programmer.",
    "JavaScript controls the behavior of web pages.",
    "Typing quickly and accurately is a useful skill.",
    "Front end development uses HTML CSS and JavaScript.",
    "Keep calm and keep writing clean code.",
];

/// A reference sentence the player has to reproduce exactly
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sentence(String);

impl Sentence {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, which is also the size of the comparison window
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sentence {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Sentence {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Fixed, non-empty pool of practice sentences
#[derive(Debug, Clone)]
pub struct SentenceBank {
    sentences: Vec<Sentence>,
}

impl SentenceBank {
    pub fn new(sentences: Vec<Sentence>) -> Result<Self, ConfigError> {
        if sentences.is_empty() {
            return Err(ConfigError::EmptySentencePool);
        }
        if let Some(index) = sentences.iter().position(Sentence::is_empty) {
            return Err(ConfigError::EmptySentence { index });
        }
        Ok(Self { sentences })
    }

    pub fn pick_random(&self) -> Sentence {
        self.pick_with(&mut rand::thread_rng())
    }

    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Sentence {
        // the pool is validated non-empty on construction
        self.sentences
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| self.sentences[0].clone())
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sentence> {
        self.sentences.iter()
    }
}

impl Default for SentenceBank {
    fn default() -> Self {
        Self {
            sentences: DEFAULT_SENTENCES.iter().copied().map(Sentence::from).collect(),
        }
    }
}
