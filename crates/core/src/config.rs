use crate::{ConfigError, DeckLayout, STANDARD_FACES, STANDARD_SUITS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TRIALS: u64 = 1_000_000;
pub const DEFAULT_ENTROPY_PATH: &str = "/dev/urandom";

fn default_trials() -> u64 {
    DEFAULT_TRIALS
}

fn default_suit_count() -> u32 {
    STANDARD_SUITS
}

fn default_face_count() -> u32 {
    STANDARD_FACES
}

fn default_entropy_path() -> PathBuf {
    PathBuf::from(DEFAULT_ENTROPY_PATH)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimConfig {
    #[serde(default = "default_trials")]
    pub trials: u64,
    #[serde(default = "default_suit_count")]
    pub suit_count: u32,
    #[serde(default = "default_face_count")]
    pub face_count: u32,
    /// `None` uses one worker per rayon thread.
    #[serde(default)]
    pub workers: Option<usize>,
    /// Replaces the OS entropy device with a seeded generator.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_entropy_path")]
    pub entropy_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            suit_count: STANDARD_SUITS,
            face_count: STANDARD_FACES,
            workers: None,
            seed: None,
            entropy_path: default_entropy_path(),
        }
    }
}

impl SimConfig {
    pub fn layout(&self) -> DeckLayout {
        DeckLayout::new(self.suit_count, self.face_count)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(rayon::current_num_threads)
    }

    /// Checks every precondition a batch relies on. Nothing runs until this passes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if self.suit_count == 0 {
            return Err(ConfigError::ZeroSuits);
        }
        if self.face_count == 0 {
            return Err(ConfigError::ZeroFaces);
        }
        if self.workers == Some(0) {
            return Err(ConfigError::ZeroWorkers);
        }
        let layout = self.layout();
        let Some(deck_size) = layout.checked_deck_size() else {
            return Err(ConfigError::DeckTooLarge {
                suit_count: self.suit_count,
                face_count: self.face_count,
            });
        };
        if deck_size % 2 != 0 {
            return Err(ConfigError::OddDeck {
                deck_size: deck_size as usize,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! reject_case {
        ($name:ident, $trials:expr, $suits:expr, $faces:expr, $workers:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let config = SimConfig {
                    trials: $trials,
                    suit_count: $suits,
                    face_count: $faces,
                    workers: $workers,
                    ..SimConfig::default()
                };
                assert_eq!(config.validate(), Err($expected));
            }
        };
    }

    reject_case!(reject_zero_trials, 0, 4, 13, None, ConfigError::ZeroTrials);
    reject_case!(reject_zero_suits, 10, 0, 13, None, ConfigError::ZeroSuits);
    reject_case!(reject_zero_faces, 10, 4, 0, None, ConfigError::ZeroFaces);
    reject_case!(reject_zero_workers, 10, 4, 13, Some(0), ConfigError::ZeroWorkers);
    reject_case!(
        reject_odd_deck,
        10,
        3,
        5,
        None,
        ConfigError::OddDeck { deck_size: 15 }
    );
    reject_case!(
        reject_oversized_deck,
        10,
        u32::MAX,
        4,
        None,
        ConfigError::DeckTooLarge {
            suit_count: u32::MAX,
            face_count: 4
        }
    );

    #[test]
    fn defaults_are_the_standard_game() {
        let config = SimConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.layout(), DeckLayout::standard52());
        assert_eq!(config.trials, DEFAULT_TRIALS);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{"trials": 500, "seed": 7}"#).expect("parse");
        assert_eq!(config.trials, 500);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.suit_count, STANDARD_SUITS);
        assert_eq!(config.entropy_path, PathBuf::from(DEFAULT_ENTROPY_PATH));
    }
}
