use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("trial count must be at least 1")]
    ZeroTrials,
    #[error("suit count must be at least 1")]
    ZeroSuits,
    #[error("face count must be at least 1")]
    ZeroFaces,
    #[error("worker count must be at least 1")]
    ZeroWorkers,
    #[error("deck of {suit_count}x{face_count} cards does not fit a 32-bit card code")]
    DeckTooLarge { suit_count: u32, face_count: u32 },
    #[error("deck size {deck_size} is odd; decks with an odd number of cards are unsolvable")]
    OddDeck { deck_size: usize },
}

#[derive(Debug, Error)]
pub enum EntropyError {
    #[error("failed to open entropy source {}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("short read from entropy source {}: wanted {expected} bytes", .path.display())]
    ShortRead {
        path: PathBuf,
        expected: usize,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration")]
    Config(#[from] ConfigError),
    #[error("entropy failure")]
    Entropy(#[from] EntropyError),
}
