//! Sources of raw 32-bit randomness for the shuffle.

use crate::EntropyError;
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub trait EntropySource {
    /// Fills `out` completely or fails; a partial fill is never returned as success.
    fn fill(&mut self, out: &mut [u32]) -> Result<(), EntropyError>;
}

/// Reads an OS randomness device. The device is opened and closed on every
/// fill, so no handle outlives a shuffle.
#[derive(Debug, Clone)]
pub struct OsEntropy {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl OsEntropy {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bytes: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EntropySource for OsEntropy {
    fn fill(&mut self, out: &mut [u32]) -> Result<(), EntropyError> {
        let expected = out.len() * 4;
        self.bytes.resize(expected, 0);
        {
            let mut file = File::open(&self.path).map_err(|source| EntropyError::Open {
                path: self.path.clone(),
                source,
            })?;
            file.read_exact(&mut self.bytes)
                .map_err(|source| EntropyError::ShortRead {
                    path: self.path.clone(),
                    expected,
                    source,
                })?;
        }
        for (value, chunk) in out.iter_mut().zip(self.bytes.chunks_exact(4)) {
            *value = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(())
    }
}

/// Deterministic stand-in for the OS device, for reproducible batches.
#[derive(Debug, Clone)]
pub struct SeededEntropy {
    seed: u64,
    rng: StdRng,
}

impl SeededEntropy {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl EntropySource for SeededEntropy {
    fn fill(&mut self, out: &mut [u32]) -> Result<(), EntropyError> {
        for value in out.iter_mut() {
            *value = self.rng.next_u32();
        }
        Ok(())
    }
}

/// Either kind of source, picked from configuration at runtime.
#[derive(Debug, Clone)]
pub enum AnyEntropy {
    Os(OsEntropy),
    Seeded(SeededEntropy),
}

impl EntropySource for AnyEntropy {
    fn fill(&mut self, out: &mut [u32]) -> Result<(), EntropyError> {
        match self {
            Self::Os(source) => source.fill(out),
            Self::Seeded(source) => source.fill(out),
        }
    }
}
