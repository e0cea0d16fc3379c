//! Code generation from the OS random source.

use onetap_common::constants::{ALPHABET_LEN, CODE_ALPHABET, CODE_LENGTH};
use onetap_common::{Code, CodeError};
use rand::TryRngCore;
use rand::rngs::OsRng;

/// Source of unpredictable bytes
pub trait EntropySource: Send + Sync {
    /// Fill `dest` entirely or fail; partial output is never used
    fn fill(&self, dest: &mut [u8]) -> Result<(), CodeError>;
}

/// The operating system's CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CodeError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CodeError::RandomSource(e.to_string()))
    }
}

/// Code generator service
pub struct CodeGenerator<S = OsEntropy> {
    source: S,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self { source: OsEntropy }
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EntropySource> CodeGenerator<S> {
    #[allow(dead_code)]
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Generate a fresh code.
    ///
    /// Fails with [`CodeError::RandomSource`] if the source cannot deliver
    /// bytes; there is no fallback to a weaker generator.
    pub fn generate(&self) -> Result<Code, CodeError> {
        let mut bytes = [0u8; CODE_LENGTH];
        self.source.fill(&mut bytes).inspect_err(|e| {
            tracing::error!(error = %e, "Secure random source unavailable");
        })?;

        Ok(Code::new(encode(&bytes)))
    }
}

/// Map each byte onto the alphabet with `byte % 90`.
///
/// 256 is not a multiple of 90, so alphabet positions 0-75 are drawn with
/// probability 3/256 and positions 76-89 with 2/256. Kept as-is so output
/// stays compatible with previously issued codes.
fn encode(bytes: &[u8; CODE_LENGTH]) -> String {
    bytes
        .iter()
        .map(|b| CODE_ALPHABET[*b as usize % ALPHABET_LEN] as char)
        .collect()
}
