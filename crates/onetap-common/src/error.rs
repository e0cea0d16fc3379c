//! Error taxonomy for the code lifecycle.

use thiserror::Error;

use crate::constants::messages;

/// Errors raised while issuing or redeeming codes
#[derive(Debug, Error)]
pub enum CodeError {
    /// Redemption request carried no code value
    #[error("{}", messages::CODE_REQUIRED)]
    MissingInput,

    /// Code was never issued, was mistyped, or was already redeemed.
    /// The three causes are deliberately indistinguishable.
    #[error("{}", messages::CODE_INVALID)]
    InvalidOrConsumed,

    /// The OS random source could not produce bytes
    #[error("Secure random source failed: {0}")]
    RandomSource(String),

    /// A freshly generated value is already outstanding in the store
    #[error("Generated code collides with an outstanding code")]
    Collision,
}

impl CodeError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingInput => 400,
            Self::InvalidOrConsumed => 401,
            Self::RandomSource(_) => 500,
            Self::Collision => 500,
        }
    }

    /// Returns true if the error is the caller's fault rather than ours
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
