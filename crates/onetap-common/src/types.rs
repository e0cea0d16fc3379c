//! Core types shared across Onetap components.

use serde::{Deserialize, Serialize};

use crate::constants::{CODE_ALPHABET, CODE_LENGTH};

/// An issued single-use code.
///
/// `created_at` is recorded at issuance but no expiry policy reads it;
/// a code stays valid until it is redeemed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    /// The code string handed to the caller
    pub value: String,

    /// Issuance timestamp (Unix epoch seconds, UTC)
    pub created_at: i64,
}

impl Code {
    /// Wrap a value, stamping it with the current time
    pub fn new(value: String) -> Self {
        Self {
            value,
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Returns true if `value` has the shape of a generated code
    pub fn is_well_formed(value: &str) -> bool {
        value.len() == CODE_LENGTH && value.bytes().all(|b| CODE_ALPHABET.contains(&b))
    }
}

/// Body of `GET /generate-code`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateCodeResponse {
    pub code: String,
    pub message: String,
}

/// Body of `POST /verify-code`
///
/// `code` is optional at the type level so a missing field can be answered
/// with a plain 400 instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    pub code: Option<String>,
}

impl VerifyCodeRequest {
    /// The code to redeem, or None if absent or empty
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }
}

/// Message-only response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Point-in-time view of the code store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Codes issued and not yet redeemed
    pub outstanding: usize,

    /// Codes issued since startup
    pub issued: u64,

    /// Successful redemptions since startup
    pub redeemed: u64,

    /// Failed redemption attempts since startup
    pub rejected: u64,
}
