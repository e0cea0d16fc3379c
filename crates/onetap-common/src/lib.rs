//! # Onetap Common
//!
//! Shared types, constants, and errors used across Onetap components.
//!
//! ## Modules
//! - `types` - Code record and HTTP request/response bodies
//! - `error` - Code lifecycle error taxonomy
//! - `constants` - Alphabet, code length, defaults, and response messages

pub mod constants;
pub mod error;
pub mod types;

pub use error::CodeError;
pub use types::*;
