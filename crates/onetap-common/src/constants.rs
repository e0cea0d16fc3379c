//! Shared constants for Onetap components.

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Number of characters in every issued code
pub const CODE_LENGTH: usize = 15;

/// Characters a code may contain: 26 upper, 26 lower, 10 digits, 28 symbols.
///
/// Quotes and backslash are left out so codes survive JSON and shell
/// quoting untouched.
pub const CODE_ALPHABET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()_+-=[]{}|;:,.<>?~/";

/// Size of [`CODE_ALPHABET`]
pub const ALPHABET_LEN: usize = 90;

const _: () = assert!(CODE_ALPHABET.len() == ALPHABET_LEN);

/// Outstanding-code count at which the store watcher starts warning
pub const DEFAULT_STORE_WARN_THRESHOLD: usize = 100_000;

/// Store watcher interval (seconds)
pub const DEFAULT_STORE_WATCH_INTERVAL_SECS: u64 = 60;

/// Response messages returned by the HTTP layer
pub mod messages {
    /// Liveness text for `GET /`
    pub const LIVENESS: &str = "Onetap code service is running";

    pub const CODE_GENERATED: &str = "Code generated successfully";

    pub const CODE_VERIFIED: &str = "Code verified successfully";

    /// Shared by every redemption failure so callers can't tell causes apart
    pub const CODE_INVALID: &str = "Invalid or expired code";

    pub const CODE_REQUIRED: &str = "Code is required";
}
