//! In-memory registry of outstanding codes.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use onetap_common::{Code, CodeError, StoreStats};

/// Outstanding codes keyed by value.
///
/// Every operation is a single critical section over the whole map, so a
/// redemption can never observe a code that a concurrent redemption is
/// about to remove. Nothing evicts entries; unredeemed codes accumulate
/// until the process exits.
#[derive(Default)]
pub struct CodeStore {
    codes: Mutex<HashMap<String, Code>>,
    stats: StoreCounters,
}

#[derive(Default)]
struct StoreCounters {
    issued: AtomicU64,
    redeemed: AtomicU64,
    rejected: AtomicU64,
}

impl CodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Map operations can't leave the table half-written, so a poisoned
    // lock still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Code>> {
        self.codes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a freshly generated code.
    ///
    /// An already-outstanding value is left untouched and reported as
    /// [`CodeError::Collision`].
    pub fn issue(&self, code: Code) -> Result<(), CodeError> {
        let created_at = code.created_at;

        match self.lock().entry(code.value.clone()) {
            Entry::Occupied(_) => {
                tracing::warn!("Generated code collides with an outstanding code");
                return Err(CodeError::Collision);
            }
            Entry::Vacant(slot) => {
                slot.insert(code);
            }
        }

        self.stats.issued.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(created_at, "Issued code");

        Ok(())
    }

    /// Consume `value` if it is outstanding.
    ///
    /// Check and removal happen under one lock acquisition: of any number
    /// of concurrent callers presenting the same code, exactly one gets
    /// `true`.
    pub fn redeem(&self, value: &str) -> bool {
        let removed = self.lock().remove(value);

        match removed {
            Some(code) => {
                self.stats.redeemed.fetch_add(1, Ordering::Relaxed);
                tracing::info!(
                    code = %redact(value),
                    age_secs = chrono::Utc::now().timestamp() - code.created_at,
                    "Code redeemed"
                );
                true
            }
            None => {
                self.stats.rejected.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(code = %redact(value), "Code rejected");
                false
            }
        }
    }

    /// Returns true if `value` is issued and not yet redeemed
    pub fn contains(&self, value: &str) -> bool {
        self.lock().contains_key(value)
    }

    /// Number of outstanding codes
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            outstanding: self.len(),
            issued: self.stats.issued.load(Ordering::Relaxed),
            redeemed: self.stats.redeemed.load(Ordering::Relaxed),
            rejected: self.stats.rejected.load(Ordering::Relaxed),
        }
    }
}

/// First three characters only; full codes never reach the logs
fn redact(value: &str) -> String {
    let head: String = value.chars().take(3).collect();
    format!("{head}***")
}
