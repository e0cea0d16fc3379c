//! Application state and shared resources.

use std::sync::Arc;
use std::time::Instant;

use crate::codes::{CodeGenerator, CodeStore};
use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Code generator
    pub generator: Arc<CodeGenerator>,

    /// Outstanding codes; one instance for the life of the process
    pub store: Arc<CodeStore>,

    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state with an empty store
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            generator: Arc::new(CodeGenerator::new()),
            store: Arc::new(CodeStore::new()),
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
