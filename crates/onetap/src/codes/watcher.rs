//! Background watcher for store growth.
//!
//! Codes are only removed by redemption, so the store grows with every code
//! that is issued and never used. The watcher reports that growth to the
//! operator. It never evicts.

use std::sync::Arc;
use std::time::Duration;

use super::CodeStore;

/// Fires once each time the outstanding count crosses the threshold
#[derive(Debug)]
struct GrowthAlarm {
    threshold: usize,
    armed: bool,
}

impl GrowthAlarm {
    fn new(threshold: usize) -> Self {
        Self {
            threshold,
            armed: true,
        }
    }

    /// Returns true when `outstanding` has just reached the threshold
    fn observe(&mut self, outstanding: usize) -> bool {
        if outstanding >= self.threshold {
            let fire = self.armed;
            self.armed = false;
            fire
        } else {
            self.armed = true;
            false
        }
    }
}

/// Periodically log store size, warning when it reaches `warn_threshold`
pub async fn store_watcher(
    store: Arc<CodeStore>,
    warn_threshold: usize,
    interval: Duration,
    mut shutdown: tokio::sync::broadcast::Receiver<()>,
) {
    tracing::info!(
        warn_threshold,
        interval_secs = interval.as_secs(),
        "🧮 Store watcher started"
    );

    let mut alarm = GrowthAlarm::new(warn_threshold);

    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {
                let stats = store.stats();
                if alarm.observe(stats.outstanding) {
                    tracing::warn!(
                        outstanding = stats.outstanding,
                        warn_threshold,
                        "Outstanding codes reached warning threshold; unredeemed codes are never evicted"
                    );
                } else {
                    tracing::debug!(
                        outstanding = stats.outstanding,
                        issued = stats.issued,
                        redeemed = stats.redeemed,
                        rejected = stats.rejected,
                        "Store stats"
                    );
                }
            }
            _ = shutdown.recv() => {
                tracing::info!(
                    outstanding = store.len(),
                    "🧮 Store watcher shutting down..."
                );
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onetap_common::Code;

    #[test]
    fn test_alarm_fires_once_per_crossing() {
        let mut alarm = GrowthAlarm::new(3);
        assert!(!alarm.observe(0));
        assert!(!alarm.observe(2));
        assert!(alarm.observe(3));
        assert!(!alarm.observe(4));
        assert!(!alarm.observe(10));

        // Drops below, re-arms
        assert!(!alarm.observe(1));
        assert!(alarm.observe(5));
    }

    #[tokio::test]
    async fn test_watcher_stops_on_shutdown() {
        let store = Arc::new(CodeStore::new());
        store.issue(Code::new("Ab3!xZ9@qR2#mN1".to_string())).unwrap();

        let (shutdown_tx, _) = tokio::sync::broadcast::channel::<()>(1);
        let handle = tokio::spawn(store_watcher(
            store.clone(),
            1,
            Duration::from_millis(5),
            shutdown_tx.subscribe(),
        ));

        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown_tx.send(()).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("watcher did not stop")
            .unwrap();

        // Watching never evicts
        assert_eq!(store.len(), 1);
    }
}
