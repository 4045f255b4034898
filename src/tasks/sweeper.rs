//! TTL Sweeper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// Ticks every `period`, first firing one full period after the call. Each tick
/// takes the write lock only for the duration of one sweep; the wait
/// itself happens without holding the lock.
///
/// The task exits when `true` is sent on `shutdown` or when its sender is
/// dropped. Shutdown is checked ahead of a pending tick.
///
/// # Returns
/// A JoinHandle for the spawned task. Awaiting it after signalling shutdown
/// guarantees no further sweep runs.
///
/// # Panics
/// Panics if `period` is zero or if called outside a Tokio runtime.
pub(crate) fn spawn_sweeper<V>(
    store: Arc<RwLock<CacheStore<V>>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
{
    assert!(!period.is_zero(), "sweep period must be positive");

    tokio::spawn(async move {
        info!(period_ms = period.as_millis() as u64, "Starting TTL sweeper");

        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    // Err means the owning cache was dropped
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    let removed = store.write().await.sweep();

                    if removed > 0 {
                        info!("TTL sweep: removed {} expired entries", removed);
                    } else {
                        debug!("TTL sweep: no expired entries found");
                    }
                }
            }
        }

        info!("TTL sweeper stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_millis(10);

    fn shared_store() -> Arc<RwLock<CacheStore<&'static str>>> {
        Arc::new(RwLock::new(CacheStore::new(100, TTL)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_expired_entries() {
        let store = shared_store();
        store.write().await.set("expire_soon".to_string(), "value");

        let (tx, rx) = watch::channel(false);
        let handle = spawn_sweeper(store.clone(), TTL, rx);

        time::sleep(TTL * 2 + Duration::from_millis(1)).await;

        assert_eq!(store.read().await.get("expire_soon"), None);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_keeps_running_after_first_tick() {
        let store = shared_store();

        let (tx, rx) = watch::channel(false);
        let handle = spawn_sweeper(store.clone(), TTL, rx);

        // Written after the first sweep, must be reclaimed by a later one
        time::sleep(TTL + Duration::from_millis(1)).await;
        store.write().await.set("late".to_string(), "value");
        time::sleep(TTL * 3).await;

        let guard = store.read().await;
        assert_eq!(guard.get("late"), None);
        assert!(guard.stats().sweeps >= 3);
        drop(guard);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_preserves_fresh_entries() {
        let store = Arc::new(RwLock::new(CacheStore::new(100, Duration::from_secs(3600))));
        store.write().await.set("long_lived".to_string(), "value");

        let (tx, rx) = watch::channel(false);
        let handle = spawn_sweeper(store.clone(), Duration::from_millis(10), rx);

        time::sleep(Duration::from_millis(55)).await;

        assert_eq!(store.read().await.get("long_lived"), Some("value"));

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_on_signal() {
        let store = shared_store();
        let (tx, rx) = watch::channel(false);
        let handle = spawn_sweeper(store.clone(), TTL, rx);

        tx.send(true).unwrap();
        handle.await.unwrap();

        // No sweep runs once stopped
        store.write().await.set("kept".to_string(), "value");
        time::sleep(TTL * 5).await;
        assert_eq!(store.read().await.get("kept"), Some("value"));
    }

    #[tokio::test(start_paused = true)]
    #[should_panic(expected = "sweep period must be positive")]
    async fn test_sweeper_rejects_zero_period() {
        let (_tx, rx) = watch::channel(false);
        let _handle = spawn_sweeper(shared_store(), Duration::ZERO, rx);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_when_sender_dropped() {
        let (tx, rx) = watch::channel(false);
        let handle = spawn_sweeper(shared_store(), TTL, rx);

        drop(tx);

        handle.await.unwrap();
    }
}
