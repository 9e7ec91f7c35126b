use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::SupabaseStore;

/// A change happened in a collection scoped to one owner. Carries no diff:
/// consumers react by re-fetching the whole collection, which is simple
/// and correct at this event rate.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
    pub collection: String,
    pub account_id: i64,
}

/// Change-notification feed for one collection, scoped by owner. Kept
/// behind a trait so an incremental-merge strategy can replace the
/// re-fetch trigger later without touching any consumer.
pub trait ChangeFeed: Send + Sync {
    /// Subscribe to changes for one owner. The feed stops when the
    /// returned receiver is dropped.
    fn subscribe(&self, account_id: i64) -> mpsc::Receiver<ChangeEvent>;
}

/// Polls the collection and emits an event whenever the row snapshot
/// digest changes. Detects inserts, updates and deletes alike; the first
/// poll only seeds the digest and emits nothing.
pub struct PollingChangeFeed {
    store: Arc<SupabaseStore>,
    collection: String,
    poll_interval: Duration,
}

impl PollingChangeFeed {
    pub fn new(store: Arc<SupabaseStore>, collection: &str, poll_secs: u64) -> Self {
        Self {
            store,
            collection: collection.to_string(),
            poll_interval: Duration::from_secs(poll_secs.max(1)),
        }
    }
}

impl ChangeFeed for PollingChangeFeed {
    fn subscribe(&self, account_id: i64) -> mpsc::Receiver<ChangeEvent> {
        let (tx, rx) = mpsc::channel(16);
        let store = self.store.clone();
        let collection = self.collection.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            let filters = [("account_id", account_id.to_string())];
            let mut last_digest: Option<md5::Digest> = None;
            let mut interval = tokio::time::interval(poll_interval);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                let body = match store.list_raw(&collection, &filters).await {
                    Ok(body) => body,
                    Err(e) => {
                        // transient poll failure: log and try again next tick
                        log::warn!("change feed poll failed for {collection}: {e}");
                        continue;
                    }
                };

                let digest = md5::compute(body.as_bytes());
                let changed = last_digest.is_some_and(|d| d != digest);
                last_digest = Some(digest);

                if changed {
                    let event = ChangeEvent {
                        collection: collection.clone(),
                        account_id,
                    };
                    if tx.send(event).await.is_err() {
                        // subscriber gone, stop polling
                        break;
                    }
                }
            }
        });

        rx
    }
}
