//! Re-registration on configuration change.
//!
//! Configuration snapshots arrive on a `watch` channel as JSON objects.
//! A controller owns one live registration at a time and replaces it only
//! when one of its tracked fields actually changed, so toggling unrelated
//! settings never churns registrations.

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Owns the controller worker and, through it, the active registration.
///
/// Dropping the handle cancels the subscription; [`ControllerHandle::dispose`]
/// additionally waits until the active registration has been dropped.
pub struct ControllerHandle {
    token: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl ControllerHandle {
    /// Stop watching, drop the active registration, and wait for the worker.
    pub async fn dispose(mut self) {
        self.token.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
    }
}

impl Drop for ControllerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Calls `register` with the current snapshot, then again with each later
/// snapshot whose `tracked_fields` differ from the snapshot active at the
/// last registration. The previous registration is dropped before the new
/// one is created; at most one is ever live.
///
/// Untracked fields change freely without triggering anything, but the
/// full snapshot (untracked fields included) is what `register` receives
/// on the next triggered call.
pub fn reregister_on_change<H, F>(
    mut config: watch::Receiver<Value>,
    tracked_fields: Vec<String>,
    mut register: F,
) -> ControllerHandle
where
    H: Send + 'static,
    F: FnMut(&Value) -> H + Send + 'static,
{
    let token = CancellationToken::new();
    let worker_token = token.clone();
    let worker = tokio::spawn(async move {
        let mut snapshot = config.borrow_and_update().clone();
        let mut active = Some(register(&snapshot));
        loop {
            tokio::select! {
                _ = worker_token.cancelled() => break,
                changed = config.changed() => {
                    if changed.is_err() {
                        // Config source gone: nothing further to react to,
                        // but the registration stays live until disposal.
                        worker_token.cancelled().await;
                        break;
                    }
                    let next = config.borrow_and_update().clone();
                    if tracked_fields_differ(&snapshot, &next, &tracked_fields) {
                        drop(active.take());
                        active = Some(register(&next));
                        snapshot = next;
                    }
                }
            }
        }
        drop(active);
    });
    ControllerHandle {
        token,
        worker: Some(worker),
    }
}

fn field<'a>(snapshot: &'a Value, name: &str) -> &'a Value {
    snapshot.get(name).unwrap_or(&Value::Null)
}

/// Shallow per-field comparison; a missing field compares as `null`.
fn tracked_fields_differ(previous: &Value, next: &Value, tracked: &[String]) -> bool {
    tracked
        .iter()
        .any(|name| field(previous, name) != field(next, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Increments a counter when dropped, standing in for a registration.
    struct Registration {
        disposals: Arc<AtomicUsize>,
    }

    impl Drop for Registration {
        fn drop(&mut self) {
            self.disposals.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct Counters {
        registrations: Arc<AtomicUsize>,
        disposals: Arc<AtomicUsize>,
    }

    fn controller(
        config: watch::Receiver<Value>,
        tracked: &[&str],
    ) -> (ControllerHandle, Counters) {
        let registrations = Arc::new(AtomicUsize::new(0));
        let disposals = Arc::new(AtomicUsize::new(0));
        let reg = registrations.clone();
        let disp = disposals.clone();
        let handle = reregister_on_change(
            config,
            tracked.iter().map(|s| s.to_string()).collect(),
            move |_snapshot| {
                reg.fetch_add(1, Ordering::SeqCst);
                Registration {
                    disposals: disp.clone(),
                }
            },
        );
        (
            handle,
            Counters {
                registrations,
                disposals,
            },
        )
    }

    async fn wait_for(counter: &AtomicUsize, expected: usize) {
        for _ in 0..200 {
            if counter.load(Ordering::SeqCst) == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        panic!(
            "counter stuck at {} waiting for {expected}",
            counter.load(Ordering::SeqCst)
        );
    }

    #[tokio::test]
    async fn registers_with_initial_snapshot() {
        let (_tx, rx) = watch::channel(json!({"protocol.enabled": false}));
        let (handle, counters) = controller(rx, &["protocol.enabled"]);
        wait_for(&counters.registrations, 1).await;
        assert_eq!(counters.disposals.load(Ordering::SeqCst), 0);
        handle.dispose().await;
    }

    #[tokio::test]
    async fn untracked_change_does_not_reregister() {
        let (tx, rx) = watch::channel(json!({"protocol.enabled": false, "theme": "light"}));
        let (handle, counters) = controller(rx, &["protocol.enabled"]);
        wait_for(&counters.registrations, 1).await;

        tx.send(json!({"protocol.enabled": false, "theme": "dark"}))
            .unwrap();
        // Give the worker a chance to (wrongly) react.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(counters.registrations.load(Ordering::SeqCst), 1);
        assert_eq!(counters.disposals.load(Ordering::SeqCst), 0);
        handle.dispose().await;
    }

    #[tokio::test]
    async fn tracked_change_reregisters_and_disposes_prior() {
        let (tx, rx) = watch::channel(json!({"protocol.enabled": false}));
        let (handle, counters) = controller(rx, &["protocol.enabled"]);
        wait_for(&counters.registrations, 1).await;

        tx.send(json!({"protocol.enabled": true})).unwrap();
        wait_for(&counters.registrations, 2).await;
        assert_eq!(counters.disposals.load(Ordering::SeqCst), 1);
        handle.dispose().await;
        assert_eq!(counters.disposals.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn missing_tracked_field_compares_as_null() {
        let (tx, rx) = watch::channel(json!({}));
        let (handle, counters) = controller(rx, &["protocol.endpoint"]);
        wait_for(&counters.registrations, 1).await;

        // null -> null: no trigger
        tx.send(json!({"other": 1})).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(counters.registrations.load(Ordering::SeqCst), 1);

        // null -> value: trigger
        tx.send(json!({"protocol.endpoint": "wss://analyzer"})).unwrap();
        wait_for(&counters.registrations, 2).await;
        handle.dispose().await;
    }

    #[tokio::test]
    async fn dispose_drops_last_registration_exactly_once() {
        let (_tx, rx) = watch::channel(json!({"x": 1}));
        let (handle, counters) = controller(rx, &["x"]);
        wait_for(&counters.registrations, 1).await;
        handle.dispose().await;
        assert_eq!(counters.disposals.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn closed_config_source_keeps_registration_until_disposal() {
        let (tx, rx) = watch::channel(json!({"x": 1}));
        let (handle, counters) = controller(rx, &["x"]);
        wait_for(&counters.registrations, 1).await;

        drop(tx);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(counters.disposals.load(Ordering::SeqCst), 0);
        handle.dispose().await;
        assert_eq!(counters.disposals.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn untracked_fields_ride_along_on_triggered_snapshot() {
        let (tx, rx) = watch::channel(json!({"tracked": 1, "extra": "a"}));
        let seen = Arc::new(std::sync::Mutex::new(Vec::<Value>::new()));
        let sink = seen.clone();
        let handle = reregister_on_change(rx, vec!["tracked".to_string()], move |snapshot| {
            sink.lock().unwrap().push(snapshot.clone());
        });

        // Untracked-only change, then a tracked change carrying it.
        tx.send(json!({"tracked": 1, "extra": "b"})).unwrap();
        tx.send(json!({"tracked": 2, "extra": "b"})).unwrap();
        for _ in 0..200 {
            if seen.lock().unwrap().len() == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
        handle.dispose().await;

        let snapshots = seen.lock().unwrap().clone();
        assert_eq!(snapshots.len(), 2);
        assert_eq!(snapshots[1], json!({"tracked": 2, "extra": "b"}));
    }
}
