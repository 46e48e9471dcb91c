//!
//! [`CompletionGate`] multiplexes a group of independent asynchronous
//! operations into a single "all done" notification.
//!

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

type CompletionFn = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct State {
    pending: usize,
    callback: Option<CompletionFn>,
}

#[derive(Default)]
struct Inner {
    state: Mutex<State>,
}

impl Inner {
    fn check_completion(&self) {
        let callback = {
            let mut state = self.state.lock().unwrap();
            if state.pending == 0 {
                state.callback.take()
            } else {
                None
            }
        };
        // invoked outside of the lock; `take()` guarantees at-most-once
        if let Some(callback) = callback {
            callback();
        }
    }
}

/// Tracks a set of in-flight operations and fires a completion callback
/// once, after every tracked operation has released and the callback has
/// been registered. Registering the callback when nothing is pending
/// (or nothing was ever begun) fires it immediately.
#[derive(Default, Clone)]
pub struct CompletionGate {
    inner: Arc<Inner>,
}

impl CompletionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin tracking an operation. The returned [`Release`] is a
    /// one-shot handle; releasing it more than once has no further effect.
    pub fn begin(&self) -> Release {
        self.inner.state.lock().unwrap().pending += 1;
        Release {
            inner: self.inner.clone(),
            released: AtomicBool::new(false),
        }
    }

    /// Register the completion callback and immediately check whether
    /// everything has already finished.
    pub fn on_complete<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.state.lock().unwrap().callback = Some(Box::new(callback));
        self.inner.check_completion();
    }

    /// Number of operations currently tracked.
    pub fn pending(&self) -> usize {
        self.inner.state.lock().unwrap().pending
    }
}

/// One-shot release handle returned by [`CompletionGate::begin`].
pub struct Release {
    inner: Arc<Inner>,
    released: AtomicBool,
}

impl Release {
    /// Mark the tracked operation as finished. Idempotent.
    pub fn release(&self) {
        if !self.released.swap(true, Ordering::SeqCst) {
            self.inner.state.lock().unwrap().pending -= 1;
            self.inner.check_completion();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let hit = count.clone();
        (count, move || {
            hit.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn completes_once_after_all_releases() {
        let gate = CompletionGate::new();
        let releases = (0..3).map(|_| gate.begin()).collect::<Vec<_>>();
        for release in releases.iter() {
            release.release();
        }

        let (count, callback) = counter();
        gate.on_complete(callback);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // releasing again must not re-fire
        for release in releases.iter() {
            release.release();
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn completes_immediately_without_operations() {
        let gate = CompletionGate::new();
        let (count, callback) = counter();
        gate.on_complete(callback);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn waits_for_outstanding_operations() {
        let gate = CompletionGate::new();
        let first = gate.begin();
        let second = gate.begin();

        let (count, callback) = counter();
        gate.on_complete(callback);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        first.release();
        assert_eq!(count.load(Ordering::SeqCst), 0);
        second.release();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn release_is_idempotent() {
        let gate = CompletionGate::new();
        let first = gate.begin();
        let second = gate.begin();

        first.release();
        first.release();
        assert_eq!(gate.pending(), 1);

        let (count, callback) = counter();
        gate.on_complete(callback);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        second.release();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn completes_across_tasks() {
        let gate = CompletionGate::new();
        let releases = (0..4).map(|_| gate.begin()).collect::<Vec<_>>();

        let (count, callback) = counter();
        gate.on_complete(callback);

        let handles = releases
            .into_iter()
            .map(|release| {
                tokio::spawn(async move {
                    workflow_core::task::sleep(Duration::from_millis(10)).await;
                    release.release();
                })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(gate.pending(), 0);
    }
}
