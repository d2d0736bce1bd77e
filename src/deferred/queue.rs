//! Thread-safe deferred-call queue.
//!
//! The queue provides a simple post/drain mechanism where:
//! - Any thread can post work via `DeferredQueue::post()`
//! - The UI thread runs it via `DeferredQueue::drain()`
//!
//! Entries are reference-counted and deduplicated by identity: posting the
//! same `Arc` while it is still pending (or running) is a no-op.

use std::sync::{Arc, Mutex, MutexGuard};

/// A unit of deferred work.
pub trait Message: Send + Sync {
    fn call(&self);
}

/// Adapts an `FnOnce` closure to [`Message`]; the closure runs at most once.
pub struct Callback<F> {
    f: Mutex<Option<F>>,
}

impl<F: FnOnce() + Send> Callback<F> {
    pub fn new(f: F) -> Self {
        Self {
            f: Mutex::new(Some(f)),
        }
    }
}

impl<F: FnOnce() + Send> Message for Callback<F> {
    fn call(&self) {
        let f = match self.f.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(f) = f {
            f();
        }
    }
}

/// Invoked after every successful post, from the posting thread.
pub type Waker = Box<dyn Fn() + Send + Sync>;

struct Entry {
    message: Arc<dyn Message>,
    running: bool,
}

/// Process-wide list of pending work items.
///
/// Multiple producers may post concurrently; a single consumer (the UI
/// thread) drains.
pub struct DeferredQueue {
    entries: Mutex<Vec<Entry>>,
    waker: Option<Waker>,
}

impl DeferredQueue {
    /// Create a queue without a waker; the owner is expected to drain it.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            waker: None,
        }
    }

    /// Create a queue that calls `waker` whenever new work is posted.
    pub fn with_waker<W>(waker: W) -> Self
    where
        W: Fn() + Send + Sync + 'static,
    {
        Self {
            entries: Mutex::new(Vec::new()),
            waker: Some(Box::new(waker)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Entry>> {
        // A panicking message never runs while the lock is held.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue `message`. Returns `false` if this exact message is already queued.
    pub fn post(&self, message: Arc<dyn Message>) -> bool {
        {
            let mut entries = self.lock();
            if entries.iter().any(|e| Arc::ptr_eq(&e.message, &message)) {
                log::trace!("deferred message already queued, skipping");
                return false;
            }
            entries.push(Entry {
                message,
                running: false,
            });
        }
        if let Some(waker) = &self.waker {
            waker();
        }
        true
    }

    /// Queue a closure.
    pub fn post_fn<F>(&self, f: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.post(Arc::new(Callback::new(f)))
    }

    /// Run every pending message, oldest first, and remove each once it has
    /// run (or panicked).
    ///
    /// Messages posted while draining run in the same pass. Returns how many ran.
    pub fn drain(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = {
                let mut entries = self.lock();
                entries.iter_mut().find(|e| !e.running).map(|e| {
                    e.running = true;
                    Arc::clone(&e.message)
                })
            };
            let Some(message) = next else { break };

            let running = Running { queue: self, message };
            running.message.call();
            ran += 1;
        }
        ran
    }

    /// Number of messages waiting or running.
    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }
}

/// Removes the running entry once its call returns or unwinds.
struct Running<'a> {
    queue: &'a DeferredQueue,
    message: Arc<dyn Message>,
}

impl Drop for Running<'_> {
    fn drop(&mut self) {
        self.queue.lock().retain(|e| !Arc::ptr_eq(&e.message, &self.message));
    }
}

impl Default for DeferredQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter(AtomicUsize);

    impl Message for Counter {
        fn call(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_create_queue() {
        let queue = DeferredQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.drain(), 0);
    }

    #[test]
    fn test_post_and_drain_single() {
        let queue = DeferredQueue::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));

        assert!(queue.post(counter.clone()));
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.drain(), 1);

        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_same_message_is_deduplicated() {
        let queue = DeferredQueue::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));

        assert!(queue.post(counter.clone()));
        assert!(!queue.post(counter.clone()));
        queue.drain();

        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_message_can_be_reposted_after_running() {
        let queue = DeferredQueue::new();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));

        queue.post(counter.clone());
        queue.drain();
        queue.post(counter.clone());
        queue.drain();

        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drain_runs_in_post_order() {
        let queue = DeferredQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let order = order.clone();
            queue.post_fn(move || order.lock().unwrap().push(i));
        }
        queue.drain();

        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_message_posted_while_draining_runs_in_same_pass() {
        let queue = Arc::new(DeferredQueue::new());
        let hits = Arc::new(AtomicUsize::new(0));

        let inner_queue = queue.clone();
        let inner_hits = hits.clone();
        queue.post_fn(move || {
            let hits = inner_hits.clone();
            inner_queue.post_fn(move || {
                hits.fetch_add(1, Ordering::SeqCst);
            });
        });

        assert_eq!(queue.drain(), 2);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_message_leaves_the_queue() {
        struct FailsOnce(AtomicUsize);

        impl Message for FailsOnce {
            fn call(&self) {
                if self.0.fetch_add(1, Ordering::SeqCst) == 0 {
                    panic!("first call fails");
                }
            }
        }

        let queue = DeferredQueue::new();
        let message = Arc::new(FailsOnce(AtomicUsize::new(0)));
        queue.post(message.clone());

        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| queue.drain()));
        assert!(outcome.is_err());
        assert!(queue.is_empty());

        assert!(queue.post(message.clone()));
        assert_eq!(queue.drain(), 1);
        assert_eq!(message.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_waker_called_per_post() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let w = wakes.clone();
        let queue = DeferredQueue::with_waker(move || {
            w.fetch_add(1, Ordering::SeqCst);
        });

        queue.post_fn(|| {});
        queue.post_fn(|| {});

        assert_eq!(wakes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_callback_runs_at_most_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let cb = Callback::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });

        cb.call();
        cb.call();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
