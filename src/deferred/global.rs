//! Global access to the process-wide deferred queue.
//!
//! The queue is installed once at application start via `install()`, then
//! any thread can post work via `post()` or `post_fn()`. At exit,
//! `shutdown()` runs what is left and uninstalls the queue.
//!
//! # Design
//!
//! - The queue is stored as `RwLock<Option<Arc<_>>>` so it has an explicit
//!   lifecycle; posting outside it returns `ToolkitError::QueueClosed`
//! - Posting holds the read lock until the message is queued (and the
//!   waker has run), so `shutdown()` either sees the message or the post
//!   fails with `QueueClosed`
//! - Draining clones the `Arc` and runs without the lock, so a message may
//!   post more work or shut the queue down
//!
//! # Example
//!
//! ```ignore
//! // At application start:
//! deferred::install(DeferredQueue::with_waker(wake_main_thread))?;
//!
//! // From any thread:
//! deferred::post_fn(|| log::info!("on the UI thread"))?;
//!
//! // On the UI thread, when woken:
//! deferred::drain();
//! ```

use std::sync::{Arc, RwLock};

use super::queue::{DeferredQueue, Message};
use crate::error::{Result, ToolkitError};

static QUEUE: RwLock<Option<Arc<DeferredQueue>>> = RwLock::new(None);

fn current() -> Option<Arc<DeferredQueue>> {
    let guard = QUEUE.read().unwrap_or_else(|e| e.into_inner());
    guard.clone()
}

/// Run `f` on the installed queue while holding the read lock.
fn with_installed<R>(f: impl FnOnce(&DeferredQueue) -> R) -> Result<R> {
    let guard = QUEUE.read().unwrap_or_else(|e| e.into_inner());
    guard.as_deref().map(f).ok_or(ToolkitError::QueueClosed)
}

/// Install the global queue.
///
/// Returns `AlreadyInstalled` if a queue is already in place.
pub fn install(queue: DeferredQueue) -> Result<()> {
    let mut guard = QUEUE.write().unwrap_or_else(|e| e.into_inner());
    if guard.is_some() {
        return Err(ToolkitError::AlreadyInstalled);
    }
    *guard = Some(Arc::new(queue));
    log::debug!("deferred queue installed");
    Ok(())
}

pub fn is_installed() -> bool {
    current().is_some()
}

/// Post a message to the global queue.
///
/// Returns whether it was enqueued (`false` if that same message is pending).
pub fn post(message: Arc<dyn Message>) -> Result<bool> {
    with_installed(|queue| queue.post(message))
}

/// Post a closure to the global queue.
pub fn post_fn<F>(f: F) -> Result<bool>
where
    F: FnOnce() + Send + 'static,
{
    with_installed(|queue| queue.post_fn(f))
}

/// Run every pending message. Does nothing when no queue is installed.
pub fn drain() -> usize {
    current().map(|q| q.drain()).unwrap_or(0)
}

/// Run what is left, then uninstall the queue. Returns how many messages ran.
pub fn shutdown() -> usize {
    let queue = {
        let mut guard = QUEUE.write().unwrap_or_else(|e| e.into_inner());
        guard.take()
    };
    match queue {
        Some(queue) => {
            let ran = queue.drain();
            log::debug!("deferred queue shut down after running {ran} message(s)");
            ran
        }
        None => 0,
    }
}
