//! Deferred calls onto the UI thread.
//!
//! Any thread may queue work; the UI thread runs it later, once per item.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   worker    │     │   worker    │     │  UI thread  │
//! │   thread    │     │   thread    │     │  handlers   │
//! └──────┬──────┘     └──────┬──────┘     └──────┬──────┘
//!        │ post()            │ post_fn()         │ post()
//!        ▼                   ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                   DeferredQueue                     │
//! │          (Mutex<Vec<Arc<dyn Message>>>)             │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ waker → dispatch_async_f(main queue)
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                 drain() on UI thread                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`queue`]: `Message`, `Callback` and `DeferredQueue`
//! - [`global`]: installed process-wide queue with an explicit lifecycle

pub mod global;
pub mod queue;

pub use global::{drain, install, is_installed, post, post_fn, shutdown};
pub use queue::{Callback, DeferredQueue, Message};
