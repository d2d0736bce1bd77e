//! Input event model.
//!
//! Native input (mouse, scroll, keyboard) reaches view handlers as an
//! [`Event`]: a snapshot derived eagerly from the native event right before
//! the callback runs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   EventParts   ┌─────────────┐   &Event   ┌─────────────┐
//! │   NSEvent   │ ─────────────▶ │   Event::   │ ─────────▶ │ ViewHandler │
//! │  (CGEvent)  │                │ from_parts  │            │  callbacks  │
//! └─────────────┘                └─────────────┘            └─────────────┘
//! ```
//!
//! The extraction side lives in `platform::macos::ui::event`; everything
//! here is pure and testable without FFI.
//!
//! # Module Structure
//!
//! - [`types`]: `EventType` and `EventModifiers`
//! - [`snapshot`]: `Event`, `EventParts` and the click tracker

pub mod snapshot;
pub mod types;

pub use snapshot::{ClickTracker, Event, EventParts};
pub use types::{EventModifiers, EventType};
