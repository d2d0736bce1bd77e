//! macOS backend using AppKit via objc2.
//!
//! # Module Structure
//!
//! - `ffi`: hand-written bindings to libobjc, libdispatch, CoreFoundation,
//!   CoreGraphics and CoreText
//! - `objc`: dynamic class registry, trampolines, message dispatch and the
//!   owner ivar slot
//! - `ui`: views, windows, the application delegate, events, drawing,
//!   images and fonts
//!
//! # Architecture
//!
//! ```text
//!   ViewHandler / WindowDelegate / ApplicationHandler   (user code)
//!                        ▲
//!                        │ forward0/forward1/notify
//!   ┌────────────────────┴───────────────────────┐
//!   │ objc: DynamicClass ── owner ivar ── IvarSlot │
//!   └────────────────────┬───────────────────────┘
//!                        │ class_addMethod / class_getMethodImplementation
//!                        ▼
//!                  libobjc + AppKit
//! ```

pub mod ffi;
pub mod objc;
pub mod ui;

pub use ffi::bridge;
pub use ui::*;
