#![allow(unexpected_cfgs)] // Silence cfg warnings from objc macros

//! macOS backend of the nano GUI toolkit.
//!
//! Everything at this level is pure Rust (no FFI) so it builds and tests on
//! any OS: geometry, event snapshots, RAII handle disciplines, owner binding,
//! view bookkeeping and the deferred-call queue. The AppKit glue lives under
//! `platform::macos` and builds on these pieces.

pub mod binding;
pub mod deferred;
pub mod error;
pub mod events;
pub mod geometry;
pub mod handles;
pub mod hierarchy;
pub mod model;
pub mod runtime;

#[cfg(target_os = "macos")]
pub mod platform;

pub use error::{Result, ToolkitError};
pub use events::{Event, EventModifiers, EventType};
pub use geometry::{Color, Point, Rect, Size};
pub use handles::{CfHandle, ObjcHandle};
pub use hierarchy::{ViewId, ViewTree};
pub use model::{ViewFlags, WindowFlags};

#[cfg(target_os = "macos")]
pub use platform::macos::ui::{
    Application, ApplicationHandler, Font, GraphicContext, Image, View, ViewHandler, Window,
    WindowDelegate, WindowProxy,
};
