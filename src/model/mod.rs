//! Toolkit configuration model.
//!
//! This module contains pure data (no FFI dependencies): the constants the
//! native glue is configured with and the flag types applications pass in.
//!
//! The mapping is consumed by `platform::macos::ui`.

pub mod constants;
pub mod flags;

pub use constants::*;
pub use flags::{ViewFlags, WindowFlags};
