//! Platform-specific implementations.
//!
//! Only macOS is supported. The submodule binds the pure core (handles,
//! binding, hierarchy, deferred queue, event snapshots) to AppKit.

#[cfg(target_os = "macos")]
pub mod macos;
