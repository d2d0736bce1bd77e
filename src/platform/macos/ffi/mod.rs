//! Hand-written FFI declarations for the system frameworks.
//!
//! # Module Structure
//!
//! - `bridge`: objc2 vocabulary (`id`, `nil`, `YES`/`NO`) and small helpers
//! - `runtime`: libobjc class construction and method lookup
//! - `dispatch`: libdispatch main queue
//! - `corefoundation`: CF types, retain/release, strings and dictionaries
//! - `coregraphics`: images, drawing contexts and event fields
//! - `coretext`: fonts and text lines

pub mod bridge;
pub mod corefoundation;
pub mod coregraphics;
pub mod coretext;
pub mod dispatch;
pub mod runtime;
