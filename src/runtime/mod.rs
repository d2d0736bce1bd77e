//! Runtime-independent pieces of the dynamic class machinery.
//!
//! Class naming and the method type-encoding strings live here so they can
//! be tested without the Objective-C runtime.

pub mod encoding;
pub mod naming;

pub use naming::{owner_ivar_encoding, random_suffix, unique_class_name};
