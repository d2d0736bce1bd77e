//! Shared objc2 vocabulary for the AppKit glue.
//!
//! This module provides the raw-pointer aliases (`id`, `nil`), the BOOL
//! constants and a few helpers that every glue module needs, so that
//! `platform::macos::ui` reads like plain Cocoa code.

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]

use std::ffi::CString;

// ============================================================================
// Core objc2 re-exports
// ============================================================================

pub use objc2::runtime::{AnyClass, AnyObject, Bool, Sel};
pub use objc2::{msg_send, sel};

// ============================================================================
// Type aliases
// ============================================================================

/// Objective-C object pointer.
///
/// Glue code deals in dynamically created classes, so objects are handled
/// untyped; typed objc2 wrappers are used where a framework class is known.
pub type id = *mut AnyObject;

pub const nil: id = std::ptr::null_mut();

/// Objective-C `BOOL` YES (not Rust `bool`).
pub const YES: Bool = Bool::YES;

/// Objective-C `BOOL` NO (not Rust `bool`).
pub const NO: Bool = Bool::NO;

// ============================================================================
// Foundation / AppKit re-exports
// ============================================================================

pub use objc2_foundation::{NSPoint, NSRect, NSSize, NSString};

pub use objc2::rc::Retained;

// ============================================================================
// Helper functions
// ============================================================================

/// The shared `NSApplication` instance, as a raw pointer.
#[inline]
#[allow(non_snake_case)]
pub fn NSApp() -> id {
    use objc2::ClassType;
    unsafe { msg_send![objc2_app_kit::NSApplication::class(), sharedApplication] }
}

/// Create an NSString from a Rust string slice.
#[inline]
pub fn nsstring(s: &str) -> Retained<NSString> {
    NSString::from_str(s)
}

/// Raw pointer of a retained NSString, valid while `s` is alive.
#[inline]
pub fn nsstring_ptr(s: &Retained<NSString>) -> id {
    Retained::as_ptr(s) as id
}

/// Look up a class by name.
///
/// Returns `None` for names the runtime does not know (or that contain a NUL).
#[inline]
pub fn lookup_class(name: &str) -> Option<&'static AnyClass> {
    let c_name = CString::new(name).ok()?;
    AnyClass::get(&c_name)
}

/// Register (or fetch) the selector called `name`.
pub fn selector(name: &str) -> Option<Sel> {
    let c_name = CString::new(name).ok()?;
    Some(Sel::register(&c_name))
}

// ============================================================================
// NSAutoreleasePool replacement
// ============================================================================

/// Run a closure within an autorelease pool.
#[inline]
pub fn autoreleasepool<R, F: FnOnce() -> R>(f: F) -> R {
    objc2::rc::autoreleasepool(|_| f())
}
