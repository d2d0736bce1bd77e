//! FFI bindings for the Objective-C runtime (libobjc).
//!
//! objc2's `ClassBuilder` panics when a step fails. Class construction here
//! needs every step to be fallible and to take caller-supplied type
//! encodings, so the C API is declared directly.

use std::ffi::c_char;

use objc2::runtime::{AnyClass, AnyObject, AnyProtocol, Bool, Ivar, Sel};

/// Untyped method implementation pointer.
pub type Imp = unsafe extern "C-unwind" fn();

// === FFI Declarations ===

#[link(name = "objc", kind = "dylib")]
extern "C" {
    pub fn objc_getMetaClass(name: *const c_char) -> *const AnyClass;

    pub fn objc_allocateClassPair(
        superclass: *const AnyClass,
        name: *const c_char,
        extra_bytes: usize,
    ) -> *mut AnyClass;

    pub fn objc_registerClassPair(cls: *mut AnyClass);

    pub fn objc_disposeClassPair(cls: *mut AnyClass);

    pub fn class_conformsToProtocol(cls: *const AnyClass, protocol: *const AnyProtocol) -> Bool;

    pub fn class_addIvar(
        cls: *mut AnyClass,
        name: *const c_char,
        size: usize,
        alignment: u8,
        types: *const c_char,
    ) -> Bool;

    pub fn class_addMethod(cls: *mut AnyClass, name: Sel, imp: Imp, types: *const c_char) -> Bool;

    pub fn class_addProtocol(cls: *mut AnyClass, protocol: *const AnyProtocol) -> Bool;

    pub fn class_getInstanceVariable(cls: *const AnyClass, name: *const c_char) -> *const Ivar;

    pub fn class_getMethodImplementation(cls: *const AnyClass, name: Sel) -> Option<Imp>;

    pub fn class_createInstance(cls: *const AnyClass, extra_bytes: usize) -> *mut AnyObject;

    pub fn ivar_getOffset(ivar: *const Ivar) -> isize;

    pub fn object_getClass(obj: *const AnyObject) -> *const AnyClass;

    pub fn objc_release(obj: *mut AnyObject);

    pub fn objc_getProtocol(name: *const c_char) -> *const AnyProtocol;

    pub fn objc_allocateProtocol(name: *const c_char) -> *mut AnyProtocol;

    pub fn objc_registerProtocol(protocol: *mut AnyProtocol);
}
