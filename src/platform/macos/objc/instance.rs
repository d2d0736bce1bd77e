//! Owned runtime objects: the alloc/init/release discipline.

use std::ptr::NonNull;

use objc2::runtime::{AnyObject, Sel};
use objc2::{msg_send, sel};

use super::message::{call, MessageArguments};
use crate::error::{Result, ToolkitError};
use crate::handles::{ManualRelease, ObjcHandle};
use crate::platform::macos::ffi::bridge::lookup_class;
use crate::platform::macos::ffi::runtime::objc_release;

// SAFETY: `objc_release` gives up exactly one reference.
unsafe impl ManualRelease for AnyObject {
    unsafe fn release(ptr: NonNull<Self>) {
        objc_release(ptr.as_ptr());
    }
}

/// `[[class_name alloc] <init>:args...]`, owned.
///
/// A failing initializer yields a null handle, as in Objective-C.
///
/// # Safety
///
/// `init` must be an initializer of `class_name` taking `A` and returning
/// the object.
pub unsafe fn create_object<A: MessageArguments>(
    class_name: &str,
    init: Sel,
    args: A,
) -> Result<ObjcHandle<AnyObject>> {
    let cls = lookup_class(class_name)
        .ok_or_else(|| ToolkitError::ClassUnavailable(class_name.to_string()))?;
    let allocated: *mut AnyObject = msg_send![cls, alloc];
    Ok(initialize(allocated, init, args))
}

/// Send an initializer to a freshly allocated object and take ownership of
/// the result.
///
/// # Safety
///
/// `allocated` must be a +1 object from `alloc`/`class_createInstance`;
/// ownership passes to the initializer.
pub unsafe fn initialize<A: MessageArguments>(
    allocated: *mut AnyObject,
    init: Sel,
    args: A,
) -> ObjcHandle<AnyObject> {
    let object: *mut AnyObject = call(allocated, init, args);
    ObjcHandle::from_raw(object)
}

/// `[[class_name alloc] init]`.
///
/// # Safety
///
/// `class_name` must support plain `init`.
pub unsafe fn new_object(class_name: &str) -> Result<ObjcHandle<AnyObject>> {
    create_object(class_name, sel!(init), ())
}
