//! The `owner` ivar of a dynamic class instance, as an [`OwnerSlot`].

use std::ffi::c_void;

use objc2::runtime::AnyObject;

use crate::binding::OwnerSlot;
use crate::model::constants::OWNER_IVAR;
use crate::platform::macos::ffi::runtime::{class_getInstanceVariable, ivar_getOffset, object_getClass};

/// Pointer-sized ivar holding the owner back-reference.
///
/// Resolved through the object's current class, so instances that KVO has
/// moved into a runtime subclass still find the inherited ivar.
pub struct IvarSlot {
    field: *mut *mut c_void,
}

impl IvarSlot {
    /// Locate the `owner` ivar of `obj`.
    ///
    /// Objects without one (or `nil`) yield a slot that always reads null.
    ///
    /// # Safety
    ///
    /// `obj` must be `nil` or a live object.
    pub unsafe fn of(obj: *mut AnyObject) -> Self {
        let field = if obj.is_null() {
            std::ptr::null_mut()
        } else {
            let ivar = class_getInstanceVariable(object_getClass(obj), OWNER_IVAR.as_ptr());
            if ivar.is_null() {
                std::ptr::null_mut()
            } else {
                (obj as *mut u8).offset(ivar_getOffset(ivar)) as *mut *mut c_void
            }
        };
        Self { field }
    }

    pub fn exists(&self) -> bool {
        !self.field.is_null()
    }
}

impl OwnerSlot for IvarSlot {
    fn load(&self) -> *mut c_void {
        if self.field.is_null() {
            return std::ptr::null_mut();
        }
        unsafe { self.field.read() }
    }

    fn store(&self, owner: *mut c_void) {
        if self.field.is_null() {
            log::warn!("object has no owner slot; binding ignored");
            return;
        }
        unsafe { self.field.write(owner) }
    }
}
