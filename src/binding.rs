//! Owner binding: the back-pointer from a native object to its Rust owner.
//!
//! A slot is either null or points at a live owner. Trampolines read it with
//! [`with_owner`]; when it is null they return `R::default()` without touching
//! the owner, so a notification that arrives during teardown (after
//! [`unbind`]) never reaches a half-destroyed owner. Such drops are logged at
//! trace level.

use std::cell::Cell;
use std::ffi::c_void;

/// A place holding one raw owner pointer.
pub trait OwnerSlot {
    fn load(&self) -> *mut c_void;
    fn store(&self, owner: *mut c_void);
}

/// Point `slot` at `owner`.
///
/// # Safety
///
/// `owner` must stay at a stable address and outlive the binding; call
/// [`unbind`] before it is dropped or moved.
pub unsafe fn bind<S: OwnerSlot + ?Sized, O>(slot: &S, owner: &O) {
    slot.store(owner as *const O as *mut c_void);
}

/// Clear `slot`. Later deliveries take the null-owner path.
pub fn unbind<S: OwnerSlot + ?Sized>(slot: &S) {
    slot.store(std::ptr::null_mut());
}

pub fn is_bound<S: OwnerSlot + ?Sized>(slot: &S) -> bool {
    !slot.load().is_null()
}

/// Run `f` on the bound owner, or return `R::default()` if the slot is null.
///
/// # Safety
///
/// A non-null slot must point at a live `O` (the [`bind`] contract).
pub unsafe fn with_owner<O, R, S, F>(slot: &S, f: F) -> R
where
    R: Default,
    S: OwnerSlot + ?Sized,
    F: FnOnce(&O) -> R,
{
    let raw = slot.load() as *const O;
    match raw.as_ref() {
        Some(owner) => f(owner),
        None => {
            log::trace!("dispatch into unbound owner slot, returning default");
            R::default()
        }
    }
}

/// In-memory slot, for owners that are not backed by a native object.
#[derive(Debug)]
pub struct OwnerCell {
    ptr: Cell<*mut c_void>,
}

impl OwnerCell {
    pub const fn new() -> Self {
        Self {
            ptr: Cell::new(std::ptr::null_mut()),
        }
    }
}

impl Default for OwnerCell {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnerSlot for OwnerCell {
    fn load(&self) -> *mut c_void {
        self.ptr.get()
    }

    fn store(&self, owner: *mut c_void) {
        self.ptr.set(owner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owner {
        value: i32,
    }

    #[test]
    fn test_bound_owner_is_reached() {
        let owner = Owner { value: 41 };
        let slot = OwnerCell::new();
        unsafe { bind(&slot, &owner) };

        let got: i32 = unsafe { with_owner(&slot, |o: &Owner| o.value + 1) };
        assert_eq!(got, 42);
    }

    #[test]
    fn test_unbound_slot_returns_default() {
        let slot = OwnerCell::new();
        let got: i32 = unsafe { with_owner(&slot, |o: &Owner| o.value) };
        assert_eq!(got, 0);
    }

    #[test]
    fn test_unbind_switches_to_null_path() {
        let owner = Owner { value: 7 };
        let slot = OwnerCell::new();
        unsafe { bind(&slot, &owner) };
        assert!(is_bound(&slot));

        unbind(&slot);
        assert!(!is_bound(&slot));

        let mut reached = false;
        let got: bool = unsafe {
            with_owner(&slot, |_: &Owner| {
                reached = true;
                true
            })
        };
        assert!(!got);
        assert!(!reached);
    }
}
