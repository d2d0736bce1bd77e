//! RAII handles over foreign reference-counting disciplines.
//!
//! Two families, never conflated:
//!
//! - [`CfHandle`] for retain-counted objects (CoreFoundation, CoreGraphics,
//!   CoreText). Cloning retains; dropping releases.
//! - [`ObjcHandle`] for objects created with alloc/init and owned by exactly
//!   one Rust value. Move-only; dropping sends `release`.
//!
//! Both acquire a raw pointer without an extra retain, release before
//! reassignment, and leave a null handle behind on [`take`](CfHandle::take).

use std::fmt;
use std::ptr::NonNull;

/// Retain/release discipline.
///
/// # Safety
///
/// `retain` and `release` must adjust the foreign reference count of a live
/// object of this type by exactly one.
pub unsafe trait RetainCounted {
    unsafe fn retain(ptr: NonNull<Self>);
    unsafe fn release(ptr: NonNull<Self>);
}

/// Single-owner discipline: one release, never a retain.
///
/// # Safety
///
/// `release` must give up exactly one ownership reference of a live object.
pub unsafe trait ManualRelease {
    unsafe fn release(ptr: NonNull<Self>);
}

// ============================================================================
// CfHandle
// ============================================================================

pub struct CfHandle<T: RetainCounted> {
    ptr: Option<NonNull<T>>,
}

impl<T: RetainCounted> CfHandle<T> {
    pub const fn null() -> Self {
        Self { ptr: None }
    }

    /// Take ownership of a +1 reference. Null yields an empty handle.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or an owned reference to a live object.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            ptr: NonNull::new(ptr),
        }
    }

    /// Retain a borrowed (+0) reference and own the new count.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a live object.
    pub unsafe fn retain_raw(ptr: *mut T) -> Self {
        let ptr = NonNull::new(ptr);
        if let Some(p) = ptr {
            T::retain(p);
        }
        Self { ptr }
    }

    pub fn as_ptr(&self) -> *mut T {
        self.ptr.map_or(std::ptr::null_mut(), NonNull::as_ptr)
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// Release now and become null.
    pub fn reset(&mut self) {
        if let Some(p) = self.ptr.take() {
            unsafe { T::release(p) };
        }
    }

    /// Release the current object, then own `ptr`.
    ///
    /// `ptr` is always consumed: passing the object already held releases
    /// the incoming reference and keeps the stored one.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw`](Self::from_raw): `ptr` is an owned
    /// reference, even when it equals the current pointer.
    pub unsafe fn reset_to(&mut self, ptr: *mut T) {
        let new = NonNull::new(ptr);
        match new {
            // Already held; give back the extra reference.
            Some(p) if new == self.ptr => T::release(p),
            _ => {
                self.reset();
                self.ptr = new;
            }
        }
    }

    /// Give up ownership without releasing.
    pub fn into_raw(mut self) -> *mut T {
        let raw = self.as_ptr();
        self.ptr = None;
        raw
    }

    /// Move the reference out, leaving this handle null.
    pub fn take(&mut self) -> Self {
        Self {
            ptr: self.ptr.take(),
        }
    }
}

impl<T: RetainCounted> Clone for CfHandle<T> {
    fn clone(&self) -> Self {
        if let Some(p) = self.ptr {
            unsafe { T::retain(p) };
        }
        Self { ptr: self.ptr }
    }
}

impl<T: RetainCounted> Drop for CfHandle<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: RetainCounted> Default for CfHandle<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: RetainCounted> fmt::Debug for CfHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CfHandle").field(&self.as_ptr()).finish()
    }
}

// ============================================================================
// ObjcHandle
// ============================================================================

pub struct ObjcHandle<T: ManualRelease> {
    ptr: Option<NonNull<T>>,
}

impl<T: ManualRelease> ObjcHandle<T> {
    pub const fn null() -> Self {
        Self { ptr: None }
    }

    /// Take ownership of an allocated object. Null yields an empty handle.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or an owned reference to a live object.
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            ptr: NonNull::new(ptr),
        }
    }

    pub fn as_ptr(&self) -> *mut T {
        self.ptr.map_or(std::ptr::null_mut(), NonNull::as_ptr)
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    pub fn reset(&mut self) {
        if let Some(p) = self.ptr.take() {
            unsafe { T::release(p) };
        }
    }

    /// Release the current object, then own `ptr`. An incoming pointer equal
    /// to the held one is released.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw`](Self::from_raw).
    pub unsafe fn reset_to(&mut self, ptr: *mut T) {
        let new = NonNull::new(ptr);
        match new {
            // Already held; give back the extra reference.
            Some(p) if new == self.ptr => T::release(p),
            _ => {
                self.reset();
                self.ptr = new;
            }
        }
    }

    pub fn into_raw(mut self) -> *mut T {
        let raw = self.as_ptr();
        self.ptr = None;
        raw
    }

    pub fn take(&mut self) -> Self {
        Self {
            ptr: self.ptr.take(),
        }
    }
}

impl<T: ManualRelease> Drop for ObjcHandle<T> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: ManualRelease> Default for ObjcHandle<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ManualRelease> fmt::Debug for ObjcHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjcHandle").field(&self.as_ptr()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    // Single-threaded counters; the handles never leave the test thread.
    thread_local! {
        static RETAINS: Cell<usize> = const { Cell::new(0) };
        static RELEASES: Cell<usize> = const { Cell::new(0) };
    }

    struct Fake;

    unsafe impl RetainCounted for Fake {
        unsafe fn retain(_: NonNull<Self>) {
            RETAINS.with(|c| c.set(c.get() + 1));
        }
        unsafe fn release(_: NonNull<Self>) {
            RELEASES.with(|c| c.set(c.get() + 1));
        }
    }

    unsafe impl ManualRelease for Fake {
        unsafe fn release(_: NonNull<Self>) {
            RELEASES.with(|c| c.set(c.get() + 1));
        }
    }

    fn counts() -> (usize, usize) {
        (RETAINS.with(Cell::get), RELEASES.with(Cell::get))
    }

    fn fake_ptr() -> *mut Fake {
        NonNull::<Fake>::dangling().as_ptr()
    }

    #[test]
    fn test_drop_releases_once() {
        let before = counts();
        drop(unsafe { CfHandle::from_raw(fake_ptr()) });
        assert_eq!(counts().1 - before.1, 1);
    }

    #[test]
    fn test_null_handle_releases_nothing() {
        let before = counts();
        drop(CfHandle::<Fake>::null());
        drop(ObjcHandle::<Fake>::null());
        assert_eq!(counts(), before);
    }

    #[test]
    fn test_clone_retains() {
        let before = counts();
        let a = unsafe { CfHandle::from_raw(fake_ptr()) };
        let b = a.clone();
        assert_eq!(counts().0 - before.0, 1);
        drop(a);
        drop(b);
        assert_eq!(counts().1 - before.1, 2);
    }

    #[test]
    fn test_take_leaves_source_null() {
        let before = counts();
        let mut a = unsafe { ObjcHandle::from_raw(fake_ptr()) };
        let b = a.take();
        assert!(a.is_null());
        assert!(!b.is_null());
        drop(a);
        assert_eq!(counts().1, before.1);
        drop(b);
        assert_eq!(counts().1 - before.1, 1);
    }

    #[test]
    fn test_reset_to_releases_previous() {
        let before = counts();
        let mut a = unsafe { CfHandle::from_raw(fake_ptr()) };
        unsafe { a.reset_to(std::ptr::null_mut()) };
        assert_eq!(counts().1 - before.1, 1);
        assert!(a.is_null());
    }

    #[test]
    fn test_reset_to_held_pointer_releases_incoming() {
        let before = counts();
        let mut a = unsafe { CfHandle::from_raw(fake_ptr()) };
        unsafe { a.reset_to(fake_ptr()) };
        assert_eq!(counts().1 - before.1, 1);
        assert_eq!(a.as_ptr(), fake_ptr());
        drop(a);
        assert_eq!(counts().1 - before.1, 2);
    }

    #[test]
    fn test_into_raw_skips_release() {
        let before = counts();
        let a = unsafe { CfHandle::from_raw(fake_ptr()) };
        let raw = a.into_raw();
        assert_eq!(raw, fake_ptr());
        assert_eq!(counts(), before);
    }
}
