//! Tests for the RAII handle disciplines, using counting pointees.

mod common;

use common::Counted;
use nano_ui::{CfHandle, ObjcHandle};

// === CfHandle Tests ===

#[test]
fn cf_from_raw_does_not_retain() {
    let obj = Counted::new();
    let handle = unsafe { CfHandle::from_raw(obj.ptr()) };
    assert_eq!(obj.count(), 1);
    drop(handle);
    assert_eq!(obj.count(), 0);
}

#[test]
fn cf_retain_raw_adds_a_reference() {
    let obj = Counted::new();
    let handle = unsafe { CfHandle::retain_raw(obj.ptr()) };
    assert_eq!(obj.count(), 2);
    drop(handle);
    assert_eq!(obj.count(), 1);
}

#[test]
fn cf_clones_share_the_object() {
    let obj = Counted::new();
    let a = unsafe { CfHandle::from_raw(obj.ptr()) };
    let b = a.clone();
    let c = b.clone();
    assert_eq!(obj.count(), 3);
    assert_eq!(a.as_ptr(), c.as_ptr());
    drop((a, b, c));
    assert_eq!(obj.count(), 0);
    assert_eq!(obj.releases(), 3);
}

#[test]
fn cf_reset_to_same_object_balances_the_extra_reference() {
    let obj = Counted::new();
    let mut handle = unsafe { CfHandle::from_raw(obj.ptr()) };
    unsafe { handle.reset_to(obj.retained_ptr()) };
    assert_eq!(obj.count(), 1);
    assert_eq!(obj.releases(), 1);
    assert_eq!(handle.as_ptr(), obj.ptr());
    drop(handle);
    assert_eq!(obj.count(), 0);
}

#[test]
fn cf_reset_to_other_releases_old_first() {
    let old = Counted::new();
    let new = Counted::new();
    let mut handle = unsafe { CfHandle::from_raw(old.ptr()) };
    unsafe { handle.reset_to(new.ptr()) };
    assert_eq!(old.count(), 0);
    assert_eq!(new.count(), 1);
    assert_eq!(handle.as_ptr(), new.ptr());
    drop(handle);
    assert_eq!(new.count(), 0);
}

#[test]
fn cf_take_moves_the_reference() {
    let obj = Counted::new();
    let mut a = unsafe { CfHandle::from_raw(obj.ptr()) };
    let b = a.take();
    assert!(a.is_null());
    assert!(a.as_ptr().is_null());
    drop(a);
    assert_eq!(obj.count(), 1);
    drop(b);
    assert_eq!(obj.count(), 0);
}

#[test]
fn cf_null_handle_clones_to_null() {
    let a = CfHandle::<Counted>::null();
    let b = a.clone();
    assert!(b.is_null());
    assert!(CfHandle::<Counted>::default().is_null());
}

// === ObjcHandle Tests ===

#[test]
fn objc_drop_releases_exactly_once() {
    let obj = Counted::new();
    let handle = unsafe { ObjcHandle::from_raw(obj.ptr()) };
    drop(handle);
    assert_eq!(obj.releases(), 1);
}

#[test]
fn objc_explicit_reset_then_drop_releases_once() {
    let obj = Counted::new();
    let mut handle = unsafe { ObjcHandle::from_raw(obj.ptr()) };
    handle.reset();
    assert!(handle.is_null());
    drop(handle);
    assert_eq!(obj.releases(), 1);
}

#[test]
fn objc_into_raw_transfers_ownership() {
    let obj = Counted::new();
    let handle = unsafe { ObjcHandle::from_raw(obj.ptr()) };
    let raw = handle.into_raw();
    assert_eq!(obj.releases(), 0);
    drop(unsafe { ObjcHandle::from_raw(raw) });
    assert_eq!(obj.releases(), 1);
}

#[test]
fn objc_reset_to_same_object_keeps_one_ownership() {
    let obj = Counted::new();
    let mut handle = unsafe { ObjcHandle::from_raw(obj.ptr()) };
    unsafe { handle.reset_to(obj.retained_ptr()) };
    assert_eq!(obj.count(), 1);
    assert!(!handle.is_null());
    drop(handle);
    assert_eq!(obj.count(), 0);
    assert_eq!(obj.releases(), 2);
}

#[test]
fn objc_debug_shows_pointer() {
    let handle = ObjcHandle::<Counted>::null();
    assert!(format!("{handle:?}").starts_with("ObjcHandle("));
}
