//! Tests for owner binding through the public slot API.

mod common;

use common::Target;
use nano_ui::binding::{bind, is_bound, unbind, with_owner, OwnerCell};

// === Bind / Unbind ===

#[test]
fn fresh_slot_is_unbound() {
    let slot = OwnerCell::new();
    assert!(!is_bound(&slot));
    assert!(!is_bound(&OwnerCell::default()));
}

#[test]
fn bound_slot_reaches_the_owner() {
    let owner = Target::named("first");
    let slot = OwnerCell::new();
    unsafe { bind(&slot, &owner) };

    assert!(is_bound(&slot));
    let label = unsafe { with_owner(&slot, |o: &Target| o.hit()) };
    assert_eq!(label, "first");
    assert_eq!(owner.hits.get(), 1);
}

#[test]
fn unbound_slot_returns_default_without_calling() {
    let owner = Target::named("gone");
    let slot = OwnerCell::new();
    unsafe { bind(&slot, &owner) };
    unbind(&slot);

    assert!(!is_bound(&slot));
    let label: &str = unsafe { with_owner(&slot, |o: &Target| o.hit()) };
    let reply: bool = unsafe { with_owner(&slot, |_: &Target| true) };
    let count: u32 = unsafe { with_owner(&slot, |o: &Target| o.hits.get() + 1) };
    assert_eq!(label, "");
    assert!(!reply);
    assert_eq!(count, 0);
    assert_eq!(owner.hits.get(), 0);
}

#[test]
fn unbind_twice_is_harmless() {
    let slot = OwnerCell::new();
    unbind(&slot);
    unbind(&slot);
    assert!(!is_bound(&slot));
}

// === Re-binding ===

#[test]
fn rebinding_switches_owner() {
    let first = Target::named("first");
    let second = Target::named("second");
    let slot = OwnerCell::new();

    unsafe { bind(&slot, &first) };
    unsafe { bind(&slot, &second) };
    let label = unsafe { with_owner(&slot, |o: &Target| o.hit()) };

    assert_eq!(label, "second");
    assert_eq!(first.hits.get(), 0);
    assert_eq!(second.hits.get(), 1);
}

#[test]
fn rebinding_after_unbind_restores_delivery() {
    let owner = Target::named("back");
    let slot = OwnerCell::new();

    unsafe { bind(&slot, &owner) };
    unbind(&slot);
    unsafe { bind(&slot, &owner) };

    let label = unsafe { with_owner(&slot, |o: &Target| o.hit()) };
    assert_eq!(label, "back");
    assert_eq!(owner.hits.get(), 1);
}
