//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};

use nano_ui::handles::{ManualRelease, RetainCounted};

/// A fake foreign object whose retain count lives in Rust.
pub struct Counted {
    count: AtomicUsize,
    releases: AtomicUsize,
}

impl Counted {
    /// Starts at a count of one, like a freshly created object.
    pub fn new() -> Box<Counted> {
        Box::new(Counted {
            count: AtomicUsize::new(1),
            releases: AtomicUsize::new(0),
        })
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn ptr(&self) -> *mut Counted {
        self as *const Counted as *mut Counted
    }

    /// Hand out another owned (+1) reference.
    pub fn retained_ptr(&self) -> *mut Counted {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.ptr()
    }
}

unsafe impl RetainCounted for Counted {
    unsafe fn retain(ptr: NonNull<Self>) {
        ptr.as_ref().count.fetch_add(1, Ordering::SeqCst);
    }

    unsafe fn release(ptr: NonNull<Self>) {
        ptr.as_ref().count.fetch_sub(1, Ordering::SeqCst);
        ptr.as_ref().releases.fetch_add(1, Ordering::SeqCst);
    }
}

unsafe impl ManualRelease for Counted {
    unsafe fn release(ptr: NonNull<Self>) {
        ptr.as_ref().count.fetch_sub(1, Ordering::SeqCst);
        ptr.as_ref().releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// An owner that counts how often a trampoline-side read reached it.
#[derive(Debug, Default)]
pub struct Target {
    pub label: &'static str,
    pub hits: std::cell::Cell<u32>,
}

impl Target {
    pub fn named(label: &'static str) -> Target {
        Target {
            label,
            hits: std::cell::Cell::new(0),
        }
    }

    pub fn hit(&self) -> &'static str {
        self.hits.set(self.hits.get() + 1);
        self.label
    }
}
