//! FFI bindings for libdispatch (main queue only).

use std::ffi::c_void;
use std::ptr::addr_of;

pub type DispatchQueue = *const c_void;

// === FFI Declarations ===

#[link(name = "System", kind = "dylib")]
extern "C" {
    static _dispatch_main_q: c_void;

    pub fn dispatch_async_f(
        queue: DispatchQueue,
        context: *mut c_void,
        work: Option<unsafe extern "C" fn(*mut c_void)>,
    );
}

/// The queue serviced by the main thread's run loop.
pub fn main_queue() -> DispatchQueue {
    unsafe { addr_of!(_dispatch_main_q) }
}
