//! Wakes the main thread to drain the deferred queue.

use std::ffi::c_void;

use crate::deferred::{self, DeferredQueue};
use crate::error::Result;
use crate::platform::macos::ffi::bridge::autoreleasepool;
use crate::platform::macos::ffi::dispatch::{dispatch_async_f, main_queue};

unsafe extern "C" fn drain_on_main(_context: *mut c_void) {
    // Autoreleased temporaries of the messages are released per drain.
    let ran = autoreleasepool(deferred::drain);
    log::trace!("main queue drained {ran} deferred message(s)");
}

/// Schedule one drain of the global queue on the main run loop.
pub fn wake_main_queue() {
    unsafe { dispatch_async_f(main_queue(), std::ptr::null_mut(), Some(drain_on_main)) }
}

/// Install the global deferred queue, woken through the main dispatch queue.
pub fn install() -> Result<()> {
    deferred::install(DeferredQueue::with_waker(wake_main_queue))
}
