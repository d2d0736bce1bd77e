//! Reading `NSEvent`s into [`Event`] snapshots.

use std::cell::RefCell;
use std::ffi::c_void;

use objc2::sel;

use crate::events::{ClickTracker, Event, EventParts, EventType};
use crate::geometry::Point;
use crate::platform::macos::ffi::bridge::{id, nil, NSPoint, NSRect};
use crate::platform::macos::ffi::coregraphics::*;
use crate::platform::macos::objc::call;

/// Longest key string read from a keyboard event.
const MAX_KEY_CHARS: usize = 20;

thread_local! {
    // Events are only delivered on the main thread.
    static CLICKS: RefCell<ClickTracker> = const { RefCell::new(ClickTracker::new()) };
}

/// Snapshot `ns_event` as seen by `view`.
///
/// # Safety
///
/// `ns_event` must be a live `NSEvent` and `view` a live `NSView`.
pub(crate) unsafe fn snapshot(ns_event: id, view: id) -> Event {
    let parts = read_parts(ns_event, view);
    CLICKS.with(|clicks| Event::from_parts(parts, &mut clicks.borrow_mut()))
}

unsafe fn read_parts(ns_event: id, view: id) -> EventParts {
    let mut parts = EventParts {
        native: Some(ns_event as *mut c_void),
        ..EventParts::default()
    };

    let cg: *mut CGEvent = call(ns_event, sel!(CGEvent), ());
    if cg.is_null() {
        return parts;
    }
    parts.cg_type = CGEventGetType(cg);
    parts.flags = CGEventGetFlags(cg);
    parts.timestamp = CGEventGetTimestamp(cg);
    parts.button_number = CGEventGetIntegerValueField(cg, MOUSE_EVENT_BUTTON_NUMBER);
    parts.click_state = CGEventGetIntegerValueField(cg, MOUSE_EVENT_CLICK_STATE);
    parts.screen_location = Point::from_native(CGEventGetLocation(cg));

    let kind = EventType::from_cg(parts.cg_type);
    if kind.is_mouse_event() || kind.is_scroll_or_drag_event() {
        let in_window: NSPoint = call(ns_event, sel!(locationInWindow), ());
        let in_view: NSPoint = call(view, sel!(convertPoint:fromView:), (in_window, nil));
        parts.location = Point::from_native(in_view);
        parts.window_location = flip_to_window_top(ns_event, in_window);
    }
    if kind.is_scroll_or_drag_event() {
        let dx: f64 = call(ns_event, sel!(deltaX), ());
        let dy: f64 = call(ns_event, sel!(deltaY), ());
        parts.delta = Point::new(dx as f32, dy as f32);
    }
    if kind.is_key_event() {
        parts.characters = key_characters(cg);
    }
    parts
}

/// Window coordinates with the origin at the top of the content area.
unsafe fn flip_to_window_top(ns_event: id, in_window: NSPoint) -> Point<f32> {
    let window: id = call(ns_event, sel!(window), ());
    if window.is_null() {
        return Point::from_native(in_window);
    }
    let content: NSRect = call(window, sel!(contentLayoutRect), ());
    Point::new(in_window.x as f32, (content.size.height - in_window.y) as f32)
}

unsafe fn key_characters(cg: *mut CGEvent) -> Vec<u16> {
    let mut buffer = [0u16; MAX_KEY_CHARS];
    let mut len = 0usize;
    CGEventKeyboardGetUnicodeString(cg, MAX_KEY_CHARS, &mut len, buffer.as_mut_ptr());
    buffer[..len.min(MAX_KEY_CHARS)].to_vec()
}
