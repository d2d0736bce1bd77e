//! Eager snapshot of one native input occurrence.

use std::ffi::c_void;

use super::types::{EventModifiers, EventType};
use crate::geometry::Point;

/// Raw values read off a native event before any derivation.
///
/// The platform layer fills this in; fields that are meaningless for the
/// event kind are ignored by [`Event::from_parts`].
#[derive(Debug, Clone, Default)]
pub struct EventParts {
    /// `CGEventType` value.
    pub cg_type: u32,
    /// `CGEventFlags`.
    pub flags: u64,
    /// `kCGMouseEventButtonNumber`.
    pub button_number: i64,
    /// `kCGMouseEventClickState`.
    pub click_state: i64,
    /// Nanoseconds since system startup.
    pub timestamp: u64,
    /// Location in the receiving view's coordinates.
    pub location: Point<f32>,
    pub delta: Point<f32>,
    /// Location in window coordinates, top-left origin.
    pub window_location: Point<f32>,
    pub screen_location: Point<f32>,
    /// UTF-16 characters produced by a key event.
    pub characters: Vec<u16>,
    pub native: Option<*mut c_void>,
}

/// Remembers where the last button went down, so that drag and up events
/// can report the originating click position.
#[derive(Debug, Default)]
pub struct ClickTracker {
    last_click: Point<f32>,
}

impl ClickTracker {
    pub const fn new() -> Self {
        Self {
            last_click: Point { x: 0.0, y: 0.0 },
        }
    }

    pub fn last_click(&self) -> Point<f32> {
        self.last_click
    }
}

/// Snapshot handed to view callbacks.
///
/// Not `Clone`, and the native pointer keeps it `!Send`: an event lives only
/// for the duration of the callback it is passed to.
#[derive(Debug)]
pub struct Event {
    event_type: EventType,
    modifiers: EventModifiers,
    timestamp: u64,
    position: Point<f32>,
    click_position: Point<f32>,
    wheel_delta: Point<f32>,
    click_count: i64,
    window_position: Point<f32>,
    screen_position: Point<f32>,
    key: String,
    native: *mut c_void,
}

impl Event {
    pub fn from_parts(parts: EventParts, tracker: &mut ClickTracker) -> Self {
        let event_type = EventType::from_cg(parts.cg_type);

        let mut position = Point::default();
        let mut click_position = Point::default();
        if event_type.is_mouse_event() {
            position = parts.location;
            if event_type.is_mouse_down() {
                tracker.last_click = position;
            }
            click_position = tracker.last_click;
        }

        let wheel_delta = if event_type.is_scroll_or_drag_event() {
            parts.delta
        } else {
            Point::default()
        };

        let click_count = if event_type.is_click_event() {
            parts.click_state
        } else {
            0
        };

        let key = if event_type.is_key_event() {
            String::from_utf16_lossy(&parts.characters)
        } else {
            String::new()
        };

        Self {
            event_type,
            modifiers: EventModifiers::from_native(parts.flags, parts.button_number),
            timestamp: parts.timestamp,
            position,
            click_position,
            wheel_delta,
            click_count,
            window_position: parts.window_location,
            screen_position: parts.screen_location,
            key,
            native: parts.native.unwrap_or(std::ptr::null_mut()),
        }
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn modifiers(&self) -> EventModifiers {
        self.modifiers
    }

    pub fn has_modifiers(&self, mods: EventModifiers) -> bool {
        self.modifiers.contains(mods)
    }

    /// Nanoseconds since system startup.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Position relative to the top-left of the receiving view.
    pub fn position(&self) -> Point<f32> {
        self.position
    }

    pub fn click_position(&self) -> Point<f32> {
        self.click_position
    }

    pub fn wheel_delta(&self) -> Point<f32> {
        self.wheel_delta
    }

    /// Number of successive clicks, for click events.
    pub fn click_count(&self) -> i64 {
        self.click_count
    }

    pub fn window_position(&self) -> Point<f32> {
        self.window_position
    }

    pub fn screen_position(&self) -> Point<f32> {
        self.screen_position
    }

    /// Characters of a key event, empty otherwise.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_mouse_event(&self) -> bool {
        self.event_type.is_mouse_event()
    }

    pub fn is_scroll_or_drag_event(&self) -> bool {
        self.event_type.is_scroll_or_drag_event()
    }

    pub fn is_click_event(&self) -> bool {
        self.event_type.is_click_event()
    }

    pub fn is_key_event(&self) -> bool {
        self.event_type.is_key_event()
    }

    /// The underlying `NSEvent`, null for synthesized events.
    pub fn native_handle(&self) -> *mut c_void {
        self.native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(cg_type: u32, x: f32, y: f32) -> EventParts {
        EventParts {
            cg_type,
            location: Point::new(x, y),
            delta: Point::new(1.5, -2.0),
            click_state: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_key_event_has_no_position() {
        let mut tracker = ClickTracker::new();
        let mut p = parts(10, 4.0, 4.0);
        p.characters = "a".encode_utf16().collect();
        let ev = Event::from_parts(p, &mut tracker);
        assert_eq!(ev.position(), Point::default());
        assert_eq!(ev.key(), "a");
        assert_eq!(ev.click_count(), 0);
    }

    #[test]
    fn test_down_event_records_click_position() {
        let mut tracker = ClickTracker::new();
        let ev = Event::from_parts(parts(1, 12.0, 8.0), &mut tracker);
        assert_eq!(ev.click_position(), Point::new(12.0, 8.0));
        assert_eq!(tracker.last_click(), Point::new(12.0, 8.0));
        assert_eq!(ev.click_count(), 2);
    }

    #[test]
    fn test_drag_reports_last_click_and_delta() {
        let mut tracker = ClickTracker::new();
        let _down = Event::from_parts(parts(1, 12.0, 8.0), &mut tracker);
        let drag = Event::from_parts(parts(6, 30.0, 40.0), &mut tracker);
        assert_eq!(drag.position(), Point::new(30.0, 40.0));
        assert_eq!(drag.click_position(), Point::new(12.0, 8.0));
        assert_eq!(drag.wheel_delta(), Point::new(1.5, -2.0));
        assert_eq!(drag.click_count(), 0);
    }

    #[test]
    fn test_click_event_has_no_wheel_delta() {
        let mut tracker = ClickTracker::new();
        let ev = Event::from_parts(parts(2, 0.0, 0.0), &mut tracker);
        assert_eq!(ev.wheel_delta(), Point::default());
    }
}
