//! Input event kinds and modifier flags.
//!
//! These map the CoreGraphics event numbering onto toolkit-level values.
//! This module is pure Rust with no FFI dependencies, making it fully testable.

use std::ops::{BitOr, BitOrAssign};

use crate::model::constants::{
    CG_EVENT_FLAG_ALTERNATE, CG_EVENT_FLAG_COMMAND, CG_EVENT_FLAG_CONTROL,
    CG_EVENT_FLAG_SECONDARY_FN, CG_EVENT_FLAG_SHIFT,
};

/// Kind of input occurrence carried by an [`Event`](super::Event).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventType {
    #[default]
    None,

    // === Mouse ===
    LeftMouseDown,
    LeftMouseUp,
    RightMouseDown,
    RightMouseUp,
    MouseMoved,
    LeftMouseDragged,
    RightMouseDragged,
    MouseEntered,
    MouseExited,

    // === Specialized devices ===
    ScrollWheel,
    TabletPointer,
    TabletProximity,
    OtherMouseDown,
    OtherMouseUp,
    OtherMouseDragged,

    // === Keyboard ===
    KeyDown,
    KeyUp,
    KeyFlagsChanged,
}

impl EventType {
    /// Map a `CGEventType` value. Unknown values become `None`.
    pub fn from_cg(value: u32) -> Self {
        match value {
            1 => EventType::LeftMouseDown,
            2 => EventType::LeftMouseUp,
            3 => EventType::RightMouseDown,
            4 => EventType::RightMouseUp,
            5 => EventType::MouseMoved,
            6 => EventType::LeftMouseDragged,
            7 => EventType::RightMouseDragged,
            8 => EventType::MouseEntered,
            9 => EventType::MouseExited,
            10 => EventType::KeyDown,
            11 => EventType::KeyUp,
            12 => EventType::KeyFlagsChanged,
            22 => EventType::ScrollWheel,
            23 => EventType::TabletPointer,
            24 => EventType::TabletProximity,
            25 => EventType::OtherMouseDown,
            26 => EventType::OtherMouseUp,
            27 => EventType::OtherMouseDragged,
            _ => EventType::None,
        }
    }

    /// Button and motion events; their window location is meaningful.
    pub fn is_mouse_event(self) -> bool {
        matches!(
            self,
            EventType::LeftMouseDown
                | EventType::LeftMouseUp
                | EventType::RightMouseDown
                | EventType::RightMouseUp
                | EventType::MouseMoved
                | EventType::LeftMouseDragged
                | EventType::RightMouseDragged
                | EventType::OtherMouseDown
                | EventType::OtherMouseUp
                | EventType::OtherMouseDragged
        )
    }

    /// Events that carry a delta.
    pub fn is_scroll_or_drag_event(self) -> bool {
        matches!(
            self,
            EventType::ScrollWheel
                | EventType::MouseMoved
                | EventType::LeftMouseDragged
                | EventType::RightMouseDragged
                | EventType::OtherMouseDragged
        )
    }

    pub fn is_click_event(self) -> bool {
        matches!(
            self,
            EventType::LeftMouseDown
                | EventType::LeftMouseUp
                | EventType::RightMouseDown
                | EventType::RightMouseUp
                | EventType::OtherMouseDown
                | EventType::OtherMouseUp
        )
    }

    pub fn is_mouse_down(self) -> bool {
        matches!(
            self,
            EventType::LeftMouseDown | EventType::RightMouseDown | EventType::OtherMouseDown
        )
    }

    pub fn is_key_event(self) -> bool {
        matches!(
            self,
            EventType::KeyDown | EventType::KeyUp | EventType::KeyFlagsChanged
        )
    }
}

/// Mouse button and keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EventModifiers(u64);

impl EventModifiers {
    pub const NONE: Self = Self(0);
    pub const LEFT_MOUSE_DOWN: Self = Self(1 << 0);
    pub const MIDDLE_MOUSE_DOWN: Self = Self(1 << 1);
    pub const RIGHT_MOUSE_DOWN: Self = Self(1 << 2);
    pub const COMMAND: Self = Self(1 << 3);
    pub const SHIFT: Self = Self(1 << 4);
    pub const CONTROL: Self = Self(1 << 5);
    pub const ALT: Self = Self(1 << 6);
    pub const FUNCTION: Self = Self(1 << 7);

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Build from `CGEventFlags` and the `kCGMouseEventButtonNumber` field
    /// (0 left, 1 right, 2 center).
    pub fn from_native(flags: u64, button_number: i64) -> Self {
        let mut mods = Self::NONE;
        if flags & CG_EVENT_FLAG_SHIFT != 0 {
            mods |= Self::SHIFT;
        }
        if flags & CG_EVENT_FLAG_CONTROL != 0 {
            mods |= Self::CONTROL;
        }
        if flags & CG_EVENT_FLAG_ALTERNATE != 0 {
            mods |= Self::ALT;
        }
        if flags & CG_EVENT_FLAG_COMMAND != 0 {
            mods |= Self::COMMAND;
        }
        if flags & CG_EVENT_FLAG_SECONDARY_FN != 0 {
            mods |= Self::FUNCTION;
        }
        match button_number {
            0 => mods |= Self::LEFT_MOUSE_DOWN,
            1 => mods |= Self::RIGHT_MOUSE_DOWN,
            2 => mods |= Self::MIDDLE_MOUSE_DOWN,
            _ => {}
        }
        mods
    }
}

impl BitOr for EventModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for EventModifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cg_mapping() {
        assert_eq!(EventType::from_cg(1), EventType::LeftMouseDown);
        assert_eq!(EventType::from_cg(22), EventType::ScrollWheel);
        assert_eq!(EventType::from_cg(27), EventType::OtherMouseDragged);
        assert_eq!(EventType::from_cg(12), EventType::KeyFlagsChanged);
        assert_eq!(EventType::from_cg(13), EventType::None);
        assert_eq!(EventType::from_cg(0xFFFF_FFFE), EventType::None);
    }

    #[test]
    fn test_scroll_wheel_is_not_a_mouse_event() {
        assert!(!EventType::ScrollWheel.is_mouse_event());
        assert!(EventType::ScrollWheel.is_scroll_or_drag_event());
    }

    #[test]
    fn test_entered_exited_are_not_mouse_events() {
        assert!(!EventType::MouseEntered.is_mouse_event());
        assert!(!EventType::MouseExited.is_mouse_event());
    }

    #[test]
    fn test_click_events_are_mouse_events() {
        for t in [
            EventType::LeftMouseDown,
            EventType::LeftMouseUp,
            EventType::RightMouseDown,
            EventType::RightMouseUp,
            EventType::OtherMouseDown,
            EventType::OtherMouseUp,
        ] {
            assert!(t.is_click_event());
            assert!(t.is_mouse_event());
            assert!(!t.is_key_event());
        }
    }

    #[test]
    fn test_moved_is_drag_but_not_click() {
        assert!(EventType::MouseMoved.is_scroll_or_drag_event());
        assert!(!EventType::MouseMoved.is_click_event());
    }

    #[test]
    fn test_key_events() {
        assert!(EventType::KeyDown.is_key_event());
        assert!(EventType::KeyFlagsChanged.is_key_event());
        assert!(!EventType::KeyDown.is_mouse_event());
    }

    #[test]
    fn test_modifier_bits() {
        assert_eq!(EventModifiers::COMMAND.bits(), 8);
        assert_eq!(EventModifiers::FUNCTION.bits(), 128);
    }

    #[test]
    fn test_from_native_flags_and_button() {
        let mods = EventModifiers::from_native(CG_EVENT_FLAG_COMMAND | CG_EVENT_FLAG_SHIFT, 1);
        assert!(mods.contains(EventModifiers::COMMAND));
        assert!(mods.contains(EventModifiers::SHIFT));
        assert!(mods.contains(EventModifiers::RIGHT_MOUSE_DOWN));
        assert!(!mods.contains(EventModifiers::LEFT_MOUSE_DOWN));
    }

    #[test]
    fn test_from_native_unknown_button_sets_nothing() {
        assert!(EventModifiers::from_native(0, 7).is_empty());
    }
}
