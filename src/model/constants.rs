//! Toolkit constants and native bit values.
//!
//! This module contains the runtime class names, the owner slot name,
//! the default window geometry and the AppKit mask bits used by the glue.

use std::ffi::CStr;

// === Runtime Classes ===

/// Name of the ivar holding the owner back-pointer on every dynamic class.
pub const OWNER_IVAR: &CStr = c"owner";

/// Length of the random alphanumeric suffix appended to class roots.
pub const CLASS_SUFFIX_LEN: usize = 10;

/// Root label of the dynamic NSView subclass.
pub const VIEW_CLASS_ROOT: &str = "UIViewClassObject";

/// Root label of the dynamic window delegate class.
pub const WINDOW_CLASS_ROOT: &str = "WindowComponentClassObject";

/// Root label of the dynamic application delegate class.
pub const APP_DELEGATE_CLASS_ROOT: &str = "AppDelegateClassObject";

/// Prefix the KVO machinery uses for the subclasses it derives at runtime.
pub const KVO_SUBCLASS_PREFIX: &str = "NSKVONotifying_";

// === Window Defaults ===

/// Content rect used when a native window is first created: (x, y, w, h).
pub const DEFAULT_WINDOW_RECT: (f64, f64, f64, f64) = (0.0, 0.0, 300.0, 300.0);

/// `NSBackingStoreBuffered`.
pub const BACKING_STORE_BUFFERED: u64 = 2;

// === NSWindowStyleMask ===

pub const NS_WINDOW_STYLE_BORDERLESS: u64 = 0;
pub const NS_WINDOW_STYLE_TITLED: u64 = 1 << 0;
pub const NS_WINDOW_STYLE_CLOSABLE: u64 = 1 << 1;
pub const NS_WINDOW_STYLE_MINIATURIZABLE: u64 = 1 << 2;
pub const NS_WINDOW_STYLE_RESIZABLE: u64 = 1 << 3;
pub const NS_WINDOW_STYLE_UTILITY: u64 = 1 << 4;
pub const NS_WINDOW_STYLE_FULL_SIZE_CONTENT_VIEW: u64 = 1 << 15;

// === NSAutoresizingMaskOptions ===

pub const NS_VIEW_NOT_SIZABLE: u64 = 0;
pub const NS_VIEW_WIDTH_SIZABLE: u64 = 2;
pub const NS_VIEW_HEIGHT_SIZABLE: u64 = 16;

// === NSTrackingAreaOptions ===

pub const NS_TRACKING_MOUSE_ENTERED_AND_EXITED: u64 = 0x01;
pub const NS_TRACKING_MOUSE_MOVED: u64 = 0x02;
pub const NS_TRACKING_ACTIVE_IN_KEY_WINDOW: u64 = 0x20;
pub const NS_TRACKING_IN_VISIBLE_RECT: u64 = 0x200;

/// Options every view installs its tracking area with.
pub const VIEW_TRACKING_OPTIONS: u64 = NS_TRACKING_MOUSE_ENTERED_AND_EXITED
    | NS_TRACKING_MOUSE_MOVED
    | NS_TRACKING_ACTIVE_IN_KEY_WINDOW
    | NS_TRACKING_IN_VISIBLE_RECT;

// === CGEventFlags ===

pub const CG_EVENT_FLAG_SHIFT: u64 = 1 << 17;
pub const CG_EVENT_FLAG_CONTROL: u64 = 1 << 18;
pub const CG_EVENT_FLAG_ALTERNATE: u64 = 1 << 19;
pub const CG_EVENT_FLAG_COMMAND: u64 = 1 << 20;
pub const CG_EVENT_FLAG_SECONDARY_FN: u64 = 1 << 23;

// === Menu Tags ===

/// Tag of the "Quit" item in the main menu.
pub const MENU_TAG_QUIT: isize = 128932;

/// Tag of the "About" item in the main menu.
pub const MENU_TAG_ABOUT: isize = 1111;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracking_options_value() {
        assert_eq!(VIEW_TRACKING_OPTIONS, 0x223);
    }

    #[test]
    fn test_owner_ivar_name() {
        assert_eq!(OWNER_IVAR.to_str(), Ok("owner"));
    }

    #[test]
    fn test_autoresize_bits_are_distinct() {
        assert_eq!(NS_VIEW_WIDTH_SIZABLE & NS_VIEW_HEIGHT_SIZABLE, 0);
    }
}
