//! Tests for window/view flags and the AppKit constants they map onto.

use nano_ui::model::constants::*;
use nano_ui::{ViewFlags, WindowFlags};

#[test]
fn default_window_is_a_decorated_window() {
    let flags = WindowFlags::default();
    assert!(!flags.is_panel());
    assert!(flags.contains(WindowFlags::TITLED | WindowFlags::CLOSABLE));
    assert_eq!(
        flags.style_mask(),
        NS_WINDOW_STYLE_TITLED
            | NS_WINDOW_STYLE_CLOSABLE
            | NS_WINDOW_STYLE_MINIATURIZABLE
            | NS_WINDOW_STYLE_RESIZABLE
    );
}

#[test]
fn panel_gets_utility_style() {
    let flags = WindowFlags::PANEL | WindowFlags::CLOSABLE;
    assert!(flags.is_panel());
    assert_ne!(flags.style_mask() & NS_WINDOW_STYLE_UTILITY, 0);
}

#[test]
fn full_size_content_bit() {
    let flags = WindowFlags::DEFAULT | WindowFlags::FULL_SIZE_CONTENT_VIEW;
    assert_ne!(flags.style_mask() & NS_WINDOW_STYLE_FULL_SIZE_CONTENT_VIEW, 0);
}

#[test]
fn flags_round_trip_through_bits() {
    let flags = WindowFlags::TITLED | WindowFlags::RESIZABLE;
    assert_eq!(WindowFlags::from_bits(flags.bits()), flags);
    assert_eq!(flags & WindowFlags::RESIZABLE, WindowFlags::RESIZABLE);
}

#[test]
fn view_flags_default_to_fixed_size() {
    assert_eq!(ViewFlags::default(), ViewFlags::None);
    assert_eq!(ViewFlags::default().autoresizing_mask(), NS_VIEW_NOT_SIZABLE);
    assert_eq!(
        ViewFlags::AutoResize.autoresizing_mask(),
        NS_VIEW_WIDTH_SIZABLE | NS_VIEW_HEIGHT_SIZABLE
    );
}

#[test]
fn menu_tags_do_not_collide() {
    assert_ne!(MENU_TAG_QUIT, MENU_TAG_ABOUT);
    assert_ne!(MENU_TAG_QUIT, 0);
    assert_ne!(MENU_TAG_ABOUT, 0);
}
