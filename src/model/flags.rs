//! Window and view flags, and their mapping onto AppKit masks.

use std::ops::{BitAnd, BitOr, BitOrAssign};

use super::constants::*;

/// Window decoration and behavior flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowFlags(u32);

impl WindowFlags {
    pub const BORDERLESS: Self = Self(0);
    pub const TITLED: Self = Self(1 << 0);
    pub const CLOSABLE: Self = Self(1 << 1);
    pub const MINIMIZABLE: Self = Self(1 << 2);
    pub const MAXIMIZABLE: Self = Self(1 << 3);
    pub const RESIZABLE: Self = Self(1 << 4);
    /// Create an `NSPanel` instead of an `NSWindow`.
    pub const PANEL: Self = Self(1 << 5);
    pub const FULL_SIZE_CONTENT_VIEW: Self = Self(1 << 6);

    pub const DEFAULT: Self = Self(
        Self::TITLED.0 | Self::CLOSABLE.0 | Self::MINIMIZABLE.0 | Self::MAXIMIZABLE.0 | Self::RESIZABLE.0,
    );

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_panel(self) -> bool {
        self.contains(Self::PANEL)
    }

    /// Map onto `NSWindowStyleMask`.
    ///
    /// `MAXIMIZABLE` has no mask bit of its own; AppKit derives the zoom button
    /// from `RESIZABLE`. Panels get the utility style.
    pub fn style_mask(self) -> u64 {
        let mut mask = NS_WINDOW_STYLE_BORDERLESS;
        if self.contains(Self::TITLED) {
            mask |= NS_WINDOW_STYLE_TITLED;
        }
        if self.contains(Self::CLOSABLE) {
            mask |= NS_WINDOW_STYLE_CLOSABLE;
        }
        if self.contains(Self::MINIMIZABLE) {
            mask |= NS_WINDOW_STYLE_MINIATURIZABLE;
        }
        if self.contains(Self::RESIZABLE) {
            mask |= NS_WINDOW_STYLE_RESIZABLE;
        }
        if self.contains(Self::PANEL) {
            mask |= NS_WINDOW_STYLE_UTILITY;
        }
        if self.contains(Self::FULL_SIZE_CONTENT_VIEW) {
            mask |= NS_WINDOW_STYLE_FULL_SIZE_CONTENT_VIEW;
        }
        mask
    }
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BitOr for WindowFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for WindowFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for WindowFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Per-view layout flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewFlags {
    #[default]
    None,
    /// Track the parent's width and height.
    AutoResize,
}

impl ViewFlags {
    /// Map onto `NSAutoresizingMaskOptions`.
    pub fn autoresizing_mask(self) -> u64 {
        match self {
            ViewFlags::None => NS_VIEW_NOT_SIZABLE,
            ViewFlags::AutoResize => NS_VIEW_WIDTH_SIZABLE | NS_VIEW_HEIGHT_SIZABLE,
        }
    }
}
