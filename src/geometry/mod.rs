//! Geometry value types and their native conversion boundary.
//!
//! `Point`, `Size` and `Rect` are generic over the scalar type applications
//! use (`i32`, `f32`, `f64`). The native structs always carry `f64` fields
//! (`CGFloat` on 64-bit macOS), so converting a representable value out and
//! back is exact.

mod color;

pub use color::Color;

use std::fmt::Debug;

// ============================================================================
// Native structs
// ============================================================================

#[cfg(target_os = "macos")]
pub use objc2_foundation::{NSPoint as NativePoint, NSRect as NativeRect, NSSize as NativeSize};

#[cfg(not(target_os = "macos"))]
pub use fallback::{NativePoint, NativeRect, NativeSize};

/// Layout-identical stand-ins for `CGPoint`/`CGSize`/`CGRect`, so the pure
/// conversion code builds and tests everywhere.
#[cfg(not(target_os = "macos"))]
mod fallback {
    #[repr(C)]
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct NativePoint {
        pub x: f64,
        pub y: f64,
    }

    impl NativePoint {
        pub const fn new(x: f64, y: f64) -> Self {
            Self { x, y }
        }
    }

    #[repr(C)]
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct NativeSize {
        pub width: f64,
        pub height: f64,
    }

    impl NativeSize {
        pub const fn new(width: f64, height: f64) -> Self {
            Self { width, height }
        }
    }

    #[repr(C)]
    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct NativeRect {
        pub origin: NativePoint,
        pub size: NativeSize,
    }

    impl NativeRect {
        pub const fn new(origin: NativePoint, size: NativeSize) -> Self {
            Self { origin, size }
        }
    }
}

// ============================================================================
// Scalars
// ============================================================================

/// Numeric field type of the geometry values.
pub trait Scalar: Copy + PartialEq + PartialOrd + Default + Debug {
    fn to_f64(self) -> f64;
    /// Truncates toward zero for integer scalars.
    fn from_f64(value: f64) -> Self;
}

impl Scalar for i32 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as i32
    }
}

impl Scalar for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Scalar for f64 {
    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

// ============================================================================
// Value types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<T = f32> {
    pub x: T,
    pub y: T,
}

impl<T: Scalar> Point<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn to_native(self) -> NativePoint {
        NativePoint::new(self.x.to_f64(), self.y.to_f64())
    }

    pub fn from_native(p: NativePoint) -> Self {
        Self::new(T::from_f64(p.x), T::from_f64(p.y))
    }

    pub fn cast<U: Scalar>(self) -> Point<U> {
        Point::new(U::from_f64(self.x.to_f64()), U::from_f64(self.y.to_f64()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size<T = f32> {
    pub width: T,
    pub height: T,
}

impl<T: Scalar> Size<T> {
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == T::default() || self.height == T::default()
    }

    pub fn to_native(self) -> NativeSize {
        NativeSize::new(self.width.to_f64(), self.height.to_f64())
    }

    pub fn from_native(s: NativeSize) -> Self {
        Self::new(T::from_f64(s.width), T::from_f64(s.height))
    }

    pub fn cast<U: Scalar>(self) -> Size<U> {
        Size::new(U::from_f64(self.width.to_f64()), U::from_f64(self.height.to_f64()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<T = f32> {
    pub origin: Point<T>,
    pub size: Size<T>,
}

impl<T: Scalar> Rect<T> {
    pub const fn new(x: T, y: T, width: T, height: T) -> Self {
        Self {
            origin: Point { x, y },
            size: Size { width, height },
        }
    }

    pub const fn from_parts(origin: Point<T>, size: Size<T>) -> Self {
        Self { origin, size }
    }

    pub fn x(&self) -> T {
        self.origin.x
    }

    pub fn y(&self) -> T {
        self.origin.y
    }

    pub fn width(&self) -> T {
        self.size.width
    }

    pub fn height(&self) -> T {
        self.size.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, p: Point<T>) -> bool {
        let (x, y) = (p.x.to_f64(), p.y.to_f64());
        let (rx, ry) = (self.x().to_f64(), self.y().to_f64());
        x >= rx && y >= ry && x < rx + self.width().to_f64() && y < ry + self.height().to_f64()
    }

    pub fn to_native(self) -> NativeRect {
        NativeRect::new(self.origin.to_native(), self.size.to_native())
    }

    pub fn from_native(r: NativeRect) -> Self {
        Self::from_parts(Point::from_native(r.origin), Size::from_native(r.size))
    }

    pub fn cast<U: Scalar>(self) -> Rect<U> {
        Rect::from_parts(self.origin.cast(), self.size.cast())
    }
}

/// Scale a pixel size by `1 / scale_factor`, truncating like the native
/// integer conversion does. A non-positive factor leaves the size unchanged.
pub fn scale_size(size: Size<i32>, scale_factor: f64) -> Size<i32> {
    if scale_factor <= 0.0 {
        return size;
    }
    let ratio = 1.0 / scale_factor;
    Size::new(
        (size.width as f64 * ratio) as i32,
        (size.height as f64 * ratio) as i32,
    )
}
