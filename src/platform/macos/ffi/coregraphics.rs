//! FFI bindings for CoreGraphics.
//!
//! This module provides the CGImage, CGContext, CGColor, CGPath and CGEvent
//! calls used by images, drawing and event snapshots.

use std::ffi::{c_char, c_void};

use objc2_core_foundation::{CGFloat, CGPoint, CGRect};

use super::corefoundation::{cf_type, CFString};

// === Types ===

cf_type!(CGImage, "CGImage");
cf_type!(CGContext, "CGContext");
cf_type!(CGColor, "CGColor");
cf_type!(CGColorSpace, "CGColorSpace");
cf_type!(CGDataProvider, "CGDataProvider");
cf_type!(CGPath, "CGPath");
cf_type!(CGEvent, "__CGEvent");

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CGAffineTransform {
    pub a: CGFloat,
    pub b: CGFloat,
    pub c: CGFloat,
    pub d: CGFloat,
    pub tx: CGFloat,
    pub ty: CGFloat,
}

impl CGAffineTransform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Vertical flip, for text in flipped views.
    pub const FLIP_Y: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: -1.0,
        tx: 0.0,
        ty: 0.0,
    };
}

/// `kCGRenderingIntentDefault`
pub const RENDERING_INTENT_DEFAULT: i32 = 0;

/// `kCGImageAlphaPremultipliedLast`
pub const IMAGE_ALPHA_PREMULTIPLIED_LAST: u32 = 1;

/// `kCGMouseEventClickState`
pub const MOUSE_EVENT_CLICK_STATE: u32 = 1;

/// `kCGMouseEventButtonNumber`
pub const MOUSE_EVENT_BUTTON_NUMBER: u32 = 3;

// === FFI Declarations - Images ===

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    pub fn CGImageGetWidth(image: *const CGImage) -> usize;

    pub fn CGImageGetHeight(image: *const CGImage) -> usize;

    pub fn CGImageCreateCopy(image: *const CGImage) -> *mut CGImage;

    pub fn CGImageCreateWithImageInRect(image: *const CGImage, rect: CGRect) -> *mut CGImage;

    pub fn CGImageCreateWithPNGDataProvider(
        source: *const CGDataProvider,
        decode: *const CGFloat,
        should_interpolate: bool,
        intent: i32,
    ) -> *mut CGImage;

    pub fn CGDataProviderCreateWithFilename(filename: *const c_char) -> *mut CGDataProvider;

    pub fn CGColorSpaceCreateWithName(name: *const CFString) -> *mut CGColorSpace;

    pub fn CGBitmapContextCreate(
        data: *mut c_void,
        width: usize,
        height: usize,
        bits_per_component: usize,
        bytes_per_row: usize,
        space: *const CGColorSpace,
        bitmap_info: u32,
    ) -> *mut CGContext;

    pub fn CGBitmapContextCreateImage(context: *const CGContext) -> *mut CGImage;

    pub static kCGColorSpaceGenericRGB: *const CFString;
}

// === FFI Declarations - Context ===

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    pub fn CGContextSaveGState(c: *mut CGContext);
    pub fn CGContextRestoreGState(c: *mut CGContext);

    pub fn CGContextBeginTransparencyLayer(c: *mut CGContext, auxiliary_info: *const c_void);
    pub fn CGContextEndTransparencyLayer(c: *mut CGContext);
    pub fn CGContextSetAlpha(c: *mut CGContext, alpha: CGFloat);

    pub fn CGContextTranslateCTM(c: *mut CGContext, tx: CGFloat, ty: CGFloat);
    pub fn CGContextScaleCTM(c: *mut CGContext, sx: CGFloat, sy: CGFloat);

    pub fn CGContextClipToRect(c: *mut CGContext, rect: CGRect);
    pub fn CGContextClipToMask(c: *mut CGContext, rect: CGRect, mask: *const CGImage);
    pub fn CGContextResetClip(c: *mut CGContext);
    pub fn CGContextGetClipBoundingBox(c: *mut CGContext) -> CGRect;

    pub fn CGContextSetRGBFillColor(c: *mut CGContext, r: CGFloat, g: CGFloat, b: CGFloat, a: CGFloat);
    pub fn CGContextSetRGBStrokeColor(c: *mut CGContext, r: CGFloat, g: CGFloat, b: CGFloat, a: CGFloat);
    pub fn CGContextSetLineWidth(c: *mut CGContext, width: CGFloat);
    pub fn CGContextSetLineJoin(c: *mut CGContext, join: i32);
    pub fn CGContextSetLineCap(c: *mut CGContext, cap: i32);

    pub fn CGContextFillRect(c: *mut CGContext, rect: CGRect);
    pub fn CGContextStrokeRect(c: *mut CGContext, rect: CGRect);
    pub fn CGContextStrokeRectWithWidth(c: *mut CGContext, rect: CGRect, width: CGFloat);
    pub fn CGContextFillEllipseInRect(c: *mut CGContext, rect: CGRect);
    pub fn CGContextStrokeEllipseInRect(c: *mut CGContext, rect: CGRect);

    pub fn CGContextBeginPath(c: *mut CGContext);
    pub fn CGContextMoveToPoint(c: *mut CGContext, x: CGFloat, y: CGFloat);
    pub fn CGContextAddLineToPoint(c: *mut CGContext, x: CGFloat, y: CGFloat);
    pub fn CGContextAddPath(c: *mut CGContext, path: *const CGPath);
    pub fn CGContextFillPath(c: *mut CGContext);
    pub fn CGContextStrokePath(c: *mut CGContext);

    pub fn CGContextDrawImage(c: *mut CGContext, rect: CGRect, image: *const CGImage);

    pub fn CGContextSetTextMatrix(c: *mut CGContext, t: CGAffineTransform);
    pub fn CGContextSetTextPosition(c: *mut CGContext, x: CGFloat, y: CGFloat);

    pub fn CGPathCreateWithRoundedRect(
        rect: CGRect,
        corner_width: CGFloat,
        corner_height: CGFloat,
        transform: *const CGAffineTransform,
    ) -> *mut CGPath;

    pub fn CGColorCreateGenericRGB(r: CGFloat, g: CGFloat, b: CGFloat, a: CGFloat) -> *mut CGColor;
}

// === FFI Declarations - Events ===

#[link(name = "CoreGraphics", kind = "framework")]
extern "C" {
    pub fn CGEventGetType(event: *const CGEvent) -> u32;
    pub fn CGEventGetFlags(event: *const CGEvent) -> u64;
    pub fn CGEventGetTimestamp(event: *const CGEvent) -> u64;
    pub fn CGEventGetLocation(event: *const CGEvent) -> CGPoint;
    pub fn CGEventGetIntegerValueField(event: *const CGEvent, field: u32) -> i64;
    pub fn CGEventKeyboardGetUnicodeString(
        event: *const CGEvent,
        max_length: usize,
        actual_length: *mut usize,
        buffer: *mut u16,
    );
}
