//! Drawing into a view's CoreGraphics context.
//!
//! A [`GraphicContext`] is only handed out by reference from
//! [`ViewHandler::on_draw`](super::ViewHandler::on_draw); the underlying
//! `CGContextRef` belongs to AppKit and is valid for that call only.
//! Views are flipped, so coordinates have a top-left origin.

use std::ptr;

use objc2_core_foundation::{CGFloat, CGPoint, CGRect, CGSize};

use super::font::Font;
use super::image::Image;
use crate::geometry::{Color, Point, Rect};
use crate::handles::CfHandle;
use crate::platform::macos::ffi::corefoundation::{cf_string, CFAttributedStringCreate};
use crate::platform::macos::ffi::coregraphics::*;
use crate::platform::macos::ffi::coretext::{line_attributes, CTLineCreateWithAttributedString, CTLineDraw};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Miter = 0,
    Round = 1,
    Bevel = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt = 0,
    Round = 1,
    Square = 2,
}

fn cg_rect(rect: Rect<f32>) -> CGRect {
    rect.to_native()
}

/// Borrowed `CGContextRef` of the current draw call.
pub struct GraphicContext {
    ctx: *mut CGContext,
}

impl GraphicContext {
    /// # Safety
    ///
    /// `ctx` must stay valid for the lifetime of the returned value.
    pub(crate) unsafe fn from_raw(ctx: *mut CGContext) -> Self {
        Self { ctx }
    }

    pub fn native_handle(&self) -> *mut CGContext {
        self.ctx
    }

    // === State ===

    pub fn save_state(&mut self) {
        unsafe { CGContextSaveGState(self.ctx) }
    }

    pub fn restore_state(&mut self) {
        unsafe { CGContextRestoreGState(self.ctx) }
    }

    pub fn translate(&mut self, by: Point<f32>) {
        unsafe { CGContextTranslateCTM(self.ctx, by.x as CGFloat, by.y as CGFloat) }
    }

    /// Start a layer composited with `alpha` when it ends.
    pub fn begin_transparent_layer(&mut self, alpha: f32) {
        unsafe {
            CGContextSetAlpha(self.ctx, alpha as CGFloat);
            CGContextBeginTransparencyLayer(self.ctx, ptr::null());
        }
    }

    pub fn end_transparent_layer(&mut self) {
        unsafe { CGContextEndTransparencyLayer(self.ctx) }
    }

    // === Clipping ===

    pub fn clip_to_rect(&mut self, rect: Rect<f32>) {
        unsafe { CGContextClipToRect(self.ctx, cg_rect(rect)) }
    }

    /// Clip to the alpha of `mask`, stretched over `rect`.
    pub fn clip_to_mask(&mut self, rect: Rect<f32>, mask: &Image) {
        if !mask.is_valid() {
            return;
        }
        unsafe { CGContextClipToMask(self.ctx, cg_rect(rect), mask.as_ptr()) }
    }

    pub fn reset_clip(&mut self) {
        unsafe { CGContextResetClip(self.ctx) }
    }

    pub fn clip_bounds(&self) -> Rect<f32> {
        Rect::from_native(unsafe { CGContextGetClipBoundingBox(self.ctx) })
    }

    // === Style ===

    pub fn set_fill_color(&mut self, color: Color) {
        let [r, g, b, a] = color.components();
        unsafe { CGContextSetRGBFillColor(self.ctx, r, g, b, a) }
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        let [r, g, b, a] = color.components();
        unsafe { CGContextSetRGBStrokeColor(self.ctx, r, g, b, a) }
    }

    pub fn set_line_width(&mut self, width: f32) {
        unsafe { CGContextSetLineWidth(self.ctx, width as CGFloat) }
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        unsafe { CGContextSetLineJoin(self.ctx, join as i32) }
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        unsafe { CGContextSetLineCap(self.ctx, cap as i32) }
    }

    // === Shapes ===

    pub fn fill_rect(&mut self, rect: Rect<f32>) {
        unsafe { CGContextFillRect(self.ctx, cg_rect(rect)) }
    }

    pub fn stroke_rect(&mut self, rect: Rect<f32>) {
        unsafe { CGContextStrokeRect(self.ctx, cg_rect(rect)) }
    }

    pub fn stroke_rect_with_width(&mut self, rect: Rect<f32>, width: f32) {
        unsafe { CGContextStrokeRectWithWidth(self.ctx, cg_rect(rect), width as CGFloat) }
    }

    pub fn stroke_line(&mut self, from: Point<f32>, to: Point<f32>) {
        unsafe {
            CGContextBeginPath(self.ctx);
            CGContextMoveToPoint(self.ctx, from.x as CGFloat, from.y as CGFloat);
            CGContextAddLineToPoint(self.ctx, to.x as CGFloat, to.y as CGFloat);
            CGContextStrokePath(self.ctx);
        }
    }

    pub fn fill_ellipse(&mut self, rect: Rect<f32>) {
        unsafe { CGContextFillEllipseInRect(self.ctx, cg_rect(rect)) }
    }

    pub fn stroke_ellipse(&mut self, rect: Rect<f32>) {
        unsafe { CGContextStrokeEllipseInRect(self.ctx, cg_rect(rect)) }
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect<f32>, radius: f32) {
        if self.add_rounded_rect(rect, radius) {
            unsafe { CGContextFillPath(self.ctx) }
        }
    }

    pub fn stroke_rounded_rect(&mut self, rect: Rect<f32>, radius: f32) {
        if self.add_rounded_rect(rect, radius) {
            unsafe { CGContextStrokePath(self.ctx) }
        }
    }

    fn add_rounded_rect(&mut self, rect: Rect<f32>, radius: f32) -> bool {
        // CoreGraphics rejects corner radii larger than half a side.
        let limit = rect.width().min(rect.height()) * 0.5;
        let radius = radius.clamp(0.0, limit.max(0.0)) as CGFloat;
        let path: CfHandle<CGPath> = unsafe {
            CfHandle::from_raw(CGPathCreateWithRoundedRect(cg_rect(rect), radius, radius, ptr::null()))
        };
        if path.is_null() {
            return false;
        }
        unsafe {
            CGContextBeginPath(self.ctx);
            CGContextAddPath(self.ctx, path.as_ptr());
        }
        true
    }

    // === Images and text ===

    /// Draw `image` upright into `rect`.
    pub fn draw_image(&mut self, image: &Image, rect: Rect<f32>) {
        if !image.is_valid() {
            return;
        }
        let target = CGRect::new(
            CGPoint::new(0.0, 0.0),
            CGSize::new(rect.width() as CGFloat, rect.height() as CGFloat),
        );
        unsafe {
            CGContextSaveGState(self.ctx);
            CGContextTranslateCTM(self.ctx, rect.x() as CGFloat, (rect.y() + rect.height()) as CGFloat);
            CGContextScaleCTM(self.ctx, 1.0, -1.0);
            CGContextDrawImage(self.ctx, target, image.as_ptr());
            CGContextRestoreGState(self.ctx);
        }
    }

    /// Draw one line of `text` with its baseline starting at `at`, in the
    /// current fill color.
    pub fn draw_text(&mut self, font: &Font, text: &str, at: Point<f32>) {
        if !font.is_valid() || text.is_empty() {
            return;
        }
        unsafe {
            let string = cf_string(text);
            let attributes = line_attributes(font.as_ptr(), true);
            let attributed = CfHandle::from_raw(CFAttributedStringCreate(
                ptr::null(),
                string.as_ptr(),
                attributes.as_ptr(),
            ));
            if attributed.is_null() {
                return;
            }
            let line = CfHandle::from_raw(CTLineCreateWithAttributedString(attributed.as_ptr()));
            if line.is_null() {
                return;
            }
            CGContextSetTextMatrix(self.ctx, CGAffineTransform::FLIP_Y);
            CGContextSetTextPosition(self.ctx, at.x as CGFloat, at.y as CGFloat);
            CTLineDraw(line.as_ptr(), self.ctx);
        }
    }
}
