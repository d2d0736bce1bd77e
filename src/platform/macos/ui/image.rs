//! Retain-counted `CGImage` with a display scale factor.

use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use objc2_core_foundation::{CGFloat, CGPoint, CGRect, CGSize};

use crate::geometry::{scale_size, Color, Rect, Size};
use crate::handles::CfHandle;
use crate::platform::macos::ffi::coregraphics::*;

/// A bitmap image; cheap to clone (clones share the `CGImage`).
///
/// Loading failures produce an invalid image rather than an error; check
/// [`is_valid`](Image::is_valid).
#[derive(Clone)]
pub struct Image {
    handle: CfHandle<CGImage>,
    scale: f64,
}

impl Image {
    pub fn invalid() -> Self {
        Self {
            handle: CfHandle::null(),
            scale: 1.0,
        }
    }

    /// Load a PNG file at scale 1.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::from_file_with_scale(path, 1.0)
    }

    /// Load a PNG file whose pixels are `scale` times its point size.
    pub fn from_file_with_scale(path: impl AsRef<Path>, scale: f64) -> Self {
        let path = path.as_ref();
        let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
            log::warn!("image path {} contains a NUL byte", path.display());
            return Self::invalid();
        };

        let provider: CfHandle<CGDataProvider> =
            unsafe { CfHandle::from_raw(CGDataProviderCreateWithFilename(c_path.as_ptr())) };
        if provider.is_null() {
            log::warn!("could not open image {}", path.display());
            return Self::invalid();
        }

        let image = unsafe {
            CGImageCreateWithPNGDataProvider(
                provider.as_ptr(),
                ptr::null(),
                true,
                RENDERING_INTENT_DEFAULT,
            )
        };
        if image.is_null() {
            log::warn!("{} is not a readable PNG", path.display());
        }
        Self {
            handle: unsafe { CfHandle::from_raw(image) },
            scale,
        }
    }

    /// Wrap a borrowed `CGImageRef`, retaining it.
    ///
    /// # Safety
    ///
    /// `image` must be null or a live `CGImage`.
    pub unsafe fn from_native(image: *mut CGImage, scale: f64) -> Self {
        Self {
            handle: CfHandle::retain_raw(image),
            scale,
        }
    }

    /// Move the image out, leaving `self` invalid at scale 1.
    pub fn take(&mut self) -> Self {
        let scale = std::mem::replace(&mut self.scale, 1.0);
        Self {
            handle: self.handle.take(),
            scale,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn as_ptr(&self) -> *mut CGImage {
        self.handle.as_ptr()
    }

    /// Size in pixels; zero when invalid.
    pub fn size(&self) -> Size<i32> {
        if !self.is_valid() {
            return Size::default();
        }
        let ptr = self.handle.as_ptr();
        unsafe { Size::new(CGImageGetWidth(ptr) as i32, CGImageGetHeight(ptr) as i32) }
    }

    /// Size in points: pixels divided by the scale factor.
    pub fn scaled_size(&self) -> Size<i32> {
        scale_size(self.size(), self.scale)
    }

    /// `(0, 0)` and the scaled size.
    pub fn rect(&self) -> Rect<f32> {
        let size = self.scaled_size();
        Rect::new(0.0, 0.0, size.width as f32, size.height as f32)
    }

    /// A new, independently owned copy of the bitmap.
    pub fn make_copy(&self) -> Self {
        if !self.is_valid() {
            return Self::invalid();
        }
        Self {
            handle: unsafe { CfHandle::from_raw(CGImageCreateCopy(self.handle.as_ptr())) },
            scale: self.scale,
        }
    }

    /// The pixels inside `rect` (pixel coordinates).
    pub fn sub_image(&self, rect: Rect<i32>) -> Self {
        if !self.is_valid() {
            return Self::invalid();
        }
        let image = unsafe { CGImageCreateWithImageInRect(self.handle.as_ptr(), rect.to_native()) };
        Self {
            handle: unsafe { CfHandle::from_raw(image) },
            scale: self.scale,
        }
    }

    /// The image's alpha mask filled with `color`.
    pub fn colored(&self, color: Color) -> Self {
        let size = self.size();
        if size.is_empty() {
            return Self::invalid();
        }
        let (width, height) = (size.width as usize, size.height as usize);

        unsafe {
            let space: CfHandle<CGColorSpace> =
                CfHandle::from_raw(CGColorSpaceCreateWithName(kCGColorSpaceGenericRGB));
            let ctx: CfHandle<CGContext> = CfHandle::from_raw(CGBitmapContextCreate(
                ptr::null_mut(),
                width,
                height,
                8,
                width * 4,
                space.as_ptr(),
                IMAGE_ALPHA_PREMULTIPLIED_LAST,
            ));
            if ctx.is_null() {
                log::warn!("could not create a {width}x{height} bitmap context");
                return Self::invalid();
            }

            let bounds = CGRect::new(
                CGPoint::new(0.0, 0.0),
                CGSize::new(width as CGFloat, height as CGFloat),
            );
            let [r, g, b, a] = color.components();
            CGContextClipToMask(ctx.as_ptr(), bounds, self.handle.as_ptr());
            CGContextSetRGBFillColor(ctx.as_ptr(), r, g, b, a);
            CGContextFillRect(ctx.as_ptr(), bounds);

            Self {
                handle: CfHandle::from_raw(CGBitmapContextCreateImage(ctx.as_ptr())),
                scale: self.scale,
            }
        }
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::invalid()
    }
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("size", &self.size())
            .field("scale", &self.scale)
            .finish()
    }
}
