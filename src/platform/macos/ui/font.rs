//! CoreText fonts.
//!
//! Fonts come from an installed family name, a font file or raw font data.
//! Any failure yields an invalid font (null handle, size 0) instead of an
//! error, so text code can carry on with a fallback.

use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr;

use objc2_core_foundation::CGFloat;

use crate::handles::CfHandle;
use crate::platform::macos::ffi::corefoundation::*;
use crate::platform::macos::ffi::coretext::*;

#[derive(Clone)]
pub struct Font {
    handle: CfHandle<CTFont>,
    size: f64,
}

impl Font {
    pub fn invalid() -> Self {
        Self {
            handle: CfHandle::null(),
            size: 0.0,
        }
    }

    /// An installed font, e.g. `Font::new("Helvetica", 12.0)`.
    pub fn new(name: &str, size: f64) -> Self {
        let cf_name = cf_string(name);
        let font = unsafe { CTFontCreateWithName(cf_name.as_ptr(), size as CGFloat, ptr::null()) };
        if font.is_null() {
            log::warn!("font {name} is not available");
        }
        unsafe { Self::from_created(font, size) }
    }

    /// The first face of a font file.
    pub fn from_file(path: impl AsRef<Path>, size: f64) -> Self {
        let path = path.as_ref();
        let bytes = path.as_os_str().as_bytes();
        unsafe {
            let url: CfHandle<CFURL> = CfHandle::from_raw(CFURLCreateFromFileSystemRepresentation(
                ptr::null(),
                bytes.as_ptr(),
                bytes.len() as CFIndex,
                0,
            ));
            if url.is_null() {
                log::warn!("invalid font path {}", path.display());
                return Self::invalid();
            }

            let descriptors: CfHandle<CFArray> =
                CfHandle::from_raw(CTFontManagerCreateFontDescriptorsFromURL(url.as_ptr()));
            if descriptors.is_null() || CFArrayGetCount(descriptors.as_ptr()) == 0 {
                log::warn!("no font found in {}", path.display());
                return Self::invalid();
            }

            // Borrowed from the array, which outlives the call.
            let descriptor = CFArrayGetValueAtIndex(descriptors.as_ptr(), 0) as *const CTFontDescriptor;
            let font = CTFontCreateWithFontDescriptor(descriptor, size as CGFloat, ptr::null());
            Self::from_created(font, size)
        }
    }

    /// A font from the bytes of a TrueType/OpenType file.
    pub fn from_data(data: &[u8], size: f64) -> Self {
        if data.is_empty() {
            log::warn!("empty font data");
            return Self::invalid();
        }
        unsafe {
            let cf_data: CfHandle<CFData> =
                CfHandle::from_raw(CFDataCreate(ptr::null(), data.as_ptr(), data.len() as CFIndex));
            if cf_data.is_null() {
                return Self::invalid();
            }
            let descriptor: CfHandle<CTFontDescriptor> =
                CfHandle::from_raw(CTFontManagerCreateFontDescriptorFromData(cf_data.as_ptr()));
            if descriptor.is_null() {
                log::warn!("font data could not be decoded");
                return Self::invalid();
            }
            let font = CTFontCreateWithFontDescriptor(descriptor.as_ptr(), size as CGFloat, ptr::null());
            Self::from_created(font, size)
        }
    }

    /// # Safety
    ///
    /// `font` must be null or an owned (+1) `CTFont`.
    unsafe fn from_created(font: *mut CTFont, size: f64) -> Self {
        if font.is_null() {
            return Self::invalid();
        }
        Self {
            handle: CfHandle::from_raw(font),
            size,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }

    /// Point size; 0 for an invalid font.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Cap height in points.
    pub fn height(&self) -> f64 {
        if !self.is_valid() {
            return 0.0;
        }
        unsafe { CTFontGetCapHeight(self.handle.as_ptr()) }
    }

    /// Advance width of `text` set on one line, ligatures included.
    pub fn string_width(&self, text: &str) -> f64 {
        if !self.is_valid() || text.is_empty() {
            return 0.0;
        }
        unsafe {
            let string = cf_string(text);
            let attributes = line_attributes(self.handle.as_ptr(), false);
            let attributed: CfHandle<CFAttributedString> = CfHandle::from_raw(
                CFAttributedStringCreate(ptr::null(), string.as_ptr(), attributes.as_ptr()),
            );
            if attributed.is_null() {
                return 0.0;
            }
            let line: CfHandle<CTLine> =
                CfHandle::from_raw(CTLineCreateWithAttributedString(attributed.as_ptr()));
            if line.is_null() {
                return 0.0;
            }
            CTLineGetTypographicBounds(
                line.as_ptr(),
                ptr::null_mut(),
                ptr::null_mut(),
                ptr::null_mut(),
            )
        }
    }

    pub fn as_ptr(&self) -> *mut CTFont {
        self.handle.as_ptr()
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::invalid()
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("valid", &self.is_valid())
            .field("size", &self.size)
            .finish()
    }
}
