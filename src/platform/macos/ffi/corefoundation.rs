//! FFI bindings for CoreFoundation, and the retain-counted opaque types.
//!
//! Every opaque `CF`/`CG`/`CT` type declared through [`cf_type!`] gets the
//! objc2 encoding AppKit reports for it and a [`RetainCounted`] impl based on
//! `CFRetain`/`CFRelease`, so it can live in a [`CfHandle`].
//!
//! [`CfHandle`]: crate::handles::CfHandle
//! [`RetainCounted`]: crate::handles::RetainCounted

use std::ffi::c_void;

use crate::handles::CfHandle;

/// Declare an opaque CoreFoundation-family type.
macro_rules! cf_type {
    ($(#[$meta:meta])* $name:ident, $encoding:literal) => {
        $(#[$meta])*
        #[repr(C)]
        pub struct $name {
            _private: [u8; 0],
        }

        // SAFETY: opaque framework type, encoded as a pointer to a named struct.
        unsafe impl objc2::encode::RefEncode for $name {
            const ENCODING_REF: objc2::encode::Encoding =
                objc2::encode::Encoding::Pointer(&objc2::encode::Encoding::Struct($encoding, &[]));
        }

        // SAFETY: every CF-family object is retained/released with CFRetain/CFRelease.
        unsafe impl $crate::handles::RetainCounted for $name {
            unsafe fn retain(ptr: std::ptr::NonNull<Self>) {
                $crate::platform::macos::ffi::corefoundation::CFRetain(ptr.as_ptr() as *const _);
            }
            unsafe fn release(ptr: std::ptr::NonNull<Self>) {
                $crate::platform::macos::ffi::corefoundation::CFRelease(ptr.as_ptr() as *const _);
            }
        }
    };
}

pub(crate) use cf_type;

cf_type!(
    /// Any CoreFoundation object.
    CFType,
    "__CFType"
);
cf_type!(CFString, "__CFString");
cf_type!(CFData, "__CFData");
cf_type!(CFArray, "__CFArray");
cf_type!(CFDictionary, "__CFDictionary");
cf_type!(CFURL, "__CFURL");
cf_type!(CFAttributedString, "__CFAttributedString");

pub type CFIndex = isize;
pub type CFAllocatorRef = *const c_void;

// === FFI Declarations ===

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    pub fn CFRetain(obj: *const c_void) -> *const c_void;

    pub fn CFRelease(obj: *const c_void);

    pub fn CFDataCreate(allocator: CFAllocatorRef, bytes: *const u8, length: CFIndex) -> *mut CFData;

    pub fn CFArrayGetCount(array: *const CFArray) -> CFIndex;

    pub fn CFArrayGetValueAtIndex(array: *const CFArray, index: CFIndex) -> *const c_void;

    pub fn CFURLCreateFromFileSystemRepresentation(
        allocator: CFAllocatorRef,
        buffer: *const u8,
        length: CFIndex,
        is_directory: u8,
    ) -> *mut CFURL;

    pub fn CFDictionaryCreate(
        allocator: CFAllocatorRef,
        keys: *const *const c_void,
        values: *const *const c_void,
        num_values: CFIndex,
        key_callbacks: *const c_void,
        value_callbacks: *const c_void,
    ) -> *mut CFDictionary;

    pub fn CFAttributedStringCreate(
        allocator: CFAllocatorRef,
        string: *const CFString,
        attributes: *const CFDictionary,
    ) -> *mut CFAttributedString;

    pub static kCFBooleanTrue: *const c_void;
    pub static kCFTypeDictionaryKeyCallBacks: c_void;
    pub static kCFTypeDictionaryValueCallBacks: c_void;
}

// ============================================================================
// Helpers
// ============================================================================

/// Create a `CFString` from UTF-8 text.
///
/// `NSString` is toll-free bridged, so the retained objc2 string is handed
/// over as an owned `CFString` reference.
pub fn cf_string(s: &str) -> CfHandle<CFString> {
    let ns = objc2_foundation::NSString::from_str(s);
    let raw = objc2::rc::Retained::into_raw(ns) as *mut CFString;
    unsafe { CfHandle::from_raw(raw) }
}

/// Create an immutable dictionary with CF-type callbacks.
///
/// # Safety
///
/// Keys and values must be live CF objects.
pub unsafe fn cf_dictionary(
    keys: &[*const c_void],
    values: &[*const c_void],
) -> CfHandle<CFDictionary> {
    debug_assert_eq!(keys.len(), values.len());
    let dict = CFDictionaryCreate(
        std::ptr::null(),
        keys.as_ptr(),
        values.as_ptr(),
        keys.len().min(values.len()) as CFIndex,
        std::ptr::addr_of!(kCFTypeDictionaryKeyCallBacks),
        std::ptr::addr_of!(kCFTypeDictionaryValueCallBacks),
    );
    CfHandle::from_raw(dict)
}
