//! FFI bindings for CoreText (fonts and text lines).
//!
//! This module provides the CoreText API declarations needed to build fonts
//! from names, files and raw data, and to measure and draw single lines.

use std::ffi::c_void;

use objc2_core_foundation::CGFloat;

use super::coregraphics::{CGAffineTransform, CGContext};
use super::corefoundation::{
    cf_dictionary, cf_type, kCFBooleanTrue, CFArray, CFAttributedString, CFData, CFDictionary,
    CFString, CFURL,
};
use crate::handles::CfHandle;

// === Types ===

cf_type!(CTFont, "__CTFont");
cf_type!(CTFontDescriptor, "__CTFontDescriptor");
cf_type!(CTLine, "__CTLine");

// === FFI Declarations ===

#[link(name = "CoreText", kind = "framework")]
extern "C" {
    pub fn CTFontCreateWithName(
        name: *const CFString,
        size: CGFloat,
        matrix: *const CGAffineTransform,
    ) -> *mut CTFont;

    pub fn CTFontCreateWithFontDescriptor(
        descriptor: *const CTFontDescriptor,
        size: CGFloat,
        matrix: *const CGAffineTransform,
    ) -> *mut CTFont;

    pub fn CTFontManagerCreateFontDescriptorsFromURL(url: *const CFURL) -> *mut CFArray;

    pub fn CTFontManagerCreateFontDescriptorFromData(data: *const CFData) -> *mut CTFontDescriptor;

    pub fn CTFontGetCapHeight(font: *const CTFont) -> CGFloat;

    pub fn CTLineCreateWithAttributedString(string: *const CFAttributedString) -> *mut CTLine;

    pub fn CTLineGetTypographicBounds(
        line: *const CTLine,
        ascent: *mut CGFloat,
        descent: *mut CGFloat,
        leading: *mut CGFloat,
    ) -> f64;

    pub fn CTLineDraw(line: *const CTLine, context: *mut CGContext);

    pub static kCTFontAttributeName: *const CFString;
    pub static kCTLigatureAttributeName: *const CFString;
    pub static kCTForegroundColorFromContextAttributeName: *const CFString;
}

/// Attribute dictionary selecting `font`, with ligatures on.
///
/// # Safety
///
/// `font` must be a live CTFont.
pub unsafe fn line_attributes(font: *const CTFont, color_from_context: bool) -> CfHandle<CFDictionary> {
    let mut keys: Vec<*const c_void> = vec![
        kCTFontAttributeName as *const c_void,
        kCTLigatureAttributeName as *const c_void,
    ];
    let mut values: Vec<*const c_void> = vec![font as *const c_void, kCFBooleanTrue];
    if color_from_context {
        keys.push(kCTForegroundColorFromContextAttributeName as *const c_void);
        values.push(kCFBooleanTrue);
    }
    cf_dictionary(&keys, &values)
}
