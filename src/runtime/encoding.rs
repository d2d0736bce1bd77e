//! Method type-encoding strings.
//!
//! Passed verbatim to `class_addMethod`; the runtime defines the grammar,
//! so these must match the trampoline signatures exactly.

use std::ffi::CStr;

/// `- (void)method`
pub const VOID: &CStr = c"v@:";

/// `- (BOOL)method`
pub const BOOL: &CStr = c"c@:";

/// `- (void)method:(id)notificationOrEvent`
pub const NOTIFICATION: &CStr = c"v@:@";

/// `- (BOOL)method:(id)sender`
pub const BOOL_WITH_OBJECT: &CStr = c"c@:@";

/// `- (NSUInteger)method:(id)sender`
pub const UINT_WITH_OBJECT: &CStr = c"L@:@";

/// `- (void)drawRect:(NSRect)dirtyRect`
pub const DRAW_RECT: &CStr = c"v@:{CGRect={CGPoint=dd}{CGSize=dd}}";
