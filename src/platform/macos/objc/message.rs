//! Dynamic message dispatch with typed argument tuples.
//!
//! Each call looks the implementation up again with
//! `class_getMethodImplementation` and calls it through a function pointer of
//! the exact Rust signature. This avoids `objc_msgSend` variants entirely and
//! lets struct arguments and returns (rects, points) use the plain C ABI.
//!
//! Nothing is converted: the tuple types and `R` must match the method.

use std::ffi::CString;

use objc2::encode::{EncodeArgument, EncodeReturn};
use objc2::runtime::{AnyClass, AnyObject, Sel};

use crate::error::{Result, ToolkitError};
use crate::platform::macos::ffi::bridge::{lookup_class, selector};
use crate::platform::macos::ffi::runtime::{
    class_getMethodImplementation, object_getClass, objc_getMetaClass, Imp,
};

type Id = *mut AnyObject;

/// Argument tuples, arity 0 to 4.
pub trait MessageArguments: Sized {
    /// Call `imp` as `(receiver, sel, args...) -> R`.
    ///
    /// # Safety
    ///
    /// `imp` must implement `sel` with exactly this signature.
    unsafe fn invoke<R: EncodeReturn>(imp: Imp, receiver: Id, sel: Sel, args: Self) -> R;
}

macro_rules! message_arguments {
    ($($t:ident => $v:ident),*) => {
        impl<$($t: EncodeArgument),*> MessageArguments for ($($t,)*) {
            unsafe fn invoke<R: EncodeReturn>(imp: Imp, receiver: Id, sel: Sel, args: Self) -> R {
                let ($($v,)*) = args;
                let imp = std::mem::transmute::<Imp, unsafe extern "C-unwind" fn(Id, Sel $(, $t)*) -> R>(imp);
                imp(receiver, sel $(, $v)*)
            }
        }
    };
}

message_arguments!();
message_arguments!(A => a);
message_arguments!(A => a, B => b);
message_arguments!(A => a, B => b, C => c);
message_arguments!(A => a, B => b, C => c, D => d);

/// Send `sel` to `receiver`.
///
/// A `nil` receiver returns zeroed memory, matching Objective-C messaging
/// semantics.
///
/// # Safety
///
/// `receiver` must be `nil` or live, the method must take `A` and return `R`,
/// and `R` must be valid when zeroed.
pub unsafe fn call<R, A>(receiver: Id, sel: Sel, args: A) -> R
where
    R: EncodeReturn,
    A: MessageArguments,
{
    if receiver.is_null() {
        return std::mem::zeroed();
    }
    match class_getMethodImplementation(object_getClass(receiver), sel) {
        Some(imp) => A::invoke(imp, receiver, sel, args),
        None => std::mem::zeroed(),
    }
}

/// [`call`] with the selector given by name.
///
/// # Safety
///
/// As for [`call`].
pub unsafe fn call_by_name<R, A>(receiver: Id, name: &str, args: A) -> Result<R>
where
    R: EncodeReturn,
    A: MessageArguments,
{
    let sel = selector(name).ok_or_else(|| ToolkitError::InvalidName(name.to_string()))?;
    Ok(call(receiver, sel, args))
}

/// Send a class message (`+method`) to the class called `class_name`.
///
/// # Safety
///
/// The class method must take `A` and return `R`.
pub unsafe fn call_class<R, A>(class_name: &str, sel: Sel, args: A) -> Result<R>
where
    R: EncodeReturn,
    A: MessageArguments,
{
    let unavailable = || ToolkitError::ClassUnavailable(class_name.to_string());
    let c_name = CString::new(class_name).map_err(|_| ToolkitError::InvalidName(class_name.to_string()))?;
    let class = lookup_class(class_name).ok_or_else(unavailable)?;
    let meta = objc_getMetaClass(c_name.as_ptr());
    if meta.is_null() {
        return Err(unavailable());
    }
    let imp = class_getMethodImplementation(meta, sel).ok_or_else(unavailable)?;
    let receiver = class as *const AnyClass as Id;
    Ok(A::invoke(imp, receiver, sel, args))
}

/// Read a class property such as `NSGraphicsContext.currentContext`.
///
/// # Safety
///
/// The class method must take no arguments and return `R`.
pub unsafe fn class_property<R: EncodeReturn>(class_name: &str, sel: Sel) -> Result<R> {
    call_class(class_name, sel, ())
}

/// Run `base_class`'s implementation of `sel` on `receiver`, skipping any
/// override in between.
///
/// An unknown base class is logged and yields `R::default()`.
///
/// # Safety
///
/// `receiver` must be an instance of (a subclass of) `base_class`, and the
/// method must take `A` and return `R`.
pub unsafe fn call_super<R, A>(receiver: Id, base_class: &str, sel: Sel, args: A) -> R
where
    R: EncodeReturn + Default,
    A: MessageArguments,
{
    let Some(base) = lookup_class(base_class) else {
        log::error!("super call into unknown class {base_class}");
        return R::default();
    };
    match class_getMethodImplementation(base, sel) {
        Some(imp) => A::invoke(imp, receiver, sel, args),
        None => R::default(),
    }
}
