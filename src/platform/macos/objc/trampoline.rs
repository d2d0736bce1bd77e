//! Method implementations the runtime can call.
//!
//! Two shapes are installed with [`DynamicClass::add_method`]:
//!
//! - free functions, any `extern "C-unwind" fn(id, Sel, ...) -> R`, installed
//!   as they are;
//! - owner methods: a zero-sized marker implementing [`OwnerMethod`], wrapped
//!   by a generic stub that recovers the owner from the instance's `owner`
//!   ivar and forwards to it.
//!
//! ```text
//!   runtime ──(self, _cmd, args)──▶ forwardN::<M> ──▶ IvarSlot(self)
//!                                                       │
//!                                   null ◀──────────────┴──────────▶ &M::Owner
//!                                    │                                  │
//!                              M::Output::default()              M::call(owner, self, args)
//! ```
//!
//! [`DynamicClass::add_method`]: super::DynamicClass::add_method

use objc2::runtime::{AnyObject, Sel};

use super::slot::IvarSlot;
use crate::binding::with_owner;
use crate::platform::macos::ffi::runtime::Imp;

type Id = *mut AnyObject;

/// A function pointer with the `(self, _cmd, args...)` calling convention.
///
/// # Safety
///
/// Implementors must be function pointers, so the transmute to [`Imp`] only
/// erases the signature.
pub unsafe trait MethodImp: Copy {
    fn into_imp(self) -> Imp;
}

macro_rules! method_imp {
    ($($arg:ident),*) => {
        unsafe impl<R $(, $arg)*> MethodImp for unsafe extern "C-unwind" fn(Id, Sel $(, $arg)*) -> R {
            fn into_imp(self) -> Imp {
                unsafe { std::mem::transmute::<Self, Imp>(self) }
            }
        }

        unsafe impl<R $(, $arg)*> MethodImp for extern "C-unwind" fn(Id, Sel $(, $arg)*) -> R {
            fn into_imp(self) -> Imp {
                unsafe { std::mem::transmute::<Self, Imp>(self) }
            }
        }
    };
}

method_imp!();
method_imp!(A);
method_imp!(A, B);
method_imp!(A, B, C);

/// A method of an owner type, named by a zero-sized marker.
///
/// `Args` is the tuple of arguments after `self` and `_cmd`.
pub trait OwnerMethod: 'static {
    type Owner: 'static;
    type Args;
    type Output: Default;

    fn call(owner: &Self::Owner, this: Id, args: Self::Args) -> Self::Output;
}

/// Stub for `(self, _cmd) -> R`.
pub unsafe extern "C-unwind" fn forward0<M>(this: Id, _cmd: Sel) -> M::Output
where
    M: OwnerMethod<Args = ()>,
{
    let slot = IvarSlot::of(this);
    with_owner(&slot, |owner: &M::Owner| M::call(owner, this, ()))
}

/// Stub for `(self, _cmd, a) -> R`.
pub unsafe extern "C-unwind" fn forward1<M, A>(this: Id, _cmd: Sel, a: A) -> M::Output
where
    M: OwnerMethod<Args = (A,)>,
{
    let slot = IvarSlot::of(this);
    with_owner(&slot, |owner: &M::Owner| M::call(owner, this, (a,)))
}

/// Stub for `(self, _cmd, a, b) -> R`.
pub unsafe extern "C-unwind" fn forward2<M, A, B>(this: Id, _cmd: Sel, a: A, b: B) -> M::Output
where
    M: OwnerMethod<Args = (A, B)>,
{
    let slot = IvarSlot::of(this);
    with_owner(&slot, |owner: &M::Owner| M::call(owner, this, (a, b)))
}

/// Stub for notification observers, `v@:@`. The handler's result is dropped.
pub unsafe extern "C-unwind" fn notify<M>(this: Id, _cmd: Sel, notification: Id)
where
    M: OwnerMethod<Args = (Id,)>,
{
    let slot = IvarSlot::of(this);
    with_owner(&slot, |owner: &M::Owner| {
        M::call(owner, this, (notification,));
    })
}

// === Typed constructors (fn item → fn pointer) ===

pub fn method0<M>() -> unsafe extern "C-unwind" fn(Id, Sel) -> M::Output
where
    M: OwnerMethod<Args = ()>,
{
    forward0::<M>
}

pub fn method1<M, A>() -> unsafe extern "C-unwind" fn(Id, Sel, A) -> M::Output
where
    M: OwnerMethod<Args = (A,)>,
{
    forward1::<M, A>
}

pub fn method2<M, A, B>() -> unsafe extern "C-unwind" fn(Id, Sel, A, B) -> M::Output
where
    M: OwnerMethod<Args = (A, B)>,
{
    forward2::<M, A, B>
}

pub fn notification<M>() -> unsafe extern "C-unwind" fn(Id, Sel, Id)
where
    M: OwnerMethod<Args = (Id,)>,
{
    notify::<M>
}

/// Declare an [`OwnerMethod`] marker.
///
/// ```ignore
/// owner_method!(IsFlipped: ViewCore, () -> bool, |core, _this, ()| core.is_flipped());
/// ```
#[macro_export]
macro_rules! owner_method {
    ($name:ident : $owner:ty, ($($arg:ty),*) -> $out:ty, |$o:pat_param, $this:pat_param, $args:pat_param| $body:expr) => {
        pub(crate) struct $name;

        impl $crate::platform::macos::objc::OwnerMethod for $name {
            type Owner = $owner;
            type Args = ($($arg,)*);
            type Output = $out;

            #[allow(unused_variables)]
            fn call(
                $o: &Self::Owner,
                $this: *mut ::objc2::runtime::AnyObject,
                $args: Self::Args,
            ) -> Self::Output {
                $body
            }
        }
    };
}
