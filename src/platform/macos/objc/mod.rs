//! Objective-C runtime interop.
//!
//! Three narrow operations carry all of the AppKit glue:
//!
//! 1. register a type: [`ClassDescriptor`] builds one [`DynamicClass`] per
//!    Rust wrapper type, with an `owner` ivar;
//! 2. install a handler: [`DynamicClass::add_method`] with a free function or
//!    an [`OwnerMethod`] stub from [`trampoline`];
//! 3. bind an owner: [`IvarSlot`] with [`crate::binding`].
//!
//! [`message`] sends typed messages back into the runtime.
//!
//! # Module Structure
//!
//! - `class`: class registry and per-type singletons
//! - `trampoline`: `MethodImp` and owner-forwarding stubs
//! - `message`: `call`, `call_class`, `call_super`
//! - `slot`: the `owner` ivar
//! - `instance`: `ManualRelease` for objects, alloc/init helpers

pub mod class;
pub mod instance;
pub mod message;
pub mod slot;
pub mod trampoline;

pub use class::{ClassDescriptor, ClassStorage, DynamicClass};
pub use instance::{create_object, initialize, new_object};
pub use message::{call, call_by_name, call_class, call_super, class_property, MessageArguments};
pub use slot::IvarSlot;
pub use trampoline::{method0, method1, method2, notification, MethodImp, OwnerMethod};
