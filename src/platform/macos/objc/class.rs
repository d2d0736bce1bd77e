//! Runtime-allocated classes, one per descriptor type.
//!
//! A [`ClassDescriptor`] names a base class and a root label and installs its
//! methods. The first call to [`ClassDescriptor::class`] builds the class:
//!
//! ```text
//!   allocate pair ─▶ add `owner` ivar ─▶ D::install (methods, protocols) ─▶ register
//!        │                  │                        │
//!        └──────── any failure: log, dispose pair, record "unavailable" ────┘
//! ```
//!
//! The result (or its absence) is cached in the descriptor's `OnceLock`, so a
//! class is built at most once per process.

use std::ffi::{c_void, CStr, CString};
use std::ptr::NonNull;
use std::sync::{Mutex, OnceLock};

use objc2::runtime::{AnyClass, AnyObject};

use super::trampoline::MethodImp;
use crate::error::{Result, ToolkitError};
use crate::handles::ObjcHandle;
use crate::model::constants::{KVO_SUBCLASS_PREFIX, OWNER_IVAR};
use crate::platform::macos::ffi::bridge::{lookup_class, selector};
use crate::platform::macos::ffi::runtime::{
    class_addIvar, class_addMethod, class_addProtocol, class_conformsToProtocol, class_createInstance,
    class_getInstanceVariable, objc_allocateClassPair, objc_allocateProtocol,
    objc_disposeClassPair, objc_getProtocol, objc_registerClassPair, objc_registerProtocol,
};
use crate::runtime::naming::short_type_name;
use crate::runtime::{owner_ivar_encoding, unique_class_name};

/// Lazily built class of one descriptor; `None` once building failed.
pub type ClassStorage = OnceLock<Option<DynamicClass>>;

/// Static description of one dynamically created class.
pub trait ClassDescriptor: 'static {
    /// Rust type the `owner` ivar points at.
    type Owner: 'static;

    /// Prefix of the generated class name.
    const ROOT_NAME: &'static str;

    /// Name of the framework class to derive from.
    const BASE_CLASS: &'static str;

    /// Add methods and protocols. Runs once, before registration.
    fn install(class: &DynamicClass) -> Result<()>;

    /// Per-type cache; implement with [`class_storage!`](crate::class_storage).
    fn storage() -> &'static ClassStorage;

    /// The registered class, or `None` if building it failed.
    fn class() -> Option<&'static DynamicClass> {
        Self::storage()
            .get_or_init(DynamicClass::register::<Self>)
            .as_ref()
    }

    /// Allocate an uninitialized instance of the class.
    fn create_instance() -> Result<ObjcHandle<AnyObject>> {
        Self::class()
            .map(DynamicClass::create_instance)
            .ok_or_else(|| ToolkitError::ClassUnavailable(Self::ROOT_NAME.to_string()))
    }
}

/// Implements [`ClassDescriptor::storage`] with a function-local static.
#[macro_export]
macro_rules! class_storage {
    () => {
        fn storage() -> &'static $crate::platform::macos::objc::ClassStorage {
            static STORAGE: $crate::platform::macos::objc::ClassStorage =
                ::std::sync::OnceLock::new();
            &STORAGE
        }
    };
}

/// A class pair allocated at runtime.
pub struct DynamicClass {
    cls: NonNull<AnyClass>,
    name: String,
    base: String,
    selectors: Mutex<Vec<(String, String)>>,
}

// SAFETY: class objects are shared process-wide by the runtime, which
// serializes its own method-table updates.
unsafe impl Send for DynamicClass {}
unsafe impl Sync for DynamicClass {}

impl DynamicClass {
    fn register<D: ClassDescriptor + ?Sized>() -> Option<DynamicClass> {
        match Self::build::<D>() {
            Ok(class) => {
                log::debug!("registered class {} ({})", class.name, class.base);
                Some(class)
            }
            Err(e) => {
                log::error!("class registration for {} failed: {e}", D::ROOT_NAME);
                None
            }
        }
    }

    fn build<D: ClassDescriptor + ?Sized>() -> Result<DynamicClass> {
        let name = unique_class_name(D::ROOT_NAME);
        let c_name = CString::new(name.as_str()).map_err(|_| ToolkitError::InvalidName(name.clone()))?;
        let allocation_error = || ToolkitError::ClassAllocation {
            name: name.clone(),
            base: D::BASE_CLASS.to_string(),
        };

        let base = lookup_class(D::BASE_CLASS).ok_or_else(allocation_error)?;
        let raw = unsafe { objc_allocateClassPair(base, c_name.as_ptr(), 0) };
        let cls = NonNull::new(raw).ok_or_else(allocation_error)?;

        let class = DynamicClass {
            cls,
            name: name.clone(),
            base: D::BASE_CLASS.to_string(),
            selectors: Mutex::new(Vec::new()),
        };

        let owner_type = short_type_name(std::any::type_name::<D::Owner>());
        let setup = class.add_owner_ivar(owner_type).and_then(|_| D::install(&class));
        if let Err(e) = setup {
            // Never registered, so no instances or subclasses can exist.
            unsafe { objc_disposeClassPair(cls.as_ptr()) };
            std::mem::forget(class);
            return Err(e);
        }

        unsafe { objc_registerClassPair(cls.as_ptr()) };
        Ok(class)
    }

    fn add_owner_ivar(&self, owner_type: &str) -> Result<()> {
        let ivar_error = || ToolkitError::IvarRegistration {
            class: self.name.clone(),
            ivar: OWNER_IVAR.to_string_lossy().into_owned(),
        };
        let encoding = CString::new(owner_ivar_encoding(owner_type)).map_err(|_| ivar_error())?;
        let size = std::mem::size_of::<*mut c_void>();
        let alignment = std::mem::align_of::<*mut c_void>().trailing_zeros() as u8;

        let added = unsafe {
            class_addIvar(
                self.cls.as_ptr(),
                OWNER_IVAR.as_ptr(),
                size,
                alignment,
                encoding.as_ptr(),
            )
        };
        if added.as_bool() {
            Ok(())
        } else {
            Err(ivar_error())
        }
    }

    /// Install `imp` under the selector `name` with the given type encoding.
    ///
    /// Fails if the class already implements the selector itself; the
    /// existing implementation is left in place. The encoding is passed
    /// through unchecked and must describe `imp`'s real signature.
    pub fn add_method<F: MethodImp>(&self, name: &str, imp: F, encoding: &CStr) -> Result<()> {
        let method_error = || ToolkitError::MethodRegistration {
            class: self.name.clone(),
            selector: name.to_string(),
        };
        let sel = selector(name).ok_or_else(method_error)?;
        let added =
            unsafe { class_addMethod(self.cls.as_ptr(), sel, imp.into_imp(), encoding.as_ptr()) };
        if !added.as_bool() {
            return Err(method_error());
        }

        self.selectors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((name.to_string(), encoding.to_string_lossy().into_owned()));
        Ok(())
    }

    /// Adopt the protocol `name`.
    ///
    /// With `force`, a protocol the runtime does not know is created empty
    /// first (some delegate protocols are only materialized on first use).
    pub fn add_protocol(&self, name: &str, force: bool) -> Result<()> {
        let protocol_error = || ToolkitError::ProtocolRegistration {
            class: self.name.clone(),
            protocol: name.to_string(),
        };
        let c_name = CString::new(name).map_err(|_| protocol_error())?;

        let mut protocol = unsafe { objc_getProtocol(c_name.as_ptr()) };
        if protocol.is_null() && force {
            let created = unsafe { objc_allocateProtocol(c_name.as_ptr()) };
            if !created.is_null() {
                unsafe { objc_registerProtocol(created) };
                log::debug!("created empty protocol {name}");
            }
            protocol = created;
        }
        if protocol.is_null() {
            return Err(protocol_error());
        }

        let added = unsafe { class_addProtocol(self.cls.as_ptr(), protocol) };
        if added.as_bool() {
            Ok(())
        } else {
            Err(protocol_error())
        }
    }

    /// Whether the class adopts the protocol `name`.
    pub fn conforms_to(&self, name: &str) -> bool {
        let Ok(c_name) = CString::new(name) else {
            return false;
        };
        unsafe {
            let protocol = objc_getProtocol(c_name.as_ptr());
            !protocol.is_null() && class_conformsToProtocol(self.cls.as_ptr(), protocol).as_bool()
        }
    }

    /// Allocate a zeroed instance (owner slot null). Send an `init…` next.
    pub fn create_instance(&self) -> ObjcHandle<AnyObject> {
        unsafe { ObjcHandle::from_raw(class_createInstance(self.cls.as_ptr(), 0)) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_name(&self) -> &str {
        &self.base
    }

    pub fn as_class(&self) -> &AnyClass {
        unsafe { self.cls.as_ref() }
    }

    /// Selectors installed so far, with their encodings.
    pub fn selectors(&self) -> Vec<(String, String)> {
        self.selectors.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Whether the class declares the `owner` ivar (always true once registered).
    pub fn has_owner_slot(&self) -> bool {
        unsafe { !class_getInstanceVariable(self.cls.as_ptr(), OWNER_IVAR.as_ptr()).is_null() }
    }
}

impl Drop for DynamicClass {
    fn drop(&mut self) {
        // KVO swizzles observed instances into a runtime subclass; disposing
        // the parent while that subclass exists would leave it dangling.
        let kvo_name = format!("{KVO_SUBCLASS_PREFIX}{}", self.name);
        if lookup_class(&kvo_name).is_some() {
            log::debug!("keeping class {}: {kvo_name} is alive", self.name);
            return;
        }
        log::debug!("disposing class {}", self.name);
        unsafe { objc_disposeClassPair(self.cls.as_ptr()) };
    }
}

impl std::fmt::Debug for DynamicClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicClass")
            .field("name", &self.name)
            .field("base", &self.base)
            .finish()
    }
}
