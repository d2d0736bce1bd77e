//! Tests for dynamic classes, owner dispatch and message sending against the
//! live Objective-C runtime.
#![cfg(target_os = "macos")]

use std::cell::Cell;

use objc2::runtime::{AnyClass, AnyObject, Sel};
use objc2::sel;

use nano_ui::binding::{bind, is_bound, unbind};
use nano_ui::platform::macos::bridge::lookup_class;
use nano_ui::platform::macos::objc::{
    call, call_by_name, call_class, call_super, class_property, initialize, method0, new_object,
    ClassDescriptor, DynamicClass, IvarSlot,
};
use nano_ui::{class_storage, owner_method, ObjcHandle, ToolkitError};

struct Counter {
    hits: Cell<u32>,
}

owner_method!(Bump: Counter, () -> u32, |counter, _this, ()| {
    counter.hits.set(counter.hits.get() + 1);
    counter.hits.get()
});

struct CounterClass;

impl ClassDescriptor for CounterClass {
    type Owner = Counter;
    const ROOT_NAME: &'static str = "NanoTestCounterObject";
    const BASE_CLASS: &'static str = "NSObject";

    class_storage!();

    fn install(class: &DynamicClass) -> nano_ui::Result<()> {
        class.add_method("bump", method0::<Bump>(), c"I@:")
    }
}

struct Broken;

impl ClassDescriptor for Broken {
    type Owner = Counter;
    const ROOT_NAME: &'static str = "NanoTestBrokenObject";
    const BASE_CLASS: &'static str = "NanoClassThatDoesNotExist";

    class_storage!();

    fn install(_class: &DynamicClass) -> nano_ui::Result<()> {
        Ok(())
    }
}

/// Overrides `-hash` and adopts one forced and one existing protocol.
struct Shadow;

const FORCED_PROTOCOL: &str = "NanoTestForcedProtocol";
const SHADOW_HASH: usize = 7;

extern "C-unwind" fn shadow_hash(_this: *mut AnyObject, _cmd: Sel) -> usize {
    SHADOW_HASH
}

impl ClassDescriptor for Shadow {
    type Owner = Counter;
    const ROOT_NAME: &'static str = "NanoTestShadowObject";
    const BASE_CLASS: &'static str = "NSObject";

    class_storage!();

    fn install(class: &DynamicClass) -> nano_ui::Result<()> {
        class.add_method(
            "hash",
            shadow_hash as extern "C-unwind" fn(*mut AnyObject, Sel) -> usize,
            c"Q@:",
        )?;
        class.add_protocol(FORCED_PROTOCOL, true)?;
        class.add_protocol("NSCopying", false)
    }
}

fn shadow_instance() -> ObjcHandle<AnyObject> {
    let allocated = Shadow::create_instance().expect("shadow class registers");
    unsafe { initialize(allocated.into_raw(), sel!(init), ()) }
}

extern "C-unwind" fn answer(_this: *mut AnyObject, _cmd: Sel) -> u32 {
    42
}

fn counter_instance() -> ObjcHandle<AnyObject> {
    let allocated = CounterClass::create_instance().expect("test class registers");
    unsafe { initialize(allocated.into_raw(), sel!(init), ()) }
}

// === Registration Tests ===

#[test]
fn class_is_registered_once() {
    let a = CounterClass::class().expect("registered");
    let b = CounterClass::class().expect("registered");
    assert!(std::ptr::eq(a, b));
    assert!(a.name().starts_with("NanoTestCounterObject"));
    assert!(a.name().len() > "NanoTestCounterObject".len());
    assert_eq!(a.base_name(), "NSObject");
    assert!(a.has_owner_slot());
}

#[test]
fn installed_selectors_are_recorded() {
    let class = CounterClass::class().expect("registered");
    assert!(class
        .selectors()
        .iter()
        .any(|(name, encoding)| name == "bump" && encoding == "I@:"));
}

#[test]
fn duplicate_method_is_rejected_and_first_kept() {
    let class = CounterClass::class().expect("registered");
    let err = class
        .add_method("bump", answer as extern "C-unwind" fn(*mut AnyObject, Sel) -> u32, c"I@:")
        .unwrap_err();
    assert!(matches!(err, ToolkitError::MethodRegistration { .. }));

    let object = counter_instance();
    let counter = Counter { hits: Cell::new(10) };
    let slot = unsafe { IvarSlot::of(object.as_ptr()) };
    unsafe { bind(&slot, &counter) };
    let got: u32 = unsafe { call(object.as_ptr(), sel!(bump), ()) };
    assert_eq!(got, 11);
    unbind(&slot);
}

#[test]
fn unknown_base_class_leaves_class_unavailable() {
    assert!(Broken::class().is_none());
    assert_eq!(
        Broken::create_instance().unwrap_err(),
        ToolkitError::ClassUnavailable("NanoTestBrokenObject".to_string())
    );
}

// === Dispatch Tests ===

#[test]
fn bound_instance_reaches_owner() {
    let object = counter_instance();
    let counter = Counter { hits: Cell::new(0) };
    let slot = unsafe { IvarSlot::of(object.as_ptr()) };
    assert!(slot.exists());
    assert!(!is_bound(&slot));

    unsafe { bind(&slot, &counter) };
    let first: u32 = unsafe { call(object.as_ptr(), sel!(bump), ()) };
    let second: u32 = unsafe { call(object.as_ptr(), sel!(bump), ()) };
    assert_eq!((first, second), (1, 2));
    assert_eq!(counter.hits.get(), 2);
    unbind(&slot);
}

#[test]
fn unbound_instance_returns_default() {
    let object = counter_instance();
    let got: u32 = unsafe { call(object.as_ptr(), sel!(bump), ()) };
    assert_eq!(got, 0);
}

#[test]
fn unbind_stops_delivery() {
    let object = counter_instance();
    let counter = Counter { hits: Cell::new(0) };
    let slot = unsafe { IvarSlot::of(object.as_ptr()) };
    unsafe { bind(&slot, &counter) };
    unbind(&slot);
    let got: u32 = unsafe { call(object.as_ptr(), sel!(bump), ()) };
    assert_eq!(got, 0);
    assert_eq!(counter.hits.get(), 0);
}

#[test]
fn plain_objects_have_no_owner_slot() {
    let object = unsafe { new_object("NSObject") }.expect("NSObject exists");
    let slot = unsafe { IvarSlot::of(object.as_ptr()) };
    assert!(!slot.exists());
    assert!(!is_bound(&slot));
}

// === Message Tests ===

#[test]
fn message_to_nil_is_zero() {
    let got: usize = unsafe { call(std::ptr::null_mut(), sel!(hash), ()) };
    assert_eq!(got, 0);
}

#[test]
fn call_by_name_sends_selector() {
    let object = counter_instance();
    let counter = Counter { hits: Cell::new(5) };
    let slot = unsafe { IvarSlot::of(object.as_ptr()) };
    unsafe { bind(&slot, &counter) };
    let got: u32 = unsafe { call_by_name(object.as_ptr(), "bump", ()) }.unwrap();
    assert_eq!(got, 6);
    unbind(&slot);
}

#[test]
fn class_message_to_unknown_class_fails() {
    let result: nano_ui::Result<*mut AnyObject> =
        unsafe { call_class("NanoClassThatDoesNotExist", sel!(new), ()) };
    assert_eq!(
        result.unwrap_err(),
        ToolkitError::ClassUnavailable("NanoClassThatDoesNotExist".to_string())
    );
}

#[test]
fn class_message_returns_the_class_object() {
    let class: *mut AnyObject = unsafe { call_class("NSObject", sel!(class), ()) }.unwrap();
    let expected = lookup_class("NSObject").expect("NSObject exists");
    assert_eq!(class as usize, expected as *const AnyClass as usize);
}

#[test]
fn class_property_reads_a_shared_instance() {
    let info: *mut AnyObject = unsafe { class_property("NSProcessInfo", sel!(processInfo)) }.unwrap();
    assert!(!info.is_null());
    let pid: i32 = unsafe { call(info, sel!(processIdentifier), ()) };
    assert_eq!(pid as u32, std::process::id());
}

#[test]
fn override_is_dispatched_by_call() {
    let object = shadow_instance();
    let hash: usize = unsafe { call(object.as_ptr(), sel!(hash), ()) };
    assert_eq!(hash, SHADOW_HASH);
}

#[test]
fn super_call_uses_the_base_implementation() {
    let object = shadow_instance();
    let hash: usize = unsafe { call_super(object.as_ptr(), "NSObject", sel!(hash), ()) };
    // -[NSObject hash] is the object's address.
    assert_eq!(hash, object.as_ptr() as usize);
    assert_ne!(hash, SHADOW_HASH);
}

#[test]
fn super_call_into_unknown_class_returns_default() {
    let object = shadow_instance();
    let hash: usize =
        unsafe { call_super(object.as_ptr(), "NanoClassThatDoesNotExist", sel!(hash), ()) };
    assert_eq!(hash, 0);
}

// === Protocol Tests ===

#[test]
fn forced_protocol_is_created_and_adopted() {
    let class = Shadow::class().expect("registered");
    assert!(class.conforms_to(FORCED_PROTOCOL));
    assert!(class.conforms_to("NSCopying"));
    assert!(!class.conforms_to("NSCoding"));
}

#[test]
fn missing_protocol_without_force_fails() {
    let class = Shadow::class().expect("registered");
    let err = class.add_protocol("NanoTestProtocolNobodyDeclares", false).unwrap_err();
    assert!(matches!(err, ToolkitError::ProtocolRegistration { .. }));
    assert!(!class.conforms_to("NanoTestProtocolNobodyDeclares"));
}

#[test]
fn create_object_with_arguments() {
    let number = unsafe {
        nano_ui::platform::macos::objc::create_object("NSNumber", sel!(initWithInt:), (7i32,))
    }
    .expect("NSNumber exists");
    let value: i32 = unsafe { call(number.as_ptr(), sel!(intValue), ()) };
    assert_eq!(value, 7);
}
