//! `NSWindow`/`NSPanel` glue.
//!
//! A [`Window`] is a content [`View`] plus a native window and a delegate
//! object. The delegate object is an instance of a dynamic `NSObject`
//! subclass adopting `NSWindowDelegate`; its `owner` ivar points at the
//! window's [`WindowCore`], which forwards notifications to the user's
//! [`WindowDelegate`].

use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::ptr;

use objc2::runtime::{AnyObject, Bool, Sel};
use objc2::sel;

use super::menu::{perform_menu_action, MenuCommand};
use super::view::{View, ViewHandler, ViewRef};
use crate::binding;
use crate::error::{Result, ToolkitError};
use crate::geometry::{Color, Rect};
use crate::handles::{CfHandle, ObjcHandle};
use crate::model::constants::{BACKING_STORE_BUFFERED, DEFAULT_WINDOW_RECT, WINDOW_CLASS_ROOT};
use crate::model::{ViewFlags, WindowFlags};
use crate::platform::macos::ffi::bridge::{id, nil, nsstring, nsstring_ptr, NSRect, NO, YES};
use crate::platform::macos::ffi::coregraphics::{CGColor, CGColorCreateGenericRGB};
use crate::platform::macos::objc::{
    call, call_class, create_object, initialize, method1, notification, ClassDescriptor,
    DynamicClass, IvarSlot,
};
use crate::runtime::encoding;

/// `NSWindowTitleHidden`
const TITLE_HIDDEN: isize = 1;

// ============================================================================
// Delegate trait
// ============================================================================

/// Window-level notifications. Every method has a default.
#[allow(unused_variables)]
pub trait WindowDelegate: 'static {
    fn did_miniaturize(&mut self, window: &WindowProxy<'_>) {}
    fn did_deminiaturize(&mut self, window: &WindowProxy<'_>) {}
    fn did_enter_full_screen(&mut self, window: &WindowProxy<'_>) {}
    fn did_exit_full_screen(&mut self, window: &WindowProxy<'_>) {}
    fn did_become_key(&mut self, window: &WindowProxy<'_>) {}
    fn did_resign_key(&mut self, window: &WindowProxy<'_>) {}
    fn did_change_screen(&mut self, window: &WindowProxy<'_>) {}
    fn will_close(&mut self, window: &WindowProxy<'_>) {}

    /// Whether the close button may close the window.
    fn should_close(&mut self, window: &WindowProxy<'_>) -> bool {
        true
    }

    /// A menu item with an application-defined tag was chosen.
    fn on_menu_action(&mut self, window: &WindowProxy<'_>, tag: isize) {}
}

/// A delegate that keeps every default.
#[derive(Debug, Default)]
pub struct NoDelegate;

impl WindowDelegate for NoDelegate {}

// ============================================================================
// WindowCore and WindowProxy
// ============================================================================

/// Owner of the delegate object; lives as long as its [`Window`].
pub struct WindowCore {
    delegate: RefCell<Box<dyn WindowDelegate>>,
    ns_window: Cell<id>,
}

impl WindowCore {
    fn deliver<R: Default>(&self, f: impl FnOnce(&mut dyn WindowDelegate, &WindowProxy<'_>) -> R) -> R {
        let proxy = WindowProxy::new(self);
        match self.delegate.try_borrow_mut() {
            Ok(mut delegate) => f(&mut **delegate, &proxy),
            Err(_) => {
                log::debug!("window delegate busy, nested notification skipped");
                R::default()
            }
        }
    }
}

/// Operations on the native window behind a content view.
pub struct WindowProxy<'a> {
    window: id,
    core: Option<&'a WindowCore>,
}

impl<'a> WindowProxy<'a> {
    pub(crate) fn new(core: &'a WindowCore) -> Self {
        Self {
            window: core.ns_window.get(),
            core: Some(core),
        }
    }

    /// A proxy that ignores every operation.
    pub(crate) fn detached() -> Self {
        Self {
            window: nil,
            core: None,
        }
    }

    pub fn native_handle(&self) -> *mut AnyObject {
        self.window
    }

    /// Frame in screen coordinates.
    pub fn set_frame(&self, frame: Rect<f32>) {
        unsafe { call::<(), _>(self.window, sel!(setFrame:display:), (frame.to_native(), YES)) }
    }

    pub fn frame(&self) -> Rect<f32> {
        Rect::from_native(unsafe { call::<NSRect, _>(self.window, sel!(frame), ()) })
    }

    pub fn set_title(&self, title: &str) {
        let title = nsstring(title);
        unsafe { call::<(), _>(self.window, sel!(setTitle:), (nsstring_ptr(&title),)) }
    }

    /// Change decorations. `PANEL` cannot be toggled after creation.
    pub fn set_flags(&self, flags: WindowFlags) {
        unsafe { call::<(), _>(self.window, sel!(setStyleMask:), (flags.style_mask(),)) }
    }

    pub fn set_document_edited(&self, edited: bool) {
        let flag = if edited { YES } else { NO };
        unsafe { call::<(), _>(self.window, sel!(setDocumentEdited:), (flag,)) }
    }

    pub fn close(&self) {
        unsafe { call::<(), _>(self.window, sel!(close), ()) }
    }

    pub fn center(&self) {
        unsafe { call::<(), _>(self.window, sel!(center), ()) }
    }

    pub fn set_shadow(&self, shadow: bool) {
        let flag = if shadow { YES } else { NO };
        unsafe { call::<(), _>(self.window, sel!(setHasShadow:), (flag,)) }
    }

    /// Replace the window delegate. Not possible from inside a delegate
    /// callback, where the current delegate is borrowed.
    pub fn set_delegate<D: WindowDelegate>(&self, delegate: D) -> bool {
        let Some(core) = self.core else {
            return false;
        };
        match core.delegate.try_borrow_mut() {
            Ok(mut current) => {
                *current = Box::new(delegate);
                true
            }
            Err(_) => {
                log::warn!("window delegate replaced from its own callback, ignored");
                false
            }
        }
    }

    pub fn set_background_color(&self, color: Color) -> Result<()> {
        let [r, g, b, a] = color.components();
        let cg_color: CfHandle<CGColor> = unsafe { CfHandle::from_raw(CGColorCreateGenericRGB(r, g, b, a)) };
        let ns_color: id = unsafe { call_class("NSColor", sel!(colorWithCGColor:), (cg_color.as_ptr(),))? };
        unsafe { call::<(), _>(self.window, sel!(setBackgroundColor:), (ns_color,)) };
        Ok(())
    }
}

// ============================================================================
// Native class
// ============================================================================

/// `windowShouldClose:` reply; closing is allowed unless the delegate says
/// otherwise.
#[repr(transparent)]
pub(crate) struct ShouldClose(bool);

impl Default for ShouldClose {
    fn default() -> Self {
        ShouldClose(true)
    }
}

macro_rules! window_notifications {
    ($($marker:ident => $callback:ident),* $(,)?) => {
        $(
            crate::owner_method!($marker: WindowCore, (id) -> (), |core, _this, _| {
                core.deliver(|delegate, window| delegate.$callback(window))
            });
        )*
    };
}

window_notifications! {
    DidMiniaturize => did_miniaturize,
    DidDeminiaturize => did_deminiaturize,
    DidEnterFullScreen => did_enter_full_screen,
    DidExitFullScreen => did_exit_full_screen,
    DidBecomeKey => did_become_key,
    DidResignKey => did_resign_key,
    DidChangeScreen => did_change_screen,
    WillClose => will_close,
}

crate::owner_method!(WindowShouldClose: WindowCore, (id) -> ShouldClose, |core, _this, _| {
    core.deliver(|delegate, window| ShouldClose(delegate.should_close(window)))
});

crate::owner_method!(MenuAction: WindowCore, (id) -> (), |core, _this, (sender,)| {
    if let MenuCommand::Other(tag) = unsafe { perform_menu_action(sender) } {
        core.deliver(|delegate, window| delegate.on_menu_action(window, tag));
    }
});

type NotificationMethod = unsafe extern "C-unwind" fn(id, Sel, id);

pub(crate) struct WindowClass;

impl ClassDescriptor for WindowClass {
    type Owner = WindowCore;
    const ROOT_NAME: &'static str = WINDOW_CLASS_ROOT;
    const BASE_CLASS: &'static str = "NSObject";

    crate::class_storage!();

    fn install(class: &DynamicClass) -> Result<()> {
        class.add_protocol("NSWindowDelegate", true)?;

        let on_notification =
            |name: &str, imp: NotificationMethod| class.add_method(name, imp, encoding::NOTIFICATION);
        on_notification("windowDidMiniaturize:", notification::<DidMiniaturize>())?;
        on_notification("windowDidDeminiaturize:", notification::<DidDeminiaturize>())?;
        on_notification("windowDidEnterFullScreen:", notification::<DidEnterFullScreen>())?;
        on_notification("windowDidExitFullScreen:", notification::<DidExitFullScreen>())?;
        on_notification("windowDidBecomeKey:", notification::<DidBecomeKey>())?;
        on_notification("windowDidResignKey:", notification::<DidResignKey>())?;
        on_notification("windowDidChangeScreen:", notification::<DidChangeScreen>())?;
        on_notification("windowWillClose:", notification::<WillClose>())?;
        on_notification("menuAction:", notification::<MenuAction>())?;

        class.add_method(
            "windowShouldClose:",
            method1::<WindowShouldClose, id>(),
            encoding::BOOL_WITH_OBJECT,
        )
    }
}

// ============================================================================
// Window
// ============================================================================

/// A top-level window with a content view. Dereferences to the content
/// view's [`ViewRef`].
pub struct Window {
    core: Box<WindowCore>,
    delegate_object: ObjcHandle<AnyObject>,
    ns_window: ObjcHandle<AnyObject>,
    content: View,
}

impl Window {
    pub fn new<H: ViewHandler>(handler: H, flags: WindowFlags) -> Result<Window> {
        Self::with_delegate(handler, NoDelegate, flags)
    }

    pub fn with_delegate<H, D>(handler: H, delegate: D, flags: WindowFlags) -> Result<Window>
    where
        H: ViewHandler,
        D: WindowDelegate,
    {
        let (x, y, width, height) = DEFAULT_WINDOW_RECT;
        let content_rect = Rect::new(x as f32, y as f32, width as f32, height as f32);
        let content = View::new(handler, None, content_rect, ViewFlags::AutoResize)?;
        let instance = WindowClass::create_instance()?;

        let mut window = Window {
            core: Box::new(WindowCore {
                delegate: RefCell::new(Box::new(delegate)),
                ns_window: Cell::new(nil),
            }),
            delegate_object: ObjcHandle::null(),
            ns_window: ObjcHandle::null(),
            content,
        };

        unsafe {
            binding::bind(&IvarSlot::of(instance.as_ptr()), &*window.core);
            window.delegate_object = initialize(instance.into_raw(), sel!(init), ());

            let class_name = if flags.is_panel() { "NSPanel" } else { "NSWindow" };
            window.ns_window = create_object(
                class_name,
                sel!(initWithContentRect:styleMask:backing:defer:),
                (content_rect.to_native(), flags.style_mask(), BACKING_STORE_BUFFERED, YES),
            )?;
            if window.ns_window.is_null() {
                return Err(ToolkitError::ClassUnavailable(class_name.to_string()));
            }

            let ns_window = window.ns_window.as_ptr();
            window.core.ns_window.set(ns_window);
            call::<(), _>(ns_window, sel!(setDelegate:), (window.delegate_object.as_ptr(),));
            call::<(), _>(ns_window, sel!(setContentView:), (window.content.native_handle(),));
            call::<(), _>(ns_window, sel!(setReleasedWhenClosed:), (NO,));

            if flags.contains(WindowFlags::FULL_SIZE_CONTENT_VIEW) {
                call::<(), _>(ns_window, sel!(setTitlebarAppearsTransparent:), (YES,));
                call::<(), _>(ns_window, sel!(setTitleVisibility:), (TITLE_HIDDEN,));
            }
        }

        window.content.set_window(&*window.core);
        let proxy = window.proxy();
        unsafe { call::<(), _>(proxy.native_handle(), sel!(makeKeyAndOrderFront:), (nil,)) };
        proxy.center();

        log::debug!("created window {:?} ({flags:?})", window.content.id());
        Ok(window)
    }

    pub fn content(&self) -> &View {
        &self.content
    }

    pub fn proxy(&self) -> WindowProxy<'_> {
        WindowProxy::new(&self.core)
    }

    pub fn is_visible(&self) -> bool {
        unsafe { call::<Bool, _>(self.ns_window.as_ptr(), sel!(isVisible), ()) }.as_bool()
    }
}

impl Deref for Window {
    type Target = ViewRef;

    fn deref(&self) -> &ViewRef {
        &self.content
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        let ns_window = self.ns_window.as_ptr();
        unsafe {
            call::<(), _>(ns_window, sel!(setDelegate:), (nil,));
            binding::unbind(&IvarSlot::of(self.delegate_object.as_ptr()));
        }
        self.delegate_object.reset();
        unsafe { call::<(), _>(ns_window, sel!(close), ()) };
        self.ns_window.reset();

        self.core.ns_window.set(nil);
        self.content.set_window(ptr::null());
        log::debug!("destroyed window {:?}", self.content.id());
    }
}
