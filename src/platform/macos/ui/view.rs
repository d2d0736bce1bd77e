//! `NSView` subclass glue.
//!
//! Every [`View`] owns one instance of a dynamically created `NSView`
//! subclass. The instance's `owner` ivar points back at the view's boxed
//! [`ViewRef`], and the subclass forwards AppKit callbacks (drawing, mouse,
//! keyboard, focus, frame changes) to the view's [`ViewHandler`].
//!
//! # Lifecycle
//!
//! ```text
//!   View::new ── alloc ─▶ bind owner ─▶ initWithFrame: ─▶ frame observer
//!                                                            │
//!                               (parent) addSubview: ◀───────┘
//!
//!   drop / try_destroy ── tree remove (fails with children)
//!        ─▶ tracking area ─▶ observer ─▶ unbind ─▶ removeFromSuperview ─▶ release
//! ```
//!
//! Handlers are borrowed mutably for the duration of a callback. A callback
//! that triggers another one on the same view (for instance `set_frame`
//! inside `on_frame_changed`) has the nested delivery skipped.

use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::ptr;

use objc2::runtime::{AnyObject, Bool, Sel};
use objc2::sel;

use super::event::snapshot;
use super::graphics::GraphicContext;
use super::window::{WindowCore, WindowProxy};
use crate::binding::{self, OwnerSlot};
use crate::error::{Result, ToolkitError};
use crate::events::Event;
use crate::geometry::{Point, Rect, Size};
use crate::handles::ObjcHandle;
use crate::hierarchy::{ViewId, ViewTree};
use crate::model::constants::{NS_VIEW_NOT_SIZABLE, VIEW_CLASS_ROOT, VIEW_TRACKING_OPTIONS};
use crate::model::ViewFlags;
use crate::platform::macos::ffi::bridge::{id, nil, nsstring, nsstring_ptr, NSPoint, NSRect, NO, YES};
use crate::platform::macos::ffi::coregraphics::CGContext;
use crate::platform::macos::objc::{
    call, call_super, class_property, create_object, initialize, method0, method1, notification,
    ClassDescriptor, DynamicClass, IvarSlot,
};
use crate::runtime::encoding;

const FRAME_DID_CHANGE: &str = "NSViewFrameDidChangeNotification";

thread_local! {
    // Views live on the main thread; the tree maps ids to their boxed cores.
    static VIEWS: RefCell<ViewTree<*const ViewRef>> = RefCell::new(ViewTree::new());
}

// ============================================================================
// Handler trait
// ============================================================================

/// Callbacks of one view. Every method defaults to doing nothing.
#[allow(unused_variables)]
pub trait ViewHandler: 'static {
    /// Before drawing starts; the last chance to change the layout.
    fn on_will_draw(&mut self, view: &ViewRef) {}
    fn on_draw(&mut self, view: &ViewRef, gc: &mut GraphicContext, dirty: Rect<f32>) {}
    fn on_frame_changed(&mut self, view: &ViewRef) {}

    fn on_focus(&mut self, view: &ViewRef) {}
    fn on_unfocus(&mut self, view: &ViewRef) {}
    fn on_show(&mut self, view: &ViewRef) {}
    fn on_hide(&mut self, view: &ViewRef) {}

    /// Left button.
    fn on_mouse_down(&mut self, view: &ViewRef, event: &Event) {}
    fn on_mouse_up(&mut self, view: &ViewRef, event: &Event) {}
    fn on_mouse_dragged(&mut self, view: &ViewRef, event: &Event) {}
    fn on_right_mouse_down(&mut self, view: &ViewRef, event: &Event) {}
    fn on_right_mouse_up(&mut self, view: &ViewRef, event: &Event) {}
    fn on_right_mouse_dragged(&mut self, view: &ViewRef, event: &Event) {}
    /// Any button other than left and right.
    fn on_other_mouse_down(&mut self, view: &ViewRef, event: &Event) {}
    fn on_other_mouse_up(&mut self, view: &ViewRef, event: &Event) {}
    fn on_other_mouse_dragged(&mut self, view: &ViewRef, event: &Event) {}
    fn on_mouse_moved(&mut self, view: &ViewRef, event: &Event) {}
    fn on_mouse_entered(&mut self, view: &ViewRef, event: &Event) {}
    fn on_mouse_exited(&mut self, view: &ViewRef, event: &Event) {}
    fn on_scroll_wheel(&mut self, view: &ViewRef, event: &Event) {}

    fn on_key_down(&mut self, view: &ViewRef, event: &Event) {}
    fn on_key_up(&mut self, view: &ViewRef, event: &Event) {}
    fn on_flags_changed(&mut self, view: &ViewRef, event: &Event) {}

    fn on_did_add_subview(&mut self, view: &ViewRef, child: ViewId) {}
    /// `subview` is the native view about to leave this one.
    fn on_will_remove_subview(&mut self, view: &ViewRef, subview: *mut AnyObject) {}
    fn on_did_remove_subview(&mut self, view: &ViewRef, child: ViewId) {}
}

/// A handler that ignores every callback.
#[derive(Debug, Default)]
pub struct NoHandler;

impl ViewHandler for NoHandler {}

// ============================================================================
// ViewRef: the view as seen from callbacks
// ============================================================================

/// A live view: its id, native object and handler.
///
/// Owned (boxed) by a [`View`]; callbacks receive it by reference.
pub struct ViewRef {
    id: ViewId,
    native: Cell<id>,
    handler: RefCell<Box<dyn ViewHandler>>,
    window: Cell<*const WindowCore>,
}

impl ViewRef {
    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn native_handle(&self) -> *mut AnyObject {
        self.native.get()
    }

    fn deliver<R: Default>(&self, f: impl FnOnce(&mut dyn ViewHandler, &ViewRef) -> R) -> R {
        match self.handler.try_borrow_mut() {
            Ok(mut handler) => f(&mut **handler, self),
            Err(_) => {
                log::debug!("view {:?}: nested callback skipped", self.id);
                R::default()
            }
        }
    }

    fn deliver_event(&self, ns_event: id, f: impl FnOnce(&mut dyn ViewHandler, &ViewRef, &Event)) {
        let event = unsafe { snapshot(ns_event, self.native_handle()) };
        self.deliver(|handler, view| f(handler, view, &event));
    }

    // === Frame ===

    pub fn set_frame(&self, frame: Rect<f32>) {
        unsafe { call::<(), _>(self.native_handle(), sel!(setFrame:), (frame.to_native(),)) }
    }

    pub fn set_frame_position(&self, position: Point<f32>) {
        unsafe { call::<(), _>(self.native_handle(), sel!(setFrameOrigin:), (position.to_native(),)) }
    }

    pub fn set_frame_size(&self, size: Size<f32>) {
        unsafe { call::<(), _>(self.native_handle(), sel!(setFrameSize:), (size.to_native(),)) }
    }

    /// Frame in the parent's coordinates.
    pub fn frame(&self) -> Rect<f32> {
        Rect::from_native(unsafe { call::<NSRect, _>(self.native_handle(), sel!(frame), ()) })
    }

    pub fn bounds(&self) -> Rect<f32> {
        Rect::from_native(unsafe { call::<NSRect, _>(self.native_handle(), sel!(bounds), ()) })
    }

    pub fn visible_rect(&self) -> Rect<f32> {
        Rect::from_native(unsafe { call::<NSRect, _>(self.native_handle(), sel!(visibleRect), ()) })
    }

    pub fn set_auto_resize(&self, enabled: bool) {
        let flags = if enabled {
            ViewFlags::AutoResize
        } else {
            ViewFlags::None
        };
        self.set_autoresizing(flags);
    }

    fn set_autoresizing(&self, flags: ViewFlags) {
        unsafe {
            call::<(), _>(
                self.native_handle(),
                sel!(setAutoresizingMask:),
                (flags.autoresizing_mask(),),
            )
        }
    }

    pub fn is_auto_resizing(&self) -> bool {
        let mask: u64 = unsafe { call(self.native_handle(), sel!(autoresizingMask), ()) };
        mask != NS_VIEW_NOT_SIZABLE
    }

    // === Coordinates ===

    /// Convert `point` from `from`'s coordinates into this view's.
    pub fn convert_from_view(&self, point: Point<f32>, from: &ViewRef) -> Point<f32> {
        let converted: NSPoint = unsafe {
            call(
                self.native_handle(),
                sel!(convertPoint:fromView:),
                (point.to_native(), from.native_handle()),
            )
        };
        Point::from_native(converted)
    }

    /// Convert `point` from this view's coordinates into `to`'s.
    pub fn convert_to_view(&self, point: Point<f32>, to: &ViewRef) -> Point<f32> {
        let converted: NSPoint = unsafe {
            call(
                self.native_handle(),
                sel!(convertPoint:toView:),
                (point.to_native(), to.native_handle()),
            )
        };
        Point::from_native(converted)
    }

    /// Origin of the bounds in window coordinates.
    pub fn position_in_window(&self) -> Point<f32> {
        let origin = self.bounds().origin.to_native();
        let converted: NSPoint =
            unsafe { call(self.native_handle(), sel!(convertPoint:toView:), (origin, nil)) };
        Point::from_native(converted)
    }

    /// Origin of the bounds in screen coordinates (window coordinates when
    /// the view is not in a window).
    pub fn position_in_screen(&self) -> Point<f32> {
        let in_window = self.position_in_window();
        let window = self.native_window();
        if window.is_null() {
            return in_window;
        }
        let converted: NSPoint =
            unsafe { call(window, sel!(convertPointToScreen:), (in_window.to_native(),)) };
        Point::from_native(converted)
    }

    fn native_window(&self) -> id {
        unsafe { call(self.native_handle(), sel!(window), ()) }
    }

    // === Visibility and focus ===

    pub fn set_hidden(&self, hidden: bool) {
        let flag = if hidden { YES } else { NO };
        unsafe { call::<(), _>(self.native_handle(), sel!(setHidden:), (flag,)) }
    }

    pub fn is_hidden(&self) -> bool {
        unsafe { call::<Bool, _>(self.native_handle(), sel!(isHidden), ()) }.as_bool()
    }

    /// Make this view the window's first responder.
    pub fn focus(&self) -> bool {
        let window = self.native_window();
        if window.is_null() {
            return false;
        }
        unsafe { call::<Bool, _>(window, sel!(makeFirstResponder:), (self.native_handle(),)) }.as_bool()
    }

    pub fn unfocus(&self) -> bool {
        if !self.is_focused() {
            return false;
        }
        unsafe { call::<Bool, _>(self.native_window(), sel!(makeFirstResponder:), (nil,)) }.as_bool()
    }

    pub fn is_focused(&self) -> bool {
        let window = self.native_window();
        if window.is_null() {
            return false;
        }
        let responder: id = unsafe { call(window, sel!(firstResponder), ()) };
        responder == self.native_handle()
    }

    // === Drawing ===

    pub fn redraw(&self) {
        unsafe { call::<(), _>(self.native_handle(), sel!(setNeedsDisplay:), (YES,)) }
    }

    pub fn redraw_rect(&self, rect: Rect<f32>) {
        unsafe { call::<(), _>(self.native_handle(), sel!(setNeedsDisplayInRect:), (rect.to_native(),)) }
    }

    /// Whether `rect` intersects the area being drawn (inside `on_draw`).
    pub fn is_dirty_rect(&self, rect: Rect<f32>) -> bool {
        unsafe { call::<Bool, _>(self.native_handle(), sel!(needsToDrawRect:), (rect.to_native(),)) }
            .as_bool()
    }

    // === Hierarchy ===

    pub fn parent(&self) -> Option<ViewId> {
        VIEWS.with(|tree| tree.borrow().parent(self.id))
    }

    pub fn children(&self) -> Vec<ViewId> {
        VIEWS.with(|tree| tree.borrow().children(self.id).to_vec())
    }

    /// Whether this view is the content view of a [`Window`](super::Window).
    pub fn is_window(&self) -> bool {
        !self.window.get().is_null()
    }

    pub(crate) fn set_window(&self, core: *const WindowCore) {
        self.window.set(core);
    }

    /// Window operations. Only valid on a window's content view; elsewhere
    /// the call is a contract violation and the returned proxy does nothing.
    pub fn window_proxy(&self) -> WindowProxy<'_> {
        match self.try_window_proxy() {
            Ok(proxy) => proxy,
            Err(e) => {
                log::error!("view {:?}: {e}", self.id);
                debug_assert!(false, "window_proxy() on a view that is not a window");
                WindowProxy::detached()
            }
        }
    }

    pub fn try_window_proxy(&self) -> Result<WindowProxy<'_>> {
        // SAFETY: the window clears this pointer before its core is dropped.
        match unsafe { self.window.get().as_ref() } {
            Some(core) => Ok(WindowProxy::new(core)),
            None => Err(ToolkitError::NotAWindow),
        }
    }

    // === Native callbacks ===

    fn draw(&self, dirty: NSRect) {
        let context: id = match unsafe { class_property("NSGraphicsContext", sel!(currentContext)) } {
            Ok(context) => context,
            Err(e) => {
                log::error!("no graphics context: {e}");
                return;
            }
        };
        if context.is_null() {
            return;
        }
        let cg: *mut CGContext = unsafe { call(context, sel!(CGContext), ()) };
        if cg.is_null() {
            return;
        }
        let mut gc = unsafe { GraphicContext::from_raw(cg) };
        self.deliver(|handler, view| handler.on_draw(view, &mut gc, Rect::from_native(dirty)));
    }

    /// Deliver mouse-moved to the deepest view under the cursor.
    fn mouse_moved(&self, ns_event: id) {
        let target = unsafe { self.hit_owner(ns_event) }.unwrap_or(self);
        target.deliver_event(ns_event, |handler, view, event| handler.on_mouse_moved(view, event));
    }

    unsafe fn hit_owner(&self, ns_event: id) -> Option<&ViewRef> {
        let window = self.native_window();
        if window.is_null() {
            return None;
        }
        let content: id = call(window, sel!(contentView), ());
        let frame_view: id = call(content, sel!(superview), ());
        let reference = if frame_view.is_null() { content } else { frame_view };

        let in_window: NSPoint = call(ns_event, sel!(locationInWindow), ());
        let point: NSPoint = call(reference, sel!(convertPoint:fromView:), (in_window, nil));
        let hit: id = call(content, sel!(hitTest:), (point,));
        let owner = IvarSlot::of(hit).load() as *const ViewRef;
        owner.as_ref()
    }
}

impl std::fmt::Debug for ViewRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRef")
            .field("id", &self.id)
            .field("native", &self.native.get())
            .field("is_window", &self.is_window())
            .finish()
    }
}

// ============================================================================
// Native class
// ============================================================================

crate::owner_method!(BecomeFirstResponder: ViewRef, () -> bool, |view, _this, ()| {
    view.deliver(|handler, v| handler.on_focus(v));
    true
});
crate::owner_method!(ResignFirstResponder: ViewRef, () -> bool, |view, _this, ()| {
    view.deliver(|handler, v| handler.on_unfocus(v));
    true
});
crate::owner_method!(ViewDidHide: ViewRef, () -> (), |view, _this, ()| {
    view.deliver(|handler, v| handler.on_hide(v))
});
crate::owner_method!(ViewDidUnhide: ViewRef, () -> (), |view, _this, ()| {
    view.deliver(|handler, v| handler.on_show(v))
});
crate::owner_method!(DrawRect: ViewRef, (NSRect) -> (), |view, _this, (dirty,)| view.draw(dirty));
crate::owner_method!(FrameChanged: ViewRef, (id) -> (), |view, _this, _| {
    view.deliver(|handler, v| handler.on_frame_changed(v))
});
crate::owner_method!(WillRemoveSubview: ViewRef, (id) -> (), |view, _this, (subview,)| {
    view.deliver(|handler, v| handler.on_will_remove_subview(v, subview))
});
crate::owner_method!(MouseMoved: ViewRef, (id) -> (), |view, _this, (event,)| view.mouse_moved(event));

macro_rules! event_methods {
    ($($marker:ident => $callback:ident),* $(,)?) => {
        $(
            crate::owner_method!($marker: ViewRef, (id) -> (), |view, _this, (event,)| {
                view.deliver_event(event, |handler, v, e| handler.$callback(v, e))
            });
        )*
    };
}

event_methods! {
    MouseDown => on_mouse_down,
    MouseUp => on_mouse_up,
    MouseDragged => on_mouse_dragged,
    RightMouseDown => on_right_mouse_down,
    RightMouseUp => on_right_mouse_up,
    RightMouseDragged => on_right_mouse_dragged,
    OtherMouseDown => on_other_mouse_down,
    OtherMouseUp => on_other_mouse_up,
    OtherMouseDragged => on_other_mouse_dragged,
    MouseEntered => on_mouse_entered,
    MouseExited => on_mouse_exited,
    ScrollWheel => on_scroll_wheel,
    KeyDown => on_key_down,
    KeyUp => on_key_up,
    FlagsChanged => on_flags_changed,
}

extern "C-unwind" fn returns_yes(_this: id, _cmd: Sel) -> bool {
    true
}

unsafe extern "C-unwind" fn dealloc(this: id, _cmd: Sel) {
    binding::unbind(&IvarSlot::of(this));
    call_super::<(), _>(this, "NSView", sel!(dealloc), ());
}

unsafe extern "C-unwind" fn view_will_draw(this: id, _cmd: Sel) {
    binding::with_owner(&IvarSlot::of(this), |view: &ViewRef| {
        view.deliver(|handler, v| handler.on_will_draw(v))
    });
    call_super::<(), _>(this, "NSView", sel!(viewWillDraw), ());
}

unsafe extern "C-unwind" fn update_tracking_areas(this: id, _cmd: Sel) {
    call_super::<(), _>(this, "NSView", sel!(updateTrackingAreas), ());
}

type PlainMethod = unsafe extern "C-unwind" fn(id, Sel);
type FlagMethod = extern "C-unwind" fn(id, Sel) -> bool;
type EventMethod = unsafe extern "C-unwind" fn(id, Sel, id);

pub(crate) struct ViewClass;

impl ClassDescriptor for ViewClass {
    type Owner = ViewRef;
    const ROOT_NAME: &'static str = VIEW_CLASS_ROOT;
    const BASE_CLASS: &'static str = "NSView";

    crate::class_storage!();

    fn install(class: &DynamicClass) -> Result<()> {
        class.add_method("dealloc", dealloc as PlainMethod, encoding::VOID)?;
        class.add_method("isFlipped", returns_yes as FlagMethod, encoding::BOOL)?;
        class.add_method("acceptsFirstResponder", returns_yes as FlagMethod, encoding::BOOL)?;
        class.add_method("becomeFirstResponder", method0::<BecomeFirstResponder>(), encoding::BOOL)?;
        class.add_method("resignFirstResponder", method0::<ResignFirstResponder>(), encoding::BOOL)?;
        class.add_method("viewWillDraw", view_will_draw as PlainMethod, encoding::VOID)?;
        class.add_method("updateTrackingAreas", update_tracking_areas as PlainMethod, encoding::VOID)?;
        class.add_method("viewDidHide", method0::<ViewDidHide>(), encoding::VOID)?;
        class.add_method("viewDidUnhide", method0::<ViewDidUnhide>(), encoding::VOID)?;
        class.add_method("drawRect:", method1::<DrawRect, NSRect>(), encoding::DRAW_RECT)?;
        class.add_method("frameChanged:", notification::<FrameChanged>(), encoding::NOTIFICATION)?;

        let on_event = |name: &str, imp: EventMethod| class.add_method(name, imp, encoding::NOTIFICATION);
        on_event("willRemoveSubview:", method1::<WillRemoveSubview, id>())?;
        on_event("mouseDown:", method1::<MouseDown, id>())?;
        on_event("rightMouseDown:", method1::<RightMouseDown, id>())?;
        on_event("otherMouseDown:", method1::<OtherMouseDown, id>())?;
        on_event("mouseUp:", method1::<MouseUp, id>())?;
        on_event("rightMouseUp:", method1::<RightMouseUp, id>())?;
        on_event("otherMouseUp:", method1::<OtherMouseUp, id>())?;
        on_event("mouseDragged:", method1::<MouseDragged, id>())?;
        on_event("rightMouseDragged:", method1::<RightMouseDragged, id>())?;
        on_event("otherMouseDragged:", method1::<OtherMouseDragged, id>())?;
        on_event("mouseMoved:", method1::<MouseMoved, id>())?;
        on_event("mouseEntered:", method1::<MouseEntered, id>())?;
        on_event("mouseExited:", method1::<MouseExited, id>())?;
        on_event("scrollWheel:", method1::<ScrollWheel, id>())?;
        on_event("keyDown:", method1::<KeyDown, id>())?;
        on_event("keyUp:", method1::<KeyUp, id>())?;
        on_event("flagsChanged:", method1::<FlagsChanged, id>())?;
        Ok(())
    }
}

// ============================================================================
// View: the owning handle
// ============================================================================

/// An owned native view. Dereferences to [`ViewRef`].
pub struct View {
    core: Box<ViewRef>,
    native: ObjcHandle<AnyObject>,
    tracking_area: ObjcHandle<AnyObject>,
    torn_down: bool,
}

impl View {
    /// Create a view with `frame` (in the parent's coordinates) and attach
    /// it to `parent`, if any.
    pub fn new<H: ViewHandler>(
        handler: H,
        parent: Option<&ViewRef>,
        frame: Rect<f32>,
        flags: ViewFlags,
    ) -> Result<View> {
        let instance = ViewClass::create_instance()?;

        let id = VIEWS.with(|tree| tree.borrow_mut().insert(ptr::null()));
        let core = Box::new(ViewRef {
            id,
            native: Cell::new(nil),
            handler: RefCell::new(Box::new(handler)),
            window: Cell::new(ptr::null()),
        });
        VIEWS.with(|tree| {
            if let Some(payload) = tree.borrow_mut().payload_mut(id) {
                *payload = &*core as *const ViewRef;
            }
        });

        let mut view = View {
            core,
            native: ObjcHandle::null(),
            tracking_area: ObjcHandle::null(),
            torn_down: false,
        };

        unsafe {
            binding::bind(&IvarSlot::of(instance.as_ptr()), &*view.core);
            view.native = initialize(instance.into_raw(), sel!(initWithFrame:), (frame.to_native(),));
            if view.native.is_null() {
                return Err(ToolkitError::ClassUnavailable(VIEW_CLASS_ROOT.to_string()));
            }
            view.core.native.set(view.native.as_ptr());
            view.observe_frame()?;
            view.core.set_autoresizing(flags);
            view.add_tracking_area()?;
        }

        if let Some(parent) = parent {
            view.attach_to(parent)?;
        }
        log::debug!("created view {id:?}");
        Ok(view)
    }

    unsafe fn observe_frame(&self) -> Result<()> {
        let native = self.native.as_ptr();
        call::<(), _>(native, sel!(setPostsFrameChangedNotifications:), (YES,));
        let center: id = class_property("NSNotificationCenter", sel!(defaultCenter))?;
        let name = nsstring(FRAME_DID_CHANGE);
        call::<(), _>(
            center,
            sel!(addObserver:selector:name:object:),
            (native, sel!(frameChanged:), nsstring_ptr(&name), native),
        );
        Ok(())
    }

    unsafe fn add_tracking_area(&mut self) -> Result<()> {
        let native = self.native.as_ptr();
        self.tracking_area = create_object(
            "NSTrackingArea",
            sel!(initWithRect:options:owner:userInfo:),
            (Rect::<f64>::default().to_native(), VIEW_TRACKING_OPTIONS, native, nil),
        )?;
        call::<(), _>(native, sel!(addTrackingArea:), (self.tracking_area.as_ptr(),));
        Ok(())
    }

    fn attach_to(&self, parent: &ViewRef) -> Result<()> {
        let id = self.core.id;
        VIEWS.with(|tree| tree.borrow_mut().attach(id, parent.id))?;
        unsafe {
            call::<(), _>(parent.native_handle(), sel!(addSubview:), (self.native.as_ptr(),));
        }
        parent.deliver(|handler, view| handler.on_did_add_subview(view, id));
        Ok(())
    }

    /// Destroy the view now.
    ///
    /// Fails with [`ToolkitError::HasChildren`] while child views are alive,
    /// handing the view back untouched.
    pub fn try_destroy(mut self) -> std::result::Result<(), (ToolkitError, View)> {
        let removed = VIEWS.with(|tree| tree.borrow_mut().remove(self.core.id));
        match removed {
            Ok(removed) => {
                unsafe { self.release_native(removed.former_parent) };
                Ok(())
            }
            Err(e) => Err((e, self)),
        }
    }

    unsafe fn release_native(&mut self, former_parent: Option<(ViewId, *const ViewRef)>) {
        let id = self.core.id;
        let native = self.native.as_ptr();

        if !self.tracking_area.is_null() {
            call::<(), _>(native, sel!(removeTrackingArea:), (self.tracking_area.as_ptr(),));
            self.tracking_area.reset();
        }
        if !native.is_null() {
            match class_property::<id>("NSNotificationCenter", sel!(defaultCenter)) {
                Ok(center) => call::<(), _>(center, sel!(removeObserver:), (native,)),
                Err(e) => log::error!("view {id:?}: observer not removed: {e}"),
            }
            binding::unbind(&IvarSlot::of(native));
            call::<(), _>(native, sel!(removeFromSuperview), ());
        }

        if let Some(parent) = former_parent.and_then(|(_, parent)| parent.as_ref()) {
            parent.deliver(|handler, view| handler.on_did_remove_subview(view, id));
        }

        self.core.native.set(nil);
        self.native.reset();
        self.torn_down = true;
        log::debug!("destroyed view {id:?}");
    }
}

impl Deref for View {
    type Target = ViewRef;

    fn deref(&self) -> &ViewRef {
        &self.core
    }
}

impl Drop for View {
    fn drop(&mut self) {
        if self.torn_down {
            return;
        }
        let id = self.core.id;
        let removed = VIEWS.with(|tree| tree.borrow_mut().remove(id));
        let former_parent = match removed {
            Ok(removed) => removed.former_parent,
            Err(ToolkitError::HasChildren { count, .. }) => {
                log::error!("view {id:?} dropped with {count} live child view(s)");
                debug_assert!(false, "view dropped while it still has children");
                VIEWS.with(|tree| {
                    let mut tree = tree.borrow_mut();
                    tree.orphan_children(id);
                    tree.remove(id).ok().and_then(|removed| removed.former_parent)
                })
            }
            Err(e) => {
                log::error!("view {id:?}: {e}");
                None
            }
        };
        unsafe { self.release_native(former_parent) };
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.core.fmt(f)
    }
}
