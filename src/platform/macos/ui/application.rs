//! `NSApplication` glue: the application delegate and the run loop.
//!
//! ```text
//!   Application::new ──▶ main queue installed ──▶ delegate bound ──▶ prepare()
//!        │                                                            │
//!        └──▶ run() ──▶ didFinishLaunching ──▶ initialise()     main menu
//!                       didBecomeActive    ──▶ resumed()
//!                       didResignActive    ──▶ suspended()
//!                       willTerminate      ──▶ shutdown(), deferred queue closed
//! ```

use std::cell::RefCell;

use objc2::runtime::{AnyObject, Bool, Sel};
use objc2::sel;

use super::menu::{install_main_menu, perform_menu_action};
use super::main_queue;
use crate::binding;
use crate::deferred;
use crate::error::Result;
use crate::handles::ObjcHandle;
use crate::model::constants::APP_DELEGATE_CLASS_ROOT;
use crate::platform::macos::ffi::bridge::{id, nil, NSApp, YES};
use crate::platform::macos::objc::{
    call, initialize, method1, notification, ClassDescriptor, DynamicClass, IvarSlot,
};
use crate::runtime::encoding;

/// `NSApplicationActivationPolicyRegular`
const ACTIVATION_POLICY_REGULAR: isize = 0;

/// Application lifecycle callbacks.
#[allow(unused_variables)]
pub trait ApplicationHandler: 'static {
    /// Before the run loop starts; the place to create the first windows.
    fn prepare(&mut self) {}
    /// `applicationDidFinishLaunching:`
    fn initialise(&mut self) {}
    fn suspended(&mut self) {}
    fn resumed(&mut self) {}
    /// The application is about to terminate.
    fn shutdown(&mut self) {}

    fn should_terminate(&mut self) -> bool {
        true
    }

    /// Shown in the application menu.
    fn name(&self) -> String {
        std::env::args()
            .next()
            .as_deref()
            .and_then(|path| std::path::Path::new(path).file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "Application".to_string())
    }

    fn version(&self) -> String {
        String::new()
    }
}

pub(crate) struct AppCore {
    handler: RefCell<Box<dyn ApplicationHandler>>,
}

impl AppCore {
    fn deliver<R: Default>(&self, f: impl FnOnce(&mut dyn ApplicationHandler) -> R) -> R {
        match self.handler.try_borrow_mut() {
            Ok(mut handler) => f(&mut **handler),
            Err(_) => {
                log::debug!("application handler busy, nested notification skipped");
                R::default()
            }
        }
    }
}

// ============================================================================
// Native class
// ============================================================================

/// `applicationShouldTerminate:` reply, an `NSApplicationTerminateReply`.
/// Without an owner the application terminates.
#[repr(transparent)]
pub(crate) struct TerminateReply(usize);

const TERMINATE_CANCEL: usize = 0;
const TERMINATE_NOW: usize = 1;

impl Default for TerminateReply {
    fn default() -> Self {
        TerminateReply(TERMINATE_NOW)
    }
}

crate::owner_method!(DidFinishLaunching: AppCore, (id) -> (), |core, _this, _| {
    core.deliver(|handler| handler.initialise())
});

crate::owner_method!(DidBecomeActive: AppCore, (id) -> (), |core, _this, _| {
    core.deliver(|handler| handler.resumed())
});

crate::owner_method!(DidResignActive: AppCore, (id) -> (), |core, _this, _| {
    core.deliver(|handler| handler.suspended())
});

crate::owner_method!(WillTerminate: AppCore, (id) -> (), |core, _this, _| {
    core.deliver(|handler| handler.shutdown());
    let ran = deferred::shutdown();
    log::debug!("application terminating, {ran} deferred message(s) flushed");
});

crate::owner_method!(ShouldTerminate: AppCore, (id) -> TerminateReply, |core, _this, _| {
    let allowed = core.deliver(|handler| handler.should_terminate());
    TerminateReply(if allowed { TERMINATE_NOW } else { TERMINATE_CANCEL })
});

crate::owner_method!(MenuAction: AppCore, (id) -> (), |_core, _this, (sender,)| {
    unsafe { perform_menu_action(sender) };
});

extern "C-unwind" fn terminate_after_last_window(_this: id, _cmd: Sel, _app: id) -> bool {
    true
}

type NotificationMethod = unsafe extern "C-unwind" fn(id, Sel, id);
type ReplyMethod = extern "C-unwind" fn(id, Sel, id) -> bool;

pub(crate) struct AppDelegateClass;

impl ClassDescriptor for AppDelegateClass {
    type Owner = AppCore;
    const ROOT_NAME: &'static str = APP_DELEGATE_CLASS_ROOT;
    const BASE_CLASS: &'static str = "NSObject";

    crate::class_storage!();

    fn install(class: &DynamicClass) -> Result<()> {
        class.add_protocol("NSApplicationDelegate", true)?;

        let on_notification =
            |name: &str, imp: NotificationMethod| class.add_method(name, imp, encoding::NOTIFICATION);
        on_notification("applicationDidFinishLaunching:", notification::<DidFinishLaunching>())?;
        on_notification("applicationDidBecomeActive:", notification::<DidBecomeActive>())?;
        on_notification("applicationDidResignActive:", notification::<DidResignActive>())?;
        on_notification("applicationWillTerminate:", notification::<WillTerminate>())?;
        on_notification("menuAction:", notification::<MenuAction>())?;

        class.add_method(
            "applicationShouldTerminate:",
            method1::<ShouldTerminate, id>(),
            encoding::UINT_WITH_OBJECT,
        )?;
        class.add_method(
            "applicationShouldTerminateAfterLastWindowClosed:",
            terminate_after_last_window as ReplyMethod,
            encoding::BOOL_WITH_OBJECT,
        )
    }
}

// ============================================================================
// Application
// ============================================================================

/// The process-wide application. Create one on the main thread, open
/// windows from [`ApplicationHandler::prepare`], then [`run`](Self::run).
pub struct Application {
    core: Box<AppCore>,
    delegate: ObjcHandle<AnyObject>,
    args: Vec<String>,
}

impl Application {
    pub fn new<H: ApplicationHandler>(handler: H) -> Result<Application> {
        let args: Vec<String> = std::env::args().collect();
        let _ = NSApp();
        main_queue::install()?;

        let instance = AppDelegateClass::create_instance()?;
        let mut app = Application {
            core: Box::new(AppCore {
                handler: RefCell::new(Box::new(handler)),
            }),
            delegate: ObjcHandle::null(),
            args,
        };
        unsafe {
            binding::bind(&IvarSlot::of(instance.as_ptr()), &*app.core);
            app.delegate = initialize(instance.into_raw(), sel!(init), ());
        }

        let name = app.core.deliver(|handler| {
            handler.prepare();
            handler.name()
        });
        unsafe { install_main_menu(&name)? };

        log::info!("application {name:?} ready ({} argument(s))", app.args.len());
        Ok(app)
    }

    /// Enter the main run loop. Returns after the application terminates,
    /// which with AppKit usually means never.
    pub fn run(&self) {
        let app = NSApp();
        unsafe {
            call::<Bool, _>(app, sel!(setActivationPolicy:), (ACTIVATION_POLICY_REGULAR,));
            call::<(), _>(app, sel!(setDelegate:), (self.delegate.as_ptr(),));
            call::<(), _>(app, sel!(activateIgnoringOtherApps:), (YES,));
            call::<(), _>(app, sel!(run), ());
        }
    }

    /// Ask the application to terminate; the handler may refuse.
    pub fn quit(&self) {
        unsafe { call::<(), _>(NSApp(), sel!(terminate:), (nil,)) }
    }

    /// The arguments the process was started with, joined by spaces.
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }

    pub fn command_line_args(&self) -> &[String] {
        &self.args
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        unsafe {
            binding::unbind(&IvarSlot::of(self.delegate.as_ptr()));
            call::<(), _>(NSApp(), sel!(setDelegate:), (nil,));
        }
        if deferred::is_installed() {
            deferred::shutdown();
        }
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("delegate", &self.delegate.as_ptr())
            .field("args", &self.args)
            .finish()
    }
}
