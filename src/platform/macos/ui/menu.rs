//! Application main menu and the shared `menuAction:` handling.

use objc2::runtime::{AnyObject, Sel};
use objc2::sel;

use crate::error::Result;
use crate::handles::ObjcHandle;
use crate::model::constants::{MENU_TAG_ABOUT, MENU_TAG_QUIT};
use crate::platform::macos::ffi::bridge::{id, nil, nsstring, nsstring_ptr, NSApp};
use crate::platform::macos::objc::{call, class_property, create_object};

/// What a menu item asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Quit,
    About,
    Other(isize),
}

impl MenuCommand {
    pub fn from_tag(tag: isize) -> Self {
        match tag {
            MENU_TAG_QUIT => MenuCommand::Quit,
            MENU_TAG_ABOUT => MenuCommand::About,
            other => MenuCommand::Other(other),
        }
    }
}

/// Handle the built-in commands of `sender` (an `NSMenuItem`).
///
/// # Safety
///
/// `sender` must be `nil` or a live object answering `tag`.
pub(crate) unsafe fn perform_menu_action(sender: id) -> MenuCommand {
    let tag: isize = call(sender, sel!(tag), ());
    let command = MenuCommand::from_tag(tag);
    match command {
        MenuCommand::Quit => {
            log::debug!("quit requested from the menu");
            let _: () = call(NSApp(), sel!(terminate:), (nil,));
        }
        MenuCommand::About => {
            let _: () = call(NSApp(), sel!(orderFrontStandardAboutPanel:), (nil,));
        }
        MenuCommand::Other(_) => {}
    }
    command
}

unsafe fn menu_item(title: &str, key: &str, tag: isize) -> Result<ObjcHandle<AnyObject>> {
    let title = nsstring(title);
    let key = nsstring(key);
    let action: Sel = sel!(menuAction:);
    let item = create_object(
        "NSMenuItem",
        sel!(initWithTitle:action:keyEquivalent:),
        (nsstring_ptr(&title), action, nsstring_ptr(&key)),
    )?;
    let _: () = call(item.as_ptr(), sel!(setTag:), (tag,));
    Ok(item)
}

/// Install "About <name>" and "Quit <name> (⌘Q)" as the application menu.
///
/// Items target the responder chain, which ends at the application
/// delegate, so both commands work without any window open.
///
/// # Safety
///
/// Main thread only, after `NSApplication` exists.
pub(crate) unsafe fn install_main_menu(app_name: &str) -> Result<()> {
    let empty = nsstring("");
    let menubar = create_object("NSMenu", sel!(initWithTitle:), (nsstring_ptr(&empty),))?;
    let app_item = create_object("NSMenuItem", sel!(init), ())?;
    let _: () = call(menubar.as_ptr(), sel!(addItem:), (app_item.as_ptr(),));

    let title = nsstring(app_name);
    let app_menu = create_object("NSMenu", sel!(initWithTitle:), (nsstring_ptr(&title),))?;

    let about = menu_item(&format!("About {app_name}"), "", MENU_TAG_ABOUT)?;
    let _: () = call(app_menu.as_ptr(), sel!(addItem:), (about.as_ptr(),));

    let separator: id = class_property("NSMenuItem", sel!(separatorItem))?;
    let _: () = call(app_menu.as_ptr(), sel!(addItem:), (separator,));

    let quit = menu_item(&format!("Quit {app_name}"), "q", MENU_TAG_QUIT)?;
    let _: () = call(app_menu.as_ptr(), sel!(addItem:), (quit.as_ptr(),));

    let _: () = call(app_item.as_ptr(), sel!(setSubmenu:), (app_menu.as_ptr(),));
    let _: () = call(NSApp(), sel!(setMainMenu:), (menubar.as_ptr(),));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_tags_map_to_commands() {
        assert_eq!(MenuCommand::from_tag(MENU_TAG_QUIT), MenuCommand::Quit);
        assert_eq!(MenuCommand::from_tag(MENU_TAG_ABOUT), MenuCommand::About);
        assert_eq!(MenuCommand::from_tag(5), MenuCommand::Other(5));
    }
}
