//! AppKit-facing toolkit types.
//!
//! # Module Structure
//!
//! - `application`: `NSApplication` delegate and run loop
//! - `window`: `NSWindow`/`NSPanel` with a delegate object
//! - `view`: dynamic `NSView` subclass and the view tree
//! - `graphics`: drawing into the current `CGContext`
//! - `image`, `font`: retained `CGImage` and `CTFont` values
//! - `event`: `NSEvent` snapshots
//! - `menu`: the application menu
//! - `main_queue`: wakes the main thread to drain deferred messages

mod application;
mod event;
mod font;
mod graphics;
mod image;
pub mod main_queue;
mod menu;
mod view;
mod window;

pub use application::{Application, ApplicationHandler};
pub use font::Font;
pub use graphics::{GraphicContext, LineCap, LineJoin};
pub use image::Image;
pub use menu::MenuCommand;
pub use view::{NoHandler, View, ViewHandler, ViewRef};
pub use window::{NoDelegate, Window, WindowDelegate, WindowProxy};
