//! Error type shared by the pure core and the macOS backend.
//!
//! Construction failures of foreign resources (fonts, images) are not errors:
//! those values degrade to an invalid state instead. `ToolkitError` covers
//! class registration, hierarchy misuse and the deferred queue lifecycle.

use thiserror::Error;

use crate::hierarchy::ViewId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolkitError {
    /// The runtime refused to allocate a class pair (name clash or bad base class).
    #[error("could not allocate runtime class '{name}' deriving from '{base}'")]
    ClassAllocation { name: String, base: String },

    /// Reserving the owner slot failed; the class is unusable.
    #[error("could not add ivar '{ivar}' to class '{class}'")]
    IvarRegistration { class: String, ivar: String },

    #[error("could not install method '{selector}' on class '{class}'")]
    MethodRegistration { class: String, selector: String },

    #[error("could not add protocol '{protocol}' to class '{class}'")]
    ProtocolRegistration { class: String, protocol: String },

    /// A previous registration step failed, so no instances can be created.
    #[error("runtime class '{0}' is not registered")]
    ClassUnavailable(String),

    #[error("name '{0}' cannot be passed to the runtime")]
    InvalidName(String),

    #[error("view {id:?} still has {count} attached child view(s)")]
    HasChildren { id: ViewId, count: usize },

    #[error("view {0:?} is not known to the hierarchy")]
    UnknownView(ViewId),

    #[error("view {0:?} is already attached to a parent")]
    AlreadyAttached(ViewId),

    #[error("view {child:?} cannot be attached to {parent:?}")]
    InvalidParent { child: ViewId, parent: ViewId },

    #[error("view is not a window")]
    NotAWindow,

    #[error("deferred queue is not installed")]
    QueueClosed,

    #[error("deferred queue is already installed")]
    AlreadyInstalled,
}

pub type Result<T> = std::result::Result<T, ToolkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_children_message_mentions_count() {
        let err = ToolkitError::HasChildren {
            id: ViewId::from_raw(7),
            count: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("2 attached"), "{msg}");
    }

    #[test]
    fn test_errors_compare_by_value() {
        assert_eq!(ToolkitError::QueueClosed, ToolkitError::QueueClosed);
        assert_ne!(ToolkitError::QueueClosed, ToolkitError::AlreadyInstalled);
    }
}
