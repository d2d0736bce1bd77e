//! Parent/child bookkeeping for views.
//!
//! Each view is a node in a [`ViewTree`]. A parent keeps its children as an
//! ordered list of non-owning ids; the views themselves are owned elsewhere.
//! A view moves through `Unattached → Attached → Detaching → Destroyed`, and
//! cannot be removed while it still has children: ownership of those children
//! is external, so they are never destroyed implicitly.

use std::collections::HashMap;

use crate::error::{Result, ToolkitError};

/// Identifier of a view within its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(u64);

impl ViewId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Unattached,
    Attached,
    Detaching,
    Destroyed,
}

#[derive(Debug)]
struct Node<T> {
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    state: ViewState,
    payload: T,
}

/// What [`ViewTree::remove`] hands back.
#[derive(Debug)]
pub struct Removed<T> {
    pub payload: T,
    /// The parent the view was detached from, to notify of the removal.
    pub former_parent: Option<(ViewId, T)>,
}

#[derive(Debug)]
pub struct ViewTree<T> {
    nodes: HashMap<ViewId, Node<T>>,
    next_id: u64,
}

impl<T: Clone> ViewTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 1,
        }
    }

    /// Add an unattached view.
    pub fn insert(&mut self, payload: T) -> ViewId {
        let id = ViewId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                parent: None,
                children: Vec::new(),
                state: ViewState::Unattached,
                payload,
            },
        );
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// `None` for ids this tree never issued.
    pub fn state(&self, id: ViewId) -> Option<ViewState> {
        match self.nodes.get(&id) {
            Some(node) => Some(node.state),
            None if id.0 > 0 && id.0 < self.next_id => Some(ViewState::Destroyed),
            None => None,
        }
    }

    pub fn payload(&self, id: ViewId) -> Option<&T> {
        self.nodes.get(&id).map(|n| &n.payload)
    }

    pub fn payload_mut(&mut self, id: ViewId) -> Option<&mut T> {
        self.nodes.get_mut(&id).map(|n| &mut n.payload)
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.nodes.get(&id).map_or(&[], |n| n.children.as_slice())
    }

    fn is_ancestor(&self, ancestor: ViewId, mut id: ViewId) -> bool {
        while let Some(parent) = self.parent(id) {
            if parent == ancestor {
                return true;
            }
            id = parent;
        }
        false
    }

    /// Append `child` to `parent`'s children.
    pub fn attach(&mut self, child: ViewId, parent: ViewId) -> Result<()> {
        let child_state = self.state(child).ok_or(ToolkitError::UnknownView(child))?;
        if !self.contains(parent) {
            return Err(ToolkitError::UnknownView(parent));
        }
        match child_state {
            ViewState::Unattached => {}
            ViewState::Attached => return Err(ToolkitError::AlreadyAttached(child)),
            _ => return Err(ToolkitError::UnknownView(child)),
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(ToolkitError::InvalidParent { child, parent });
        }

        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
            node.state = ViewState::Attached;
        }
        Ok(())
    }

    /// Remove `child` from its parent's list. Returns the former parent.
    pub fn detach(&mut self, child: ViewId) -> Result<Option<(ViewId, T)>> {
        let node = self
            .nodes
            .get_mut(&child)
            .ok_or(ToolkitError::UnknownView(child))?;
        let Some(parent) = node.parent.take() else {
            return Ok(None);
        };
        if node.state == ViewState::Attached {
            node.state = ViewState::Unattached;
        }

        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(ToolkitError::UnknownView(parent))?;
        match parent_node.children.iter().position(|&c| c == child) {
            Some(index) => {
                parent_node.children.remove(index);
            }
            None => log::error!("view {child:?} missing from the child list of {parent:?}"),
        }
        Ok(Some((parent, parent_node.payload.clone())))
    }

    /// Detach and forget `id`.
    ///
    /// Fails with `HasChildren` (leaving the node untouched) while any child
    /// is still attached.
    pub fn remove(&mut self, id: ViewId) -> Result<Removed<T>> {
        let node = self.nodes.get_mut(&id).ok_or(ToolkitError::UnknownView(id))?;
        if !node.children.is_empty() {
            return Err(ToolkitError::HasChildren {
                id,
                count: node.children.len(),
            });
        }
        node.state = ViewState::Detaching;

        let former_parent = self.detach(id)?;
        let node = self.nodes.remove(&id).ok_or(ToolkitError::UnknownView(id))?;
        Ok(Removed {
            payload: node.payload,
            former_parent,
        })
    }

    /// Cut every child of `id` loose. Returns the orphaned ids.
    pub fn orphan_children(&mut self, id: ViewId) -> Vec<ViewId> {
        let children = match self.nodes.get_mut(&id) {
            Some(node) => std::mem::take(&mut node.children),
            None => return Vec::new(),
        };
        for child in &children {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = None;
                node.state = ViewState::Unattached;
            }
        }
        children
    }
}

impl<T: Clone> Default for ViewTree<T> {
    fn default() -> Self {
        Self::new()
    }
}
