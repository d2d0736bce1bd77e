//! Tests for the view tree: attach, detach and removal rules.

use nano_ui::hierarchy::ViewState;
use nano_ui::{ToolkitError, ViewId, ViewTree};

fn tree_with_parent_and_children(n: usize) -> (ViewTree<&'static str>, ViewId, Vec<ViewId>) {
    let mut tree = ViewTree::new();
    let parent = tree.insert("parent");
    let children = (0..n)
        .map(|_| {
            let child = tree.insert("child");
            tree.attach(child, parent).unwrap();
            child
        })
        .collect();
    (tree, parent, children)
}

// === Attach Tests ===

#[test]
fn ids_are_unique() {
    let mut tree = ViewTree::new();
    let a = tree.insert(());
    let b = tree.insert(());
    assert_ne!(a, b);
    assert_eq!(tree.len(), 2);
}

#[test]
fn attach_sets_parent() {
    let (tree, parent, children) = tree_with_parent_and_children(1);
    assert_eq!(tree.parent(children[0]), Some(parent));
    assert_eq!(tree.state(children[0]), Some(ViewState::Attached));
    assert_eq!(tree.state(parent), Some(ViewState::Unattached));
}

#[test]
fn attach_to_unknown_parent_fails() {
    let mut tree = ViewTree::new();
    let child = tree.insert(());
    let ghost = ViewId::from_raw(1000);
    assert_eq!(tree.attach(child, ghost), Err(ToolkitError::UnknownView(ghost)));
    assert_eq!(tree.state(child), Some(ViewState::Unattached));
}

#[test]
fn grandchild_cannot_adopt_grandparent() {
    let mut tree = ViewTree::new();
    let root = tree.insert(());
    let mid = tree.insert(());
    let leaf = tree.insert(());
    tree.attach(mid, root).unwrap();
    tree.attach(leaf, mid).unwrap();
    assert_eq!(
        tree.attach(root, leaf),
        Err(ToolkitError::InvalidParent { child: root, parent: leaf })
    );
}

// === Detach Tests ===

#[test]
fn detach_returns_former_parent_payload() {
    let (mut tree, parent, children) = tree_with_parent_and_children(2);
    let former = tree.detach(children[0]).unwrap();
    assert_eq!(former, Some((parent, "parent")));
    assert_eq!(tree.children(parent), &[children[1]]);
    assert_eq!(tree.state(children[0]), Some(ViewState::Unattached));
}

#[test]
fn detach_of_root_is_noop() {
    let mut tree = ViewTree::new();
    let root = tree.insert(());
    assert_eq!(tree.detach(root), Ok(None));
}

#[test]
fn detached_view_can_be_reattached() {
    let (mut tree, parent, children) = tree_with_parent_and_children(2);
    tree.detach(children[0]).unwrap();
    tree.attach(children[0], parent).unwrap();
    assert_eq!(tree.children(parent), &[children[1], children[0]]);
}

// === Remove Tests ===

#[test]
fn remove_with_children_fails_and_keeps_tree() {
    let (mut tree, parent, children) = tree_with_parent_and_children(3);
    let err = tree.remove(parent).unwrap_err();
    assert_eq!(err, ToolkitError::HasChildren { id: parent, count: 3 });
    assert_eq!(tree.children(parent), children.as_slice());
    assert!(tree.contains(parent));
}

#[test]
fn removing_children_first_allows_parent_removal() {
    let (mut tree, parent, children) = tree_with_parent_and_children(2);
    for child in children {
        let removed = tree.remove(child).unwrap();
        assert_eq!(removed.former_parent.map(|(id, _)| id), Some(parent));
    }
    let removed = tree.remove(parent).unwrap();
    assert_eq!(removed.payload, "parent");
    assert!(removed.former_parent.is_none());
    assert!(tree.is_empty());
}

#[test]
fn removed_view_reads_as_destroyed() {
    let mut tree = ViewTree::new();
    let id = tree.insert(5);
    tree.remove(id).unwrap();
    assert_eq!(tree.state(id), Some(ViewState::Destroyed));
    assert_eq!(tree.remove(id).unwrap_err(), ToolkitError::UnknownView(id));
}

#[test]
fn orphaned_children_survive_parent_removal() {
    let (mut tree, parent, children) = tree_with_parent_and_children(2);
    tree.orphan_children(parent);
    tree.remove(parent).unwrap();
    for child in children {
        assert!(tree.contains(child));
        assert_eq!(tree.parent(child), None);
    }
}

#[test]
fn payload_mut_updates_in_place() {
    let mut tree = ViewTree::new();
    let id = tree.insert(0usize);
    *tree.payload_mut(id).unwrap() = 7;
    assert_eq!(tree.payload(id), Some(&7));
}
