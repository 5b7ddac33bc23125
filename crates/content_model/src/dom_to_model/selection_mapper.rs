// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Locating selection boundaries relative to the nodes being converted.
//!
//! Every boundary is turned into a key: the child indexes leading from the
//! top of the tree to its container, followed by its offset. Comparing keys
//! lexicographically orders boundaries and nodes in document order.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::Rc;

use crate::markup::to_html::is_void_element;
use crate::markup::{MarkupNode, MarkupTree, NodeId};
use crate::selection::{BoundaryPoint, RangeSelection};

/// Where a boundary lies relative to a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Position {
    /// At or before the point just in front of the node.
    Before,
    Inside,
    After,
}

/// A range selection after normalization: both boundaries exist in the
/// tree, offsets are within bounds and `start` is not after `end`.
#[derive(Clone, Debug)]
pub(crate) struct SelectionBoundaries {
    pub(crate) start: BoundaryPoint,
    pub(crate) end: BoundaryPoint,
    pub(crate) is_collapsed: bool,
    top: NodeId,
    start_key: Vec<usize>,
    end_key: Vec<usize>,
    paths: PathCache,
}

impl SelectionBoundaries {
    /// Returns `None` when the range cannot be located in `tree`.
    pub(crate) fn new(tree: &MarkupTree, range: &RangeSelection) -> Option<Self> {
        let (start_top, start_key, start) = boundary_key(tree, range.start)?;
        let (end_top, end_key, end) = boundary_key(tree, range.end)?;
        if start_top != end_top {
            tracing::debug!(
                target: "content_model::dom_to_model",
                start = ?range.start.container,
                end = ?range.end.container,
                "selection boundaries are in unrelated trees, ignoring selection"
            );
            return None;
        }

        let (start, end, start_key, end_key) =
            if end_key.cmp(&start_key) == Ordering::Less {
                tracing::debug!(
                    target: "content_model::dom_to_model",
                    "selection end is before its start, swapping boundaries"
                );
                (end, start, end_key, start_key)
            } else {
                (start, end, start_key, end_key)
            };

        Some(Self {
            start,
            end,
            is_collapsed: start == end,
            top: start_top,
            start_key,
            end_key,
            paths: PathCache::default(),
        })
    }

    /// Whether `node` is in the same tree as the selection.
    pub(crate) fn is_in_tree_of(&self, tree: &MarkupTree, node: NodeId) -> bool {
        tree.path(node).is_some_and(|(top, _)| top == self.top)
    }

    pub(crate) fn start_position(&self, tree: &MarkupTree, node: NodeId) -> Position {
        self.position_of(&self.start_key, tree, node)
    }

    pub(crate) fn end_position(&self, tree: &MarkupTree, node: NodeId) -> Position {
        self.position_of(&self.end_key, tree, node)
    }

    fn position_of(&self, key: &[usize], tree: &MarkupTree, node: NodeId) -> Position {
        let Some(path) = self.paths.path(tree, node) else {
            return Position::After;
        };
        if key.len() > path.len() && key.starts_with(&path) {
            Position::Inside
        } else if key <= &path[..] {
            Position::Before
        } else {
            Position::After
        }
    }

    /// Whether the point just in front of `node` is inside the selection.
    pub(crate) fn covers_entry(&self, tree: &MarkupTree, node: NodeId) -> bool {
        !self.is_collapsed
            && self.start_position(tree, node) == Position::Before
            && self.end_position(tree, node) != Position::Before
    }

    /// Whether the selection is still open once the walk has left `node`.
    pub(crate) fn continues_after(&self, tree: &MarkupTree, node: NodeId) -> bool {
        !self.is_collapsed && self.end_position(tree, node) == Position::After
    }
}

/// Normalize `point` and build its key. Boundaries on nodes the converter
/// never walks into (void elements, comments) move to the point in front of
/// that node in its parent.
fn boundary_key(
    tree: &MarkupTree,
    point: BoundaryPoint,
) -> Option<(NodeId, Vec<usize>, BoundaryPoint)> {
    let Some(node) = tree.get(point.container) else {
        tracing::debug!(
            target: "content_model::dom_to_model",
            container = ?point.container,
            "selection container is not part of the tree, ignoring selection"
        );
        return None;
    };

    let walked = match node {
        MarkupNode::Element(element) => !is_void_element(element.tag()),
        MarkupNode::Comment(_) => false,
        MarkupNode::Text(_) | MarkupNode::Fragment(_) => true,
    };
    let point = if walked {
        BoundaryPoint::new(
            point.container,
            point.offset.min(tree.node_length(point.container)),
        )
    } else {
        let parent = tree.parent(point.container)?;
        BoundaryPoint::new(parent, tree.index_in_parent(point.container)?)
    };

    let (top, mut key) = tree.path(point.container)?;
    key.push(point.offset);
    Some((top, key, point))
}

/// Node paths computed during one conversion. The first lookup below a
/// parent records the paths of all its children, so a walk over the tree
/// scans every sibling list once.
#[derive(Clone, Debug, Default)]
struct PathCache {
    paths: RefCell<HashMap<NodeId, Rc<[usize]>>>,
}

impl PathCache {
    fn path(&self, tree: &MarkupTree, node: NodeId) -> Option<Rc<[usize]>> {
        if let Some(path) = self.paths.borrow().get(&node) {
            return Some(Rc::clone(path));
        }

        let Some(parent) = tree.parent(node) else {
            if !tree.contains(node) {
                return None;
            }
            let path: Rc<[usize]> = Rc::from(Vec::new());
            self.paths.borrow_mut().insert(node, Rc::clone(&path));
            return Some(path);
        };

        let parent_path = self.path(tree, parent)?;
        let mut paths = self.paths.borrow_mut();
        for (index, child) in tree.children(parent).iter().enumerate() {
            let path: Rc<[usize]> =
                parent_path.iter().copied().chain([index]).collect();
            paths.insert(*child, path);
        }
        paths.get(&node).cloned()
    }
}
