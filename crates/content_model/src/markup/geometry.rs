// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Live layout information supplied by the editor host.
//!
//! Geometry is the only input to conversion that is not pure structure.
//! Detached or hidden nodes have no layout, so every read may come back
//! empty.

use std::collections::HashMap;

use strum_macros::{AsRefStr, Display, EnumString};

use super::{MarkupTree, NodeId};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, AsRefStr, Display, EnumString,
)]
#[strum(serialize_all = "kebab-case")]
pub enum BoxSizing {
    #[default]
    ContentBox,
    BorderBox,
}

/// Bounding box of a node as laid out by the host, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeGeometry {
    pub width: f64,
    pub height: f64,
    pub box_sizing: BoxSizing,
}

impl NodeGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            box_sizing: BoxSizing::ContentBox,
        }
    }

    pub fn with_box_sizing(mut self, box_sizing: BoxSizing) -> Self {
        self.box_sizing = box_sizing;
        self
    }
}

/// Measures nodes on behalf of the size format handler.
pub trait GeometryProvider {
    /// Returns `None` when the node has no layout.
    fn measure(&self, tree: &MarkupTree, node: NodeId) -> Option<NodeGeometry>;
}

/// Unit type implementation - nothing is ever laid out.
impl GeometryProvider for () {
    fn measure(&self, _tree: &MarkupTree, _node: NodeId) -> Option<NodeGeometry> {
        None
    }
}

impl<T: GeometryProvider> GeometryProvider for &T {
    fn measure(&self, tree: &MarkupTree, node: NodeId) -> Option<NodeGeometry> {
        (*self).measure(tree, node)
    }
}

/// Geometry recorded ahead of time, e.g. from a layout snapshot.
#[derive(Clone, Debug, Default)]
pub struct FixedGeometry {
    entries: HashMap<NodeId, NodeGeometry>,
}

impl FixedGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, node: NodeId, geometry: NodeGeometry) -> Self {
        self.insert(node, geometry);
        self
    }

    pub fn insert(&mut self, node: NodeId, geometry: NodeGeometry) {
        self.entries.insert(node, geometry);
    }
}

impl GeometryProvider for FixedGeometry {
    fn measure(&self, _tree: &MarkupTree, node: NodeId) -> Option<NodeGeometry> {
        self.entries.get(&node).copied()
    }
}
