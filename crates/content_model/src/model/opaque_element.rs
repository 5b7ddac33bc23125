// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Serialize, Serializer};

use crate::error::ContentModelError;
use crate::markup::to_html::shallow_outer_html;
use crate::markup::{MarkupTree, NodeId};

/// An element the model does not understand structurally, kept as a
/// detached copy of its tag and attributes so it can be written back
/// unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpaqueElement {
    tag: String,
    attrs: Vec<(String, String)>,
}

impl OpaqueElement {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    pub fn with_attrs(tag: &str, attrs: Vec<(String, String)>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs,
        }
    }

    /// Copy the tag and attributes of the element `node`.
    pub fn from_markup(
        tree: &MarkupTree,
        node: NodeId,
    ) -> Result<Self, ContentModelError> {
        let element = tree
            .element(node)
            .ok_or(ContentModelError::UnknownNode(node))?;
        Ok(Self {
            tag: element.tag().to_owned(),
            attrs: element.attrs().to_vec(),
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Create a new detached element in `tree` with this tag and attributes.
    pub fn to_markup(&self, tree: &mut MarkupTree) -> NodeId {
        tree.create_element_with_attrs(&self.tag, self.attrs.clone())
    }

    pub fn outer_html(&self) -> String {
        shallow_outer_html(&self.tag, &self.attrs)
    }

    /// Short summary used by diagnostics in place of a full subtree dump.
    pub fn summary(&self) -> String {
        format!("Element<{}>: {}", self.tag, self.outer_html())
    }
}

impl Serialize for OpaqueElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.summary())
    }
}
