// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::markup::{MarkupElement, MarkupNode, MarkupTree, NodeId};

/// How the converter treats a node, decided once per node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodeClass {
    Block,
    Inline,
    Text,
    Fragment,
    /// Comments and anything else that carries no content.
    Skipped,
}

const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "dd",
    "details",
    "dialog",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "ul",
];

pub(crate) fn classify(tree: &MarkupTree, node: NodeId) -> NodeClass {
    match tree.get(node) {
        Some(MarkupNode::Text(_)) => NodeClass::Text,
        Some(MarkupNode::Fragment(_)) => NodeClass::Fragment,
        Some(MarkupNode::Element(element)) => {
            if is_block_element(element) {
                NodeClass::Block
            } else {
                NodeClass::Inline
            }
        }
        Some(MarkupNode::Comment(_)) | None => NodeClass::Skipped,
    }
}

/// Block-ness from the tag, unless an inline `display` style overrides it.
fn is_block_element(element: &MarkupElement) -> bool {
    if let Some(display) = element.style("display") {
        let display = display.trim().to_ascii_lowercase();
        if display.starts_with("inline") || display == "contents" {
            return false;
        }
        if matches!(
            display.as_str(),
            "block" | "flex" | "grid" | "list-item" | "table" | "flow-root"
        ) {
            return true;
        }
    }
    BLOCK_TAGS.contains(&element.tag())
}

/// Whether any direct child of `node` is a block.
pub(crate) fn has_block_children(tree: &MarkupTree, node: NodeId) -> bool {
    tree.children(node)
        .iter()
        .any(|child| classify(tree, *child) == NodeClass::Block)
}
