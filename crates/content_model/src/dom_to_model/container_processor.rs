// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::classify::{classify, NodeClass};
use super::context::DomToModelContext;
use super::general_block_processor::general_block_processor;
use super::general_segment_processor::general_segment_processor;
use super::table_processor::table_processor;
use super::text_processor::text_processor;
use crate::markup::NodeId;
use crate::model::BlockGroup;
use crate::model_api::common::{add_segment, add_selection_marker};
use crate::model_api::creators::create_br;
use crate::selection::BoundaryPoint;

/// Convert the children of `parent` into `group`, toggling the selection
/// state as the walk crosses the selection boundaries between children.
pub(crate) fn container_processor(
    group: &mut dyn BlockGroup,
    parent: NodeId,
    context: &mut DomToModelContext,
) {
    let tree = context.tree;
    let children = tree.children(parent);
    for (index, child) in children.iter().enumerate() {
        handle_boundary(group, parent, index, context);
        process_node(group, *child, context);
    }
    handle_boundary(group, parent, children.len(), context);

    let continues = context
        .regular_selection
        .as_ref()
        .is_some_and(|selection| selection.continues_after(tree, parent));
    if !continues {
        context.is_in_selection = false;
    }
}

fn handle_boundary(
    group: &mut dyn BlockGroup,
    parent: NodeId,
    index: usize,
    context: &mut DomToModelContext,
) {
    let Some(selection) = &context.regular_selection else {
        return;
    };
    let point = BoundaryPoint::new(parent, index);
    let is_start = selection.start == point;
    let is_end = selection.end == point;
    let is_collapsed = selection.is_collapsed;

    if is_start {
        context.is_in_selection = true;
        if is_collapsed {
            add_selection_marker(group);
        }
    }
    if is_end {
        context.is_in_selection = false;
    }
}

/// Dispatch one node to the processor for its class.
pub(crate) fn process_node(
    group: &mut dyn BlockGroup,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let tree = context.tree;
    let class = classify(tree, node);
    tracing::trace!(
        target: "content_model::dom_to_model",
        node = ?node,
        class = ?class,
        "processing node"
    );
    let tag = tree.element(node).map(|e| e.tag());
    match class {
        NodeClass::Text => text_processor(group, node, context),
        NodeClass::Fragment => container_processor(group, node, context),
        NodeClass::Block if tag == Some("table") => {
            table_processor(group, node, context)
        }
        NodeClass::Block => general_block_processor(group, node, context),
        NodeClass::Inline if tag == Some("br") => {
            let mut br = create_br();
            if context.is_in_selection {
                br.is_selected = Some(true);
            }
            add_segment(group, br);
        }
        NodeClass::Inline => general_segment_processor(group, node, context),
        NodeClass::Skipped => {}
    }
}
