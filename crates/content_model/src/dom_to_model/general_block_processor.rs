// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::container_processor::container_processor;
use super::context::DomToModelContext;
use crate::format_handlers::{parse_format, DirectionFormatHandler};
use crate::markup::NodeId;
use crate::model::{BlockGroup, OpaqueElement};
use crate::model_api::common::add_block;
use crate::model_api::creators::create_general_block;

/// Wrap a block element in a general block and convert its children into
/// it. The element's direction applies to everything inside it.
pub(crate) fn general_block_processor(
    group: &mut dyn BlockGroup,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let element = match OpaqueElement::from_markup(context.tree, node) {
        Ok(element) => element,
        Err(e) => {
            tracing::debug!(
                target: "content_model::dom_to_model",
                error = %e,
                "skipping block that is not an element"
            );
            return;
        }
    };
    let mut block = create_general_block(element);

    let format = parse_format(&[&DirectionFormatHandler], node, context);
    context.block_format_stack.push(format);
    container_processor(&mut block, node, context);
    context.block_format_stack.pop();

    add_block(group, block);
}
