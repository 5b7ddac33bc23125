// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::context::ModelToDomContext;
use super::segment_renderer::render_segments;
use super::table_renderer::render_table;
use crate::error::ContentModelError;
use crate::format_handlers::element_direction;
use crate::markup::NodeId;
use crate::model::{
    BlockGroup, ContentModelBlock, ContentModelBlockGroup, FormatKey,
    FormatRecord,
};

pub(crate) fn render_blocks(
    blocks: &[ContentModelBlock],
    parent: NodeId,
    context: &mut ModelToDomContext,
) -> Result<(), ContentModelError> {
    for block in blocks {
        render_block(block, parent, context)?;
    }
    Ok(())
}

fn render_block(
    block: &ContentModelBlock,
    parent: NodeId,
    context: &mut ModelToDomContext,
) -> Result<(), ContentModelError> {
    match block {
        ContentModelBlock::Paragraph(paragraph) => {
            if paragraph.is_implicit() {
                render_segments(&paragraph.segments, parent, context)
            } else {
                let div = context.tree_mut().create_element("div");
                context.tree_mut().append_child(parent, div)?;
                render_segments(&paragraph.segments, div, context)
            }
        }
        ContentModelBlock::Table(table) => render_table(table, parent, context),
        ContentModelBlock::BlockGroup(ContentModelBlockGroup::General(
            general,
        )) => {
            let node = general.element.to_markup(context.tree_mut());
            context.tree_mut().append_child(parent, node)?;
            let format = direction_of(context, node);
            context.push_block_format(&format);
            let result = render_blocks(&general.blocks, node, context);
            context.pop_block_format();
            result
        }
        ContentModelBlock::BlockGroup(group) => {
            // Documents and cells only appear nested through their
            // containers. Their blocks are rendered in place.
            render_blocks(group.blocks(), parent, context)
        }
    }
}

/// Direction declared on a rendered block element.
fn direction_of(context: &ModelToDomContext, node: NodeId) -> FormatRecord {
    let mut format = FormatRecord::new();
    if let Some(direction) = context.tree().element(node).and_then(element_direction)
    {
        format.set(FormatKey::Direction, direction);
    }
    format
}
