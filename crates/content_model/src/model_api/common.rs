// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::model::{BlockGroup, ContentModelBlock, ContentModelSegment};
use crate::model_api::creators::{create_paragraph, create_selection_marker};

pub fn add_block<G: BlockGroup + ?Sized>(
    group: &mut G,
    block: impl Into<ContentModelBlock>,
) {
    group.blocks_mut().push(block.into());
}

/// Append `segment` to the paragraph that ends `group`, opening an implicit
/// paragraph first when the last block is not a paragraph.
pub fn add_segment<G: BlockGroup + ?Sized>(
    group: &mut G,
    segment: impl Into<ContentModelSegment>,
) {
    let blocks = group.blocks_mut();
    if !matches!(blocks.last(), Some(ContentModelBlock::Paragraph(_))) {
        blocks.push(create_paragraph(true).into());
    }
    if let Some(ContentModelBlock::Paragraph(paragraph)) = blocks.last_mut() {
        paragraph.segments.push(segment.into());
    }
}

pub fn add_selection_marker<G: BlockGroup + ?Sized>(group: &mut G) {
    add_segment(group, create_selection_marker());
}
