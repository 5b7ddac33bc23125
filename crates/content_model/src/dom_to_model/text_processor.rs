// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::context::DomToModelContext;
use crate::markup::NodeId;
use crate::model::{BlockGroup, ContentModelBlock, ContentModelSegment};
use crate::model_api::common::{add_segment, add_selection_marker};
use crate::model_api::creators::create_text;

/// Append the content of the text node `node` to `group`, splitting it where
/// selection boundaries fall inside it.
pub(crate) fn text_processor(
    group: &mut dyn BlockGroup,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let tree = context.tree;
    let Some(text) = tree.text(node) else {
        return;
    };

    let (start, end, is_collapsed) = match &context.regular_selection {
        Some(selection) => (
            (selection.start.container == node).then_some(selection.start.offset),
            (selection.end.container == node).then_some(selection.end.offset),
            selection.is_collapsed,
        ),
        None => (None, None, false),
    };

    let mut position = 0;
    if let Some(start) = start {
        add_text(group, utf16_slice(text, position, start), context);
        position = start;
        if is_collapsed {
            add_selection_marker(group);
            context.is_in_selection = false;
        } else {
            context.is_in_selection = true;
        }
    }
    if let Some(end) = end.filter(|_| !is_collapsed) {
        add_text(group, utf16_slice(text, position, end), context);
        position = end;
        context.is_in_selection = false;
    }
    add_text(group, utf16_slice(text, position, usize::MAX), context);
}

/// Add a run of text, extending the previous text segment when it has the
/// same selection state. Empty runs add nothing.
fn add_text(group: &mut dyn BlockGroup, text: &str, context: &DomToModelContext) {
    if text.is_empty() {
        return;
    }
    let is_selected = context.is_in_selection;

    if let Some(ContentModelBlock::Paragraph(paragraph)) =
        group.blocks_mut().last_mut()
    {
        if let Some(ContentModelSegment::Text(last)) =
            paragraph.segments.last_mut()
        {
            if last.is_selected.unwrap_or(false) == is_selected {
                last.text.push_str(text);
                return;
            }
        }
    }

    let mut segment = create_text(text);
    if is_selected {
        segment.is_selected = Some(true);
    }
    add_segment(group, segment);
}

/// The part of `text` between two UTF-16 offsets. Offsets past the end are
/// clamped; an offset inside a surrogate pair rounds down.
fn utf16_slice(text: &str, from: usize, to: usize) -> &str {
    let start = utf16_to_byte_index(text, from);
    let end = utf16_to_byte_index(text, to).max(start);
    &text[start..end]
}

fn utf16_to_byte_index(text: &str, offset: usize) -> usize {
    let mut units = 0;
    for (index, c) in text.char_indices() {
        if units + c.len_utf16() > offset {
            return index;
        }
        units += c.len_utf16();
    }
    text.len()
}
