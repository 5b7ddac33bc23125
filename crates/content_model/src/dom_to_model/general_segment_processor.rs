// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::classify::has_block_children;
use super::container_processor::container_processor;
use super::context::DomToModelContext;
use super::general_block_processor::general_block_processor;
use super::selection_mapper::Position;
use crate::markup::NodeId;
use crate::model::{BlockGroup, OpaqueElement};
use crate::model_api::common::add_segment;
use crate::model_api::creators::create_general_segment;

/// Pass an inline element through as a general segment. An inline element
/// holding blocks cannot live inside a paragraph and becomes a general block
/// instead.
pub(crate) fn general_segment_processor(
    group: &mut dyn BlockGroup,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    if has_block_children(context.tree, node) {
        general_block_processor(group, node, context);
        return;
    }

    let Ok(element) = OpaqueElement::from_markup(context.tree, node) else {
        return;
    };
    let mut segment = create_general_segment(element);
    // Selected only when the range covers the element from entry to exit.
    let ends_inside = context.regular_selection.as_ref().is_some_and(|s| {
        s.end_position(context.tree, node) == Position::Inside
    });
    if context.is_in_selection && !ends_inside {
        segment.is_selected = Some(true);
    }
    container_processor(&mut segment, node, context);
    add_segment(group, segment);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dom_to_model::selection_mapper::SelectionBoundaries;
    use crate::dom_to_model::ConversionOptions;
    use crate::markup::MarkupTree;
    use crate::model::{
        BlockType, ContentModelDocument, ContentModelSegment, SegmentType,
    };
    use crate::selection::{BoundaryPoint, RangeSelection};

    #[test]
    fn inline_element_becomes_a_general_segment() {
        let mut tree = MarkupTree::new();
        let b = tree.create_element("b");
        let text = tree.create_text("bold");
        tree.append_child(b, text).unwrap();

        let mut doc = ContentModelDocument::default();
        let mut context =
            DomToModelContext::new(&tree, ConversionOptions::default());
        general_segment_processor(&mut doc, b, &mut context);

        let paragraph = doc.blocks[0].as_paragraph().unwrap();
        assert!(paragraph.is_implicit());
        let ContentModelSegment::General(general) = &paragraph.segments[0]
        else {
            panic!("expected a general segment");
        };
        assert_eq!(general.element.tag(), "b");
        assert_eq!(general.blocks[0].block_type(), BlockType::Paragraph);
    }

    #[test]
    fn segment_created_inside_selection_is_selected() {
        let mut tree = MarkupTree::new();
        let img = tree.create_element("img");
        let mut doc = ContentModelDocument::default();
        let mut context =
            DomToModelContext::new(&tree, ConversionOptions::default());
        context.is_in_selection = true;

        general_segment_processor(&mut doc, img, &mut context);

        let segment = &doc.blocks[0].as_paragraph().unwrap().segments[0];
        assert_eq!(segment.segment_type(), SegmentType::General);
        assert!(segment.is_selected());
    }

    /// `plain<b>bold</b>` selected from the start of `plain` to `bo|ld`.
    fn convert_partly_selected_bold() -> ContentModelDocument {
        let mut tree = MarkupTree::new();
        let plain = tree.create_text("plain");
        let b = tree.create_element("b");
        let bold = tree.create_text("bold");
        tree.append_child(tree.root(), plain).unwrap();
        tree.append_child(tree.root(), b).unwrap();
        tree.append_child(b, bold).unwrap();

        let mut doc = ContentModelDocument::default();
        let mut context =
            DomToModelContext::new(&tree, ConversionOptions::default());
        context.regular_selection = SelectionBoundaries::new(
            &tree,
            &RangeSelection::new(
                BoundaryPoint::new(plain, 0),
                BoundaryPoint::new(bold, 2),
            ),
        );
        container_processor(&mut doc, tree.root(), &mut context);
        doc
    }

    #[test]
    fn segment_is_not_selected_when_the_range_ends_inside_it() {
        let doc = convert_partly_selected_bold();

        let segments = &doc.blocks[0].as_paragraph().unwrap().segments;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].as_text().unwrap().text, "plain");
        assert!(segments[0].is_selected());

        let ContentModelSegment::General(b) = &segments[1] else {
            panic!("expected a general segment");
        };
        assert!(!segments[1].is_selected());
        let inner = &b.blocks[0].as_paragraph().unwrap().segments;
        let texts: Vec<(&str, bool)> = inner
            .iter()
            .map(|s| (s.as_text().unwrap().text.as_str(), s.is_selected()))
            .collect();
        assert_eq!(texts, vec![("bo", true), ("ld", false)]);
    }

    #[test]
    fn inline_element_with_block_children_is_promoted() {
        let mut tree = MarkupTree::new();
        let span = tree.create_element("span");
        let div = tree.create_element("div");
        tree.append_child(span, div).unwrap();

        let mut doc = ContentModelDocument::default();
        let mut context =
            DomToModelContext::new(&tree, ConversionOptions::default());
        general_segment_processor(&mut doc, span, &mut context);

        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].block_type(), BlockType::BlockGroup);
    }
}
