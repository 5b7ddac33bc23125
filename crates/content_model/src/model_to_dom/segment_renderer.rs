// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::block_renderer::render_blocks;
use super::context::ModelToDomContext;
use crate::error::ContentModelError;
use crate::markup::NodeId;
use crate::model::ContentModelSegment;
use crate::selection::BoundaryPoint;

/// Text waiting to be written as a single text node, with the selected
/// ranges inside it as UTF-16 offsets.
#[derive(Default)]
struct PendingText {
    text: String,
    len_utf16: usize,
    selected: Vec<(usize, usize)>,
}

impl PendingText {
    fn push(&mut self, text: &str, is_selected: bool) {
        let start = self.len_utf16;
        self.text.push_str(text);
        self.len_utf16 += text.encode_utf16().count();
        if is_selected {
            self.selected.push((start, self.len_utf16));
        }
    }

    fn mark(&mut self) {
        self.selected.push((self.len_utf16, self.len_utf16));
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Write the text into `parent` and report its selected ranges.
    fn flush(
        &mut self,
        parent: NodeId,
        context: &mut ModelToDomContext,
    ) -> Result<(), ContentModelError> {
        if self.is_empty() {
            return Ok(());
        }
        let pending = std::mem::take(self);
        let node = context.tree_mut().create_text(&pending.text);
        context.tree_mut().append_child(parent, node)?;
        for (start, end) in pending.selected {
            context.selection.cover(
                BoundaryPoint::new(node, start),
                BoundaryPoint::new(node, end),
            );
        }
        Ok(())
    }
}

/// Write the segments of a paragraph into `parent`. Adjacent text segments
/// share one text node, and a selection marker between them does not split
/// it.
pub(crate) fn render_segments(
    segments: &[ContentModelSegment],
    parent: NodeId,
    context: &mut ModelToDomContext,
) -> Result<(), ContentModelError> {
    let mut pending = PendingText::default();
    for segment in segments {
        match segment {
            ContentModelSegment::Text(text) => {
                pending.push(&text.text, segment.is_selected());
            }
            ContentModelSegment::SelectionMarker(_) if !pending.is_empty() => {
                pending.mark();
            }
            ContentModelSegment::SelectionMarker(_) => {
                let point = end_of(parent, context);
                context.selection.cover(point, point);
            }
            ContentModelSegment::Br(br) => {
                pending.flush(parent, context)?;
                let node = context.tree_mut().create_element("br");
                append_covered(
                    parent,
                    node,
                    br.is_selected.unwrap_or(false),
                    context,
                )?;
            }
            ContentModelSegment::General(general) => {
                pending.flush(parent, context)?;
                let node = general.element.to_markup(context.tree_mut());
                let before = end_of(parent, context);
                context.tree_mut().append_child(parent, node)?;
                let is_selected = segment.is_selected();
                if is_selected {
                    context.selection.cover(before, before);
                }
                render_blocks(&general.blocks, node, context)?;
                if is_selected {
                    context.selection.extend_end(end_of(parent, context));
                }
            }
        }
    }
    pending.flush(parent, context)
}

fn append_covered(
    parent: NodeId,
    node: NodeId,
    is_selected: bool,
    context: &mut ModelToDomContext,
) -> Result<(), ContentModelError> {
    let before = end_of(parent, context);
    context.tree_mut().append_child(parent, node)?;
    if is_selected {
        context.selection.cover(before, end_of(parent, context));
    }
    Ok(())
}

/// The point after the last child of `parent`.
fn end_of(parent: NodeId, context: &ModelToDomContext) -> BoundaryPoint {
    BoundaryPoint::new(parent, context.tree().children(parent).len())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::markup::MarkupTree;
    use crate::model::OpaqueElement;
    use crate::model_api::common::add_segment;
    use crate::model_api::creators::{
        create_br, create_general_segment, create_selection_marker,
        create_text,
    };
    use crate::selection::{RangeSelection, SelectionDescriptor};

    fn render(
        segments: Vec<ContentModelSegment>,
    ) -> (MarkupTree, NodeId, Option<SelectionDescriptor>) {
        let mut tree = MarkupTree::new();
        let root = tree.create_fragment();
        let mut context = ModelToDomContext::new(&mut tree);
        render_segments(&segments, root, &mut context).unwrap();
        let selection = context.selection.into_descriptor();
        (tree, root, selection)
    }

    fn range(
        start: (NodeId, usize),
        end: (NodeId, usize),
    ) -> Option<SelectionDescriptor> {
        Some(
            RangeSelection::new(
                BoundaryPoint::new(start.0, start.1),
                BoundaryPoint::new(end.0, end.1),
            )
            .into(),
        )
    }

    #[test]
    fn marker_inside_text_is_a_collapsed_point() {
        let (tree, root, selection) = render(vec![
            create_text("test1").into(),
            create_selection_marker().into(),
            create_text("test2").into(),
        ]);
        let text = tree.children(root)[0];
        assert_eq!(tree.children(root).len(), 1);
        assert_eq!(tree.text(text), Some("test1test2"));
        assert_eq!(selection, range((text, 5), (text, 5)));
    }

    #[test]
    fn marker_at_the_start_points_into_the_parent() {
        let (tree, root, selection) = render(vec![
            create_selection_marker().into(),
            create_text("a").into(),
        ]);
        assert_eq!(tree.inner_html(root), "a");
        assert_eq!(selection, range((root, 0), (root, 0)));
    }

    #[test]
    fn selected_br_covers_the_element() {
        let mut br = create_br();
        br.is_selected = Some(true);
        let (tree, root, selection) =
            render(vec![create_text("a").into(), br.into()]);
        assert_eq!(tree.inner_html(root), "a<br>");
        assert_eq!(selection, range((root, 1), (root, 2)));
    }

    #[test]
    fn selected_general_segment_covers_the_element() {
        let mut span = create_general_segment(OpaqueElement::new("span"));
        add_segment(&mut span, {
            let mut inner = create_text("in");
            inner.is_selected = Some(true);
            inner
        });
        span.is_selected = Some(true);

        let (tree, root, selection) = render(vec![
            create_text("x").into(),
            span.into(),
            create_text("y").into(),
        ]);

        assert_eq!(tree.inner_html(root), "x<span>in</span>y");
        assert_eq!(selection, range((root, 1), (root, 2)));
    }

    #[test]
    fn utf16_offsets_for_selected_text() {
        let mut selected = create_text("b");
        selected.is_selected = Some(true);
        let (tree, root, selection) =
            render(vec![create_text("\u{1F600}").into(), selected.into()]);
        let text = tree.children(root)[0];
        assert_eq!(selection, range((text, 2), (text, 3)));
    }
}
