// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Conversion from a markup tree into a content model document.
//!
//! The walk starts at a container node and dispatches every child to a
//! processor chosen by its classification. Processors append blocks and
//! segments to the block group they are given, and recurse through
//! [`container_processor::container_processor`] for element children.

mod classify;
mod container_processor;
mod context;
mod general_block_processor;
mod general_segment_processor;
pub(crate) mod selection_mapper;
mod table_processor;
mod text_processor;

pub use context::{ConversionOptions, DomToModelContext};

use crate::error::ContentModelError;
use crate::markup::{MarkupNode, MarkupTree, NodeId, SharedMarkupTree};
use crate::model::{ContentModelDocument, OwnerDocument};
use crate::model_api::creators::create_content_model_document;
use crate::selection::SelectionDescriptor;
use container_processor::container_processor;
use selection_mapper::SelectionBoundaries;

/// Convert the children of `root` into a new document owned by `tree`.
///
/// The document keeps a weak reference to `tree` and renders into it later.
/// Markup the converter does not understand is carried through as general
/// blocks and segments; only a bad `root` is an error.
pub fn convert(
    tree: &SharedMarkupTree,
    root: NodeId,
    selection: Option<SelectionDescriptor>,
    options: &ConversionOptions,
) -> Result<ContentModelDocument, ContentModelError> {
    let markup = tree
        .try_borrow()
        .map_err(|_| ContentModelError::OwnerBusy)?;
    convert_into(
        create_content_model_document(OwnerDocument::new(tree)),
        &markup,
        root,
        selection,
        options,
    )
}

/// Like [`convert`] for a tree that is not shared. The document has no
/// owner and cannot be rendered.
pub fn convert_tree(
    tree: &MarkupTree,
    root: NodeId,
    selection: Option<SelectionDescriptor>,
    options: &ConversionOptions,
) -> Result<ContentModelDocument, ContentModelError> {
    convert_into(
        create_content_model_document(OwnerDocument::detached()),
        tree,
        root,
        selection,
        options,
    )
}

fn convert_into(
    mut document: ContentModelDocument,
    tree: &MarkupTree,
    root: NodeId,
    selection: Option<SelectionDescriptor>,
    options: &ConversionOptions,
) -> Result<ContentModelDocument, ContentModelError> {
    match tree.get(root) {
        None => return Err(ContentModelError::UnknownNode(root)),
        Some(MarkupNode::Text(_) | MarkupNode::Comment(_)) => {
            return Err(ContentModelError::NotAContainer(root))
        }
        Some(MarkupNode::Element(_) | MarkupNode::Fragment(_)) => {}
    }

    let mut context = DomToModelContext::new(tree, *options);
    match selection {
        Some(SelectionDescriptor::Range(range)) => {
            context.regular_selection = SelectionBoundaries::new(tree, &range)
                .filter(|boundaries| boundaries.is_in_tree_of(tree, root));
            if context.regular_selection.is_none() {
                tracing::debug!(
                    target: "content_model::dom_to_model",
                    ?range,
                    "range selection is not in the converted tree"
                );
            }
        }
        Some(SelectionDescriptor::Table(table)) => {
            context.table_selection = Some(table);
        }
        None => {}
    }
    context.is_in_selection = context
        .regular_selection
        .as_ref()
        .is_some_and(|selection| selection.covers_entry(tree, root));

    tracing::debug!(
        target: "content_model::dom_to_model",
        root = ?root,
        has_selection = context.regular_selection.is_some()
            || context.table_selection.is_some(),
        "converting markup"
    );
    container_processor(&mut document, root, &mut context);

    #[cfg(feature = "assert-invariants")]
    crate::model_api::validate::validate_document(&document)?;

    Ok(document)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{BlockType, ContentModelBlock, SegmentType};
    use crate::selection::{BoundaryPoint, RangeSelection};

    fn paragraph_of(text: &str) -> (MarkupTree, NodeId) {
        let mut tree = MarkupTree::new();
        let p = tree.create_element("p");
        let content = tree.create_text(text);
        tree.append_child(tree.root(), p).unwrap();
        tree.append_child(p, content).unwrap();
        (tree, content)
    }

    #[test]
    fn converted_document_is_owned_by_the_tree() {
        let (tree, _) = paragraph_of("hello");
        let shared = tree.into_shared();
        let root = shared.borrow().root();

        let doc =
            convert(&shared, root, None, &ConversionOptions::default()).unwrap();

        assert!(doc.owner.is_alive());
        assert_eq!(doc.owner, OwnerDocument::new(&shared));
        assert_eq!(doc.blocks.len(), 1);
        assert_eq!(doc.blocks[0].block_type(), BlockType::BlockGroup);
    }

    #[test]
    fn borrowed_tree_is_reported() {
        let shared = MarkupTree::new().into_shared();
        let root = shared.borrow().root();
        let _guard = shared.borrow_mut();
        assert!(matches!(
            convert(&shared, root, None, &ConversionOptions::default()),
            Err(ContentModelError::OwnerBusy)
        ));
    }

    #[test]
    fn root_must_be_a_container() {
        let (tree, text) = paragraph_of("hello");
        let options = ConversionOptions::default();
        assert!(matches!(
            convert_tree(&tree, text, None, &options),
            Err(ContentModelError::NotAContainer(_))
        ));
        assert!(matches!(
            convert_tree(&tree, NodeId(42), None, &options),
            Err(ContentModelError::UnknownNode(_))
        ));
    }

    #[test]
    fn selection_outside_the_converted_tree_is_ignored() {
        let (mut tree, text) = paragraph_of("hello");
        let detached = tree.create_element("div");
        let inner = tree.create_text("abc");
        tree.append_child(detached, inner).unwrap();

        let doc = convert_tree(
            &tree,
            detached,
            Some(
                RangeSelection::new(
                    BoundaryPoint::new(text, 0),
                    BoundaryPoint::new(text, 2),
                )
                .into(),
            ),
            &ConversionOptions::default(),
        )
        .unwrap();

        let segment = &doc.blocks[0].as_paragraph().unwrap().segments[0];
        assert!(!segment.is_selected());
        assert_eq!(segment.as_text().unwrap().text, "abc");
    }

    #[test]
    fn selection_starting_before_the_root_selects_from_the_start() {
        let mut tree = MarkupTree::new();
        let before = tree.create_text("x");
        let div = tree.create_element("div");
        let inner = tree.create_text("abc");
        tree.append_child(tree.root(), before).unwrap();
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, inner).unwrap();

        let doc = convert_tree(
            &tree,
            div,
            Some(
                RangeSelection::new(
                    BoundaryPoint::new(before, 0),
                    BoundaryPoint::new(inner, 1),
                )
                .into(),
            ),
            &ConversionOptions::default(),
        )
        .unwrap();

        let ContentModelBlock::Paragraph(paragraph) = &doc.blocks[0] else {
            panic!("expected a paragraph");
        };
        let runs: Vec<(SegmentType, bool)> = paragraph
            .segments
            .iter()
            .map(|s| (s.segment_type(), s.is_selected()))
            .collect();
        assert_eq!(
            runs,
            vec![(SegmentType::Text, true), (SegmentType::Text, false)]
        );
    }
}
