// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Constructors for every model entity. Each returns the smallest value that
//! satisfies the entity's invariants.

use crate::model::{
    ContentModelBr, ContentModelDocument, ContentModelGeneralBlock,
    ContentModelGeneralSegment, ContentModelParagraph,
    ContentModelSelectionMarker, ContentModelTable, ContentModelTableCell,
    ContentModelText, FormatRecord, OpaqueElement, OwnerDocument,
};

pub fn create_content_model_document(
    owner: OwnerDocument,
) -> ContentModelDocument {
    ContentModelDocument {
        blocks: Vec::new(),
        owner,
    }
}

pub fn create_general_block(element: OpaqueElement) -> ContentModelGeneralBlock {
    ContentModelGeneralBlock {
        element,
        blocks: Vec::new(),
    }
}

pub fn create_general_segment(
    element: OpaqueElement,
) -> ContentModelGeneralSegment {
    ContentModelGeneralSegment {
        element,
        blocks: Vec::new(),
        is_selected: None,
    }
}

/// An empty paragraph. A non-implicit paragraph has no `is_implicit` flag at
/// all rather than `Some(false)`.
pub fn create_paragraph(is_implicit: bool) -> ContentModelParagraph {
    ContentModelParagraph {
        segments: Vec::new(),
        is_implicit: is_implicit.then_some(true),
    }
}

pub fn create_table(row_count: usize) -> ContentModelTable {
    ContentModelTable {
        cells: (0..row_count).map(|_| Vec::new()).collect(),
        format: FormatRecord::new(),
    }
}

/// `col_span` and `row_span` are the 1-based position of the cell inside
/// the span it belongs to: anything above 1 is a continuation cell.
pub fn create_table_cell(
    col_span: usize,
    row_span: usize,
    is_header: bool,
) -> ContentModelTableCell {
    ContentModelTableCell {
        blocks: Vec::new(),
        span_left: col_span > 1,
        span_above: row_span > 1,
        is_header,
        is_selected: None,
        format: FormatRecord::new(),
    }
}

pub fn create_text(text: &str) -> ContentModelText {
    ContentModelText {
        text: text.to_owned(),
        is_selected: None,
    }
}

pub fn create_selection_marker() -> ContentModelSelectionMarker {
    ContentModelSelectionMarker {
        is_selected: Some(true),
    }
}

pub fn create_br() -> ContentModelBr {
    ContentModelBr { is_selected: None }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::markup::MarkupTree;
    use crate::model::ContentModelBlock;

    fn to_json<T: serde::Serialize>(value: T) -> serde_json::Value {
        serde_json::to_value(value).unwrap()
    }

    #[test]
    fn document_is_bound_to_its_owner() {
        let tree = MarkupTree::new().into_shared();
        let doc = create_content_model_document(OwnerDocument::new(&tree));

        assert!(doc.blocks.is_empty());
        assert_eq!(doc.owner, OwnerDocument::new(&tree));
    }

    #[test]
    fn documents_with_different_owners_differ() {
        let a = MarkupTree::new().into_shared();
        let b = MarkupTree::new().into_shared();
        assert_ne!(
            create_content_model_document(OwnerDocument::new(&a)),
            create_content_model_document(OwnerDocument::new(&b))
        );
    }

    #[test]
    fn general_block_wraps_the_element() {
        let block = create_general_block(OpaqueElement::new("div"));
        assert_eq!(
            to_json(ContentModelBlock::from(block)),
            json!({
                "blockType": "BlockGroup",
                "blockGroupType": "General",
                "element": "Element<div>: <div></div>",
                "blocks": [],
            })
        );
    }

    #[test]
    fn general_segment_wraps_the_element() {
        let segment = create_general_segment(OpaqueElement::new("div"));
        assert_eq!(segment.element.tag(), "div");
        assert!(segment.blocks.is_empty());
        assert_eq!(segment.is_selected, None);
    }

    #[test]
    fn explicit_paragraph_has_no_implicit_flag() {
        assert_eq!(
            to_json(ContentModelBlock::from(create_paragraph(false))),
            json!({ "blockType": "Paragraph", "segments": [] })
        );
    }

    #[test]
    fn implicit_paragraph_is_flagged() {
        assert_eq!(
            to_json(ContentModelBlock::from(create_paragraph(true))),
            json!({
                "blockType": "Paragraph",
                "segments": [],
                "isImplicit": true,
            })
        );
    }

    #[test]
    fn text_holds_its_value() {
        assert_eq!(
            to_json(crate::model::ContentModelSegment::from(create_text(
                "test"
            ))),
            json!({ "segmentType": "Text", "text": "test" })
        );
    }

    #[test]
    fn table_rows_are_independent() {
        let mut table = create_table(2);
        assert_eq!(
            to_json(ContentModelBlock::from(table.clone())),
            json!({ "blockType": "Table", "cells": [[], []], "format": {} })
        );

        table.cells[0].push(create_table_cell(1, 1, false));
        assert_eq!(table.cells[0].len(), 1);
        assert!(table.cells[1].is_empty());
    }

    #[test]
    fn table_cell_without_span() {
        assert_eq!(
            to_json(ContentModelBlock::from(create_table_cell(1, 1, false))),
            json!({
                "blockType": "BlockGroup",
                "blockGroupType": "TableCell",
                "blocks": [],
                "spanLeft": false,
                "spanAbove": false,
                "isHeader": false,
                "format": {},
            })
        );
    }

    #[test]
    fn table_cell_span_left() {
        let cell = create_table_cell(2, 1, false);
        assert!(cell.span_left);
        assert!(!cell.span_above);
        assert!(!cell.is_header);
    }

    #[test]
    fn table_cell_span_above() {
        let cell = create_table_cell(1, 3, false);
        assert!(!cell.span_left);
        assert!(cell.span_above);
    }

    #[test]
    fn table_header_cell() {
        let cell = create_table_cell(1, 1, true);
        assert!(cell.is_header);
        assert!(!cell.is_span_continuation());
    }

    #[test]
    fn selection_marker_is_always_selected() {
        assert_eq!(
            to_json(crate::model::ContentModelSegment::from(
                create_selection_marker()
            )),
            json!({ "segmentType": "SelectionMarker", "isSelected": true })
        );
    }

    #[test]
    fn br_is_minimal() {
        assert_eq!(
            to_json(crate::model::ContentModelSegment::from(create_br())),
            json!({ "segmentType": "Br" })
        );
    }
}
