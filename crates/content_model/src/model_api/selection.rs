// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Structural queries used by editing commands to find out where the
//! selection lies in a model.

use crate::model::{
    BlockGroup, ContentModelBlock, ContentModelBlockGroup, ContentModelSegment,
    ContentModelTableCell,
};

pub fn has_selection_in_segment(segment: &ContentModelSegment) -> bool {
    if segment.is_selected() {
        return true;
    }
    match segment {
        ContentModelSegment::General(general) => {
            has_selection_in_block_group(general)
        }
        _ => false,
    }
}

pub fn has_selection_in_block(block: &ContentModelBlock) -> bool {
    match block {
        ContentModelBlock::Paragraph(paragraph) => {
            paragraph.segments.iter().any(has_selection_in_segment)
        }
        ContentModelBlock::Table(table) => table
            .cells
            .iter()
            .any(|row| row.iter().any(has_selection_in_table_cell)),
        ContentModelBlock::BlockGroup(ContentModelBlockGroup::TableCell(
            cell,
        )) => has_selection_in_table_cell(cell),
        ContentModelBlock::BlockGroup(group) => {
            has_selection_in_block_group(group)
        }
    }
}

/// Whether any block of `group` has selection. A table cell selected as a
/// whole counts even when none of its content is.
pub fn has_selection_in_block_group<G: BlockGroup + ?Sized>(group: &G) -> bool {
    group.blocks().iter().any(has_selection_in_block)
}

fn has_selection_in_table_cell(cell: &ContentModelTableCell) -> bool {
    has_selection_in_block_group(cell) || cell.is_selected()
}

/// Selected segments of `group` in document order, including those inside
/// tables and general segments.
pub fn get_selected_segments<G: BlockGroup + ?Sized>(
    group: &G,
) -> Vec<&ContentModelSegment> {
    let mut result = Vec::new();
    collect_selected_segments(group.blocks(), &mut result);
    result
}

fn collect_selected_segments<'a>(
    blocks: &'a [ContentModelBlock],
    result: &mut Vec<&'a ContentModelSegment>,
) {
    for block in blocks {
        match block {
            ContentModelBlock::Paragraph(paragraph) => {
                for segment in &paragraph.segments {
                    if segment.is_selected() {
                        result.push(segment);
                    }
                    if let ContentModelSegment::General(general) = segment {
                        collect_selected_segments(&general.blocks, result);
                    }
                }
            }
            ContentModelBlock::Table(table) => {
                for cell in table.cells.iter().flatten() {
                    collect_selected_segments(&cell.blocks, result);
                }
            }
            ContentModelBlock::BlockGroup(group) => {
                collect_selected_segments(group.blocks(), result);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{ContentModelDocument, OpaqueElement};
    use crate::model_api::common::{add_block, add_segment};
    use crate::model_api::creators::{
        create_general_block, create_general_segment, create_paragraph,
        create_selection_marker, create_table, create_table_cell, create_text,
    };

    fn selected_text(text: &str) -> ContentModelSegment {
        let mut segment = ContentModelSegment::from(create_text(text));
        segment.set_selected(true);
        segment
    }

    #[test]
    fn empty_paragraph_has_no_selection() {
        let block = create_paragraph(false).into();
        assert!(!has_selection_in_block(&block));
    }

    #[test]
    fn paragraph_with_unselected_segments_has_no_selection() {
        let mut paragraph = create_paragraph(false);
        paragraph.segments.push(create_text("a").into());
        paragraph.segments.push(create_text("b").into());
        assert!(!has_selection_in_block(&paragraph.into()));
    }

    #[test]
    fn paragraph_with_a_selected_segment_has_selection() {
        let mut paragraph = create_paragraph(false);
        paragraph.segments.push(create_text("a").into());
        paragraph.segments.push(selected_text("b"));
        assert!(has_selection_in_block(&paragraph.into()));
    }

    #[test]
    fn selection_marker_counts_as_selection() {
        let mut paragraph = create_paragraph(true);
        paragraph.segments.push(create_selection_marker().into());
        assert!(has_selection_in_block(&paragraph.into()));
    }

    #[test]
    fn empty_table_has_no_selection() {
        assert!(!has_selection_in_block(&create_table(0).into()));
        assert!(!has_selection_in_block(&create_table(2).into()));
    }

    #[test]
    fn table_with_selected_cell_content_has_selection() {
        let mut table = create_table(2);
        table.cells[0].push(create_table_cell(1, 1, false));
        let mut cell = create_table_cell(1, 1, false);
        add_segment(&mut cell, selected_text("x"));
        table.cells[1].push(cell);
        assert!(has_selection_in_block(&table.into()));
    }

    #[test]
    fn table_with_a_whole_cell_selected_has_selection() {
        let mut table = create_table(1);
        let mut cell = create_table_cell(1, 1, false);
        cell.is_selected = Some(true);
        table.cells[0].push(cell);
        assert!(has_selection_in_block(&table.into()));
    }

    #[test]
    fn table_with_unselected_cells_has_no_selection() {
        let mut table = create_table(1);
        let mut cell = create_table_cell(1, 1, false);
        add_segment(&mut cell, create_text("x"));
        table.cells[0].push(cell);
        assert!(!has_selection_in_block(&table.into()));
    }

    #[test]
    fn selected_table_cell_as_block_has_selection() {
        let mut cell = create_table_cell(1, 1, true);
        cell.is_selected = Some(true);
        assert!(has_selection_in_block(&cell.into()));
    }

    #[test]
    fn general_block_with_nested_selection_has_selection() {
        let mut inner = create_general_block(OpaqueElement::new("div"));
        add_segment(&mut inner, selected_text("x"));
        let mut outer = create_general_block(OpaqueElement::new("div"));
        add_block(&mut outer, inner);
        assert!(has_selection_in_block(&outer.into()));
    }

    #[test]
    fn general_segment_with_nested_selection_has_selection() {
        let mut general = create_general_segment(OpaqueElement::new("span"));
        add_segment(&mut general, selected_text("x"));
        assert!(!general.is_selected.unwrap_or(false));
        assert!(has_selection_in_segment(&general.into()));
    }

    #[test]
    fn selected_segments_are_listed_in_document_order() {
        let mut doc = ContentModelDocument::default();
        add_segment(&mut doc, create_text("a"));
        add_segment(&mut doc, selected_text("b"));
        let mut general = create_general_segment(OpaqueElement::new("span"));
        add_segment(&mut general, selected_text("c"));
        add_segment(&mut doc, general);
        let mut table = create_table(1);
        let mut cell = create_table_cell(1, 1, false);
        add_segment(&mut cell, selected_text("d"));
        table.cells[0].push(cell);
        add_block(&mut doc, table);

        let texts: Vec<&str> = get_selected_segments(&doc)
            .into_iter()
            .filter_map(|s| s.as_text().map(|t| t.text.as_str()))
            .collect();
        assert_eq!(texts, vec!["b", "c", "d"]);
    }
}
