// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::container_processor::container_processor;
use super::context::DomToModelContext;
use super::selection_mapper::Position;
use crate::format_handlers::{
    parse_format, TABLE_CELL_FORMAT_HANDLERS, TABLE_FORMAT_HANDLERS,
};
use crate::markup::{MarkupTree, NodeId};
use crate::model::{BlockGroup, ContentModelTableCell};
use crate::model_api::common::add_block;
use crate::model_api::creators::{create_table, create_table_cell};

const ROW_GROUP_TAGS: &[&str] = &["thead", "tbody", "tfoot"];

/// Span limits browsers apply when parsing `colspan` and `rowspan`.
const MAX_COL_SPAN: usize = 1000;
const MAX_ROW_SPAN: usize = 65534;

/// Convert a `table` element into a table block with a rectangular grid.
///
/// A cell spanning several columns or rows occupies one origin cell plus a
/// continuation cell for every other grid position it covers. Only the
/// origin carries formats and content.
pub(crate) fn table_processor(
    group: &mut dyn BlockGroup,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    let tree = context.tree;
    let rows = table_rows(tree, node);
    let mut table = create_table(rows.len());
    table.format = parse_format(TABLE_FORMAT_HANDLERS, node, context);

    context.block_format_stack.push(table.format.clone());
    let mut grid: Vec<Vec<Option<ContentModelTableCell>>> =
        rows.iter().map(|_| Vec::new()).collect();

    for (row_index, row) in rows.iter().enumerate() {
        let mut col_index = 0;
        for cell_node in tree.children(*row) {
            let Some(element) = tree.element(*cell_node) else {
                continue;
            };
            let is_header = match element.tag() {
                "td" => false,
                "th" => true,
                _ => continue,
            };
            while grid[row_index]
                .get(col_index)
                .is_some_and(|cell| cell.is_some())
            {
                col_index += 1;
            }

            let col_span =
                span_attribute(element.get_attr("colspan"), MAX_COL_SPAN);
            let row_span =
                span_attribute(element.get_attr("rowspan"), MAX_ROW_SPAN)
                    .min(rows.len() - row_index);

            for row_offset in 0..row_span {
                for col_offset in 0..col_span {
                    let mut cell = create_table_cell(
                        col_offset + 1,
                        row_offset + 1,
                        is_header,
                    );
                    if row_offset == 0 && col_offset == 0 {
                        process_cell_content(&mut cell, *cell_node, context);
                    }
                    place(
                        &mut grid[row_index + row_offset],
                        col_index + col_offset,
                        cell,
                    );
                }
            }
            col_index += col_span;
        }
    }
    context.block_format_stack.pop();

    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for (row_index, row) in grid.into_iter().enumerate() {
        let mut cells: Vec<ContentModelTableCell> = row
            .into_iter()
            .map(|cell| cell.unwrap_or_else(|| create_table_cell(1, 1, false)))
            .collect();
        cells.resize_with(width, || create_table_cell(1, 1, false));
        table.cells[row_index] = cells;
    }

    if let Some(selection) = context.table_selection.filter(|s| s.table == node) {
        for (row_index, row) in table.cells.iter_mut().enumerate() {
            for (col_index, cell) in row.iter_mut().enumerate() {
                if selection.contains(row_index, col_index) {
                    cell.is_selected = Some(true);
                }
            }
        }
    }

    // Boundaries between rows and cells are never crossed by a container
    // walk, so the state after the table comes from its position.
    context.is_in_selection = context
        .regular_selection
        .as_ref()
        .is_some_and(|selection| {
            selection.start_position(tree, node)
                != Position::After
                && selection.continues_after(tree, node)
        });

    tracing::trace!(
        target: "content_model::dom_to_model",
        rows = table.row_count(),
        columns = table.column_count(),
        "converted table"
    );
    add_block(group, table);
}

fn process_cell_content(
    cell: &mut ContentModelTableCell,
    node: NodeId,
    context: &mut DomToModelContext,
) {
    cell.format = parse_format(TABLE_CELL_FORMAT_HANDLERS, node, context);
    let tree = context.tree;
    context.is_in_selection = context
        .regular_selection
        .as_ref()
        .is_some_and(|selection| selection.covers_entry(tree, node));
    container_processor(cell, node, context);
}

/// `tr` elements of the table in document order, whether they sit directly
/// in the table or in a row group.
fn table_rows(tree: &MarkupTree, table: NodeId) -> Vec<NodeId> {
    let mut rows = Vec::new();
    for child in tree.children(table) {
        match tree.element(*child).map(|e| e.tag()) {
            Some("tr") => rows.push(*child),
            Some(tag) if ROW_GROUP_TAGS.contains(&tag) => rows.extend(
                tree.children(*child)
                    .iter()
                    .filter(|c| tree.element(**c).is_some_and(|e| e.tag() == "tr")),
            ),
            _ => {}
        }
    }
    rows
}

/// `colspan` or `rowspan`, between 1 and `max`.
fn span_attribute(value: Option<&str>, max: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(1)
        .clamp(1, max)
}

/// Put `cell` at `col`, growing the row as needed. A position already taken
/// by an overlapping span keeps its first cell.
fn place(
    row: &mut Vec<Option<ContentModelTableCell>>,
    col: usize,
    cell: ContentModelTableCell,
) {
    if row.len() <= col {
        row.resize_with(col + 1, || None);
    }
    if row[col].is_none() {
        row[col] = Some(cell);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dom_to_model::selection_mapper::SelectionBoundaries;
    use crate::dom_to_model::ConversionOptions;
    use crate::model::{
        ContentModelBlock, ContentModelDocument, ContentModelTable, FormatKey,
    };
    use crate::selection::{
        BoundaryPoint, CellCoordinates, RangeSelection, TableSelection,
    };

    /// Build `<table><tbody>` rows from `(tag, attrs, text)` cells.
    fn build(
        rows: &[&[(&str, &[(&str, &str)], &str)]],
    ) -> (MarkupTree, NodeId, Vec<Vec<NodeId>>) {
        let mut tree = MarkupTree::new();
        let table = tree.create_element("table");
        let tbody = tree.create_element("tbody");
        tree.append_child(tree.root(), table).unwrap();
        tree.append_child(table, tbody).unwrap();
        let mut texts = Vec::new();
        for cells in rows {
            let tr = tree.create_element("tr");
            tree.append_child(tbody, tr).unwrap();
            let mut row_texts = Vec::new();
            for (tag, attrs, text) in cells.iter() {
                let cell = tree.create_element_with_attrs(
                    tag,
                    attrs
                        .iter()
                        .map(|(n, v)| (n.to_string(), v.to_string()))
                        .collect(),
                );
                let content = tree.create_text(text);
                tree.append_child(cell, content).unwrap();
                tree.append_child(tr, cell).unwrap();
                row_texts.push(content);
            }
            texts.push(row_texts);
        }
        (tree, table, texts)
    }

    fn convert_table(
        tree: &MarkupTree,
        table: NodeId,
        prepare: impl FnOnce(&mut DomToModelContext),
    ) -> ContentModelTable {
        let mut doc = ContentModelDocument::default();
        let mut context =
            DomToModelContext::new(tree, ConversionOptions::default());
        prepare(&mut context);
        table_processor(&mut doc, table, &mut context);
        match doc.blocks.pop() {
            Some(ContentModelBlock::Table(table)) => table,
            _ => panic!("expected a table"),
        }
    }

    fn cell_text(cell: &ContentModelTableCell) -> String {
        cell.blocks
            .first()
            .and_then(|b| b.as_paragraph())
            .and_then(|p| p.segments.first())
            .and_then(|s| s.as_text())
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    #[test]
    fn simple_table() {
        let (tree, table, _) = build(&[
            &[("td", &[], "a"), ("th", &[], "b")],
            &[("td", &[], "c"), ("td", &[], "d")],
        ]);
        let model = convert_table(&tree, table, |_| {});

        assert_eq!(model.row_count(), 2);
        assert_eq!(model.column_count(), 2);
        assert_eq!(cell_text(&model.cells[1][0]), "c");
        assert!(model.cells[0][1].is_header);
        assert!(model.cells.iter().flatten().all(|c| !c.is_span_continuation()));
    }

    #[test]
    fn colspan_and_rowspan_create_continuation_cells() {
        let (tree, table, _) = build(&[
            &[("td", &[("colspan", "2"), ("rowspan", "2")], "a"), ("td", &[], "b")],
            &[("td", &[], "c")],
        ]);
        let model = convert_table(&tree, table, |_| {});

        let flags: Vec<Vec<(bool, bool)>> = model
            .cells
            .iter()
            .map(|row| row.iter().map(|c| (c.span_left, c.span_above)).collect())
            .collect();
        assert_eq!(
            flags,
            vec![
                vec![(false, false), (true, false), (false, false)],
                vec![(false, true), (true, true), (false, false)],
            ]
        );
        assert_eq!(cell_text(&model.cells[0][0]), "a");
        assert!(model.cells[0][1].blocks.is_empty());
        assert_eq!(cell_text(&model.cells[1][2]), "c");
    }

    #[test]
    fn rowspan_is_clamped_to_the_table() {
        let (tree, table, _) = build(&[&[("td", &[("rowspan", "5")], "a")]]);
        let model = convert_table(&tree, table, |_| {});
        assert_eq!(model.row_count(), 1);
        assert_eq!(model.column_count(), 1);
    }

    #[test]
    fn invalid_spans_count_as_one() {
        let (tree, table, _) =
            build(&[&[("td", &[("colspan", "0")], "a"), ("td", &[("colspan", "x")], "b")]]);
        let model = convert_table(&tree, table, |_| {});
        assert_eq!(model.column_count(), 2);
    }

    #[test]
    fn huge_spans_are_capped() {
        let (tree, table, _) = build(&[
            &[("td", &[("colspan", "200000")], "a")],
            &[("td", &[("colspan", "5000")], "b")],
        ]);
        let model = convert_table(&tree, table, |_| {});
        assert_eq!(model.column_count(), 1000);
        assert!(model.cells.iter().all(|row| row.len() == 1000));
        assert_eq!(span_attribute(Some("70000"), MAX_ROW_SPAN), 65534);
    }

    #[test]
    fn ragged_rows_are_padded() {
        let (tree, table, _) = build(&[
            &[("td", &[], "a"), ("td", &[], "b"), ("td", &[], "c")],
            &[("td", &[], "d")],
        ]);
        let model = convert_table(&tree, table, |_| {});
        assert!(model.cells.iter().all(|row| row.len() == 3));
        assert!(model.cells[1][2].blocks.is_empty());
    }

    #[test]
    fn cell_formats_are_parsed() {
        let (tree, table, _) = build(&[&[(
            "td",
            &[("style", "background-color: red; vertical-align: top")],
            "a",
        )]]);
        let model = convert_table(&tree, table, |_| {});
        let format = &model.cells[0][0].format;
        assert_eq!(format.get_str(FormatKey::BackgroundColor), Some("red"));
        assert_eq!(format.get_str(FormatKey::VerticalAlign), Some("top"));
    }

    #[test]
    fn table_direction_applies_to_cell_alignment() {
        let (mut tree, table, _) =
            build(&[&[("td", &[("align", "left")], "a")]]);
        tree.element_mut(table).unwrap().set_attr("dir", "rtl");
        let model = convert_table(&tree, table, |_| {});
        assert_eq!(model.format.get_str(FormatKey::Direction), Some("rtl"));
        assert_eq!(
            model.cells[0][0].format.get_str(FormatKey::TextAlign),
            Some("end")
        );
    }

    #[test]
    fn table_selection_marks_the_rectangle() {
        let (tree, table, _) = build(&[
            &[("td", &[], "a"), ("td", &[], "b"), ("td", &[], "c")],
            &[("td", &[], "d"), ("td", &[], "e"), ("td", &[], "f")],
        ]);
        let model = convert_table(&tree, table, |context| {
            context.table_selection = Some(TableSelection::new(
                table,
                CellCoordinates::new(1, 2),
                CellCoordinates::new(0, 1),
            ));
        });
        let selected: Vec<Vec<bool>> = model
            .cells
            .iter()
            .map(|row| row.iter().map(|c| c.is_selected()).collect())
            .collect();
        assert_eq!(
            selected,
            vec![vec![false, true, true], vec![false, true, true]]
        );
    }

    #[test]
    fn range_selection_across_cells() {
        let (tree, table, texts) = build(&[
            &[("td", &[], "a"), ("td", &[], "b")],
            &[("td", &[], "c"), ("td", &[], "d")],
        ]);
        let model = convert_table(&tree, table, |context| {
            context.regular_selection = SelectionBoundaries::new(
                &tree,
                &RangeSelection::new(
                    BoundaryPoint::new(texts[0][1], 0),
                    BoundaryPoint::new(texts[1][0], 1),
                ),
            );
        });

        let selected: Vec<bool> = model
            .cells
            .iter()
            .flatten()
            .map(|c| {
                c.blocks[0].as_paragraph().unwrap().segments[0].is_selected()
            })
            .collect();
        assert_eq!(selected, vec![false, true, true, false]);
    }
}
