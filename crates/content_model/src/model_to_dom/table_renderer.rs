// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::block_renderer::render_blocks;
use super::context::ModelToDomContext;
use crate::error::ContentModelError;
use crate::format_handlers::{
    apply_format, TABLE_CELL_FORMAT_HANDLERS, TABLE_FORMAT_HANDLERS,
};
use crate::markup::NodeId;
use crate::model::ContentModelTable;

/// Write `table` as `table > tbody > tr > td|th`. Continuation cells produce
/// no element; they become the `colspan` and `rowspan` of their origin.
pub(crate) fn render_table(
    table: &ContentModelTable,
    parent: NodeId,
    context: &mut ModelToDomContext,
) -> Result<(), ContentModelError> {
    let table_node = context.tree_mut().create_element("table");
    context.tree_mut().append_child(parent, table_node)?;
    apply_format(TABLE_FORMAT_HANDLERS, &table.format, table_node, context);

    let tbody = context.tree_mut().create_element("tbody");
    context.tree_mut().append_child(table_node, tbody)?;

    context.push_block_format(&table.format);
    let result = render_rows(table, table_node, tbody, context);
    context.pop_block_format();
    result
}

fn render_rows(
    table: &ContentModelTable,
    table_node: NodeId,
    tbody: NodeId,
    context: &mut ModelToDomContext,
) -> Result<(), ContentModelError> {
    for (row_index, row) in table.cells.iter().enumerate() {
        let tr = context.tree_mut().create_element("tr");
        context.tree_mut().append_child(tbody, tr)?;

        for (col_index, cell) in row.iter().enumerate() {
            if cell.is_selected() {
                context
                    .selection
                    .add_selected_cell(table_node, row_index, col_index);
            }
            if cell.is_span_continuation() {
                continue;
            }

            let tag = if cell.is_header { "th" } else { "td" };
            let td = context.tree_mut().create_element(tag);
            context.tree_mut().append_child(tr, td)?;

            let col_span = 1 + row[col_index + 1..]
                .iter()
                .take_while(|c| c.span_left && !c.span_above)
                .count();
            let row_span = 1 + table.cells[row_index + 1..]
                .iter()
                .take_while(|r| {
                    r.get(col_index)
                        .is_some_and(|c| c.span_above && !c.span_left)
                })
                .count();
            if let Some(element) = context.tree_mut().element_mut(td) {
                if col_span > 1 {
                    element.set_attr("colspan", &col_span.to_string());
                }
                if row_span > 1 {
                    element.set_attr("rowspan", &row_span.to_string());
                }
            }

            context.push_block_format(&cell.format);
            apply_format(TABLE_CELL_FORMAT_HANDLERS, &cell.format, td, context);
            let rendered = render_blocks(&cell.blocks, td, context);
            context.pop_block_format();
            rendered?;
        }
    }
    Ok(())
}
