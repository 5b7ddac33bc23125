// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::markup::{MarkupTree, NodeId};
use crate::model::{FormatKey, FormatRecord};
use crate::selection::{
    BoundaryPoint, CellCoordinates, RangeSelection, SelectionDescriptor,
    TableSelection,
};

/// State threaded through a single model to markup rendering.
pub struct ModelToDomContext<'a> {
    pub(crate) tree: &'a mut MarkupTree,
    direction_stack: Vec<bool>,
    pub(crate) selection: SelectionTracker,
}

impl<'a> ModelToDomContext<'a> {
    pub(crate) fn new(tree: &'a mut MarkupTree) -> Self {
        Self {
            tree,
            direction_stack: Vec::new(),
            selection: SelectionTracker::default(),
        }
    }

    pub fn tree(&self) -> &MarkupTree {
        &*self.tree
    }

    pub fn tree_mut(&mut self) -> &mut MarkupTree {
        &mut *self.tree
    }

    pub fn is_right_to_left(&self) -> bool {
        self.direction_stack.last().copied().unwrap_or(false)
    }

    /// Enter a block with `format`. Blocks without a direction inherit the
    /// current one.
    pub(crate) fn push_block_format(&mut self, format: &FormatRecord) {
        let rtl = format
            .get_str(FormatKey::Direction)
            .map(|direction| direction == "rtl")
            .unwrap_or_else(|| self.is_right_to_left());
        self.direction_stack.push(rtl);
    }

    pub(crate) fn pop_block_format(&mut self) {
        self.direction_stack.pop();
    }
}

/// Collects the boundaries of the selection while segments are written.
#[derive(Debug, Default)]
pub(crate) struct SelectionTracker {
    start: Option<BoundaryPoint>,
    end: Option<BoundaryPoint>,
    table: Option<TableSelection>,
}

impl SelectionTracker {
    /// Extend the range over `[start, end]`. The first call fixes the start.
    pub(crate) fn cover(&mut self, start: BoundaryPoint, end: BoundaryPoint) {
        if self.start.is_none() {
            self.start = Some(start);
        }
        self.end = Some(end);
    }

    /// Move the end of the range, keeping a start that is already known.
    pub(crate) fn extend_end(&mut self, end: BoundaryPoint) {
        if self.start.is_some() {
            self.end = Some(end);
        }
    }

    pub(crate) fn add_selected_cell(
        &mut self,
        table: NodeId,
        row: usize,
        col: usize,
    ) {
        let cell = CellCoordinates::new(row, col);
        match &mut self.table {
            Some(selection) if selection.table == table => {
                let first = &mut selection.first_cell;
                let last = &mut selection.last_cell;
                first.row = first.row.min(row);
                first.col = first.col.min(col);
                last.row = last.row.max(row);
                last.col = last.col.max(col);
            }
            Some(_) => {}
            None => self.table = Some(TableSelection::new(table, cell, cell)),
        }
    }

    pub(crate) fn into_descriptor(self) -> Option<SelectionDescriptor> {
        match (self.start, self.end, self.table) {
            (Some(start), Some(end), _) => {
                Some(RangeSelection::new(start, end).into())
            }
            (_, _, Some(table)) => Some(table.into()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn range_runs_from_first_to_last_covered_point() {
        let mut tracker = SelectionTracker::default();
        tracker.cover(
            BoundaryPoint::new(NodeId(1), 0),
            BoundaryPoint::new(NodeId(1), 3),
        );
        tracker.cover(
            BoundaryPoint::new(NodeId(2), 0),
            BoundaryPoint::new(NodeId(2), 1),
        );

        assert_eq!(
            tracker.into_descriptor(),
            Some(SelectionDescriptor::Range(RangeSelection::new(
                BoundaryPoint::new(NodeId(1), 0),
                BoundaryPoint::new(NodeId(2), 1),
            )))
        );
    }

    #[test]
    fn selected_cells_grow_a_rectangle() {
        let mut tracker = SelectionTracker::default();
        tracker.add_selected_cell(NodeId(4), 1, 2);
        tracker.add_selected_cell(NodeId(4), 0, 1);
        tracker.add_selected_cell(NodeId(4), 1, 1);

        assert_eq!(
            tracker.into_descriptor(),
            Some(SelectionDescriptor::Table(TableSelection::new(
                NodeId(4),
                CellCoordinates::new(0, 1),
                CellCoordinates::new(1, 2),
            )))
        );
    }

    #[test]
    fn nothing_selected_gives_no_selection() {
        assert_eq!(SelectionTracker::default().into_descriptor(), None);
    }

    #[test]
    fn direction_is_inherited_by_nested_blocks() {
        let mut tree = MarkupTree::new();
        let mut context = ModelToDomContext::new(&mut tree);
        let mut rtl = FormatRecord::new();
        rtl.set(FormatKey::Direction, "rtl");

        context.push_block_format(&rtl);
        context.push_block_format(&FormatRecord::new());
        assert!(context.is_right_to_left());
        context.pop_block_format();
        context.pop_block_format();
        assert!(!context.is_right_to_left());
    }
}
