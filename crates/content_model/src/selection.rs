// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Selections expressed in terms of markup tree nodes.

use crate::markup::NodeId;

/// A position inside a markup node. For text nodes `offset` counts UTF-16
/// code units, for any other node it is a child index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    pub container: NodeId,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(container: NodeId, offset: usize) -> Self {
        Self { container, offset }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RangeSelection {
    pub start: BoundaryPoint,
    pub end: BoundaryPoint,
    pub is_selection_collapsed: bool,
}

impl RangeSelection {
    pub fn new(start: BoundaryPoint, end: BoundaryPoint) -> Self {
        Self {
            start,
            end,
            is_selection_collapsed: start == end,
        }
    }

    pub fn collapsed(at: BoundaryPoint) -> Self {
        Self::new(at, at)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellCoordinates {
    pub row: usize,
    pub col: usize,
}

impl CellCoordinates {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangle of table cells. The corners may be given in any order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableSelection {
    pub table: NodeId,
    pub first_cell: CellCoordinates,
    pub last_cell: CellCoordinates,
}

impl TableSelection {
    pub fn new(
        table: NodeId,
        first_cell: CellCoordinates,
        last_cell: CellCoordinates,
    ) -> Self {
        Self {
            table,
            first_cell,
            last_cell,
        }
    }

    /// Whether `(row, col)` lies inside the selected rectangle.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        let (top, bottom) = min_max(self.first_cell.row, self.last_cell.row);
        let (left, right) = min_max(self.first_cell.col, self.last_cell.col);
        (top..=bottom).contains(&row) && (left..=right).contains(&col)
    }
}

fn min_max(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionDescriptor {
    Range(RangeSelection),
    Table(TableSelection),
}

impl From<RangeSelection> for SelectionDescriptor {
    fn from(range: RangeSelection) -> Self {
        SelectionDescriptor::Range(range)
    }
}

impl From<TableSelection> for SelectionDescriptor {
    fn from(table: TableSelection) -> Self {
        SelectionDescriptor::Table(table)
    }
}
