// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Checks for invariants that a model built by the converter always holds
//! but a hand-built or externally mutated one may not.
//!
//! Violations are reported, never repaired.

use crate::error::ContentModelError;
use crate::model::{
    BlockGroup, ContentModelBlock, ContentModelSegment, ContentModelTable,
};

pub fn validate_document<G: BlockGroup + ?Sized>(
    group: &G,
) -> Result<(), ContentModelError> {
    validate_blocks(group.blocks())
}

fn validate_blocks(blocks: &[ContentModelBlock]) -> Result<(), ContentModelError> {
    for block in blocks {
        match block {
            ContentModelBlock::Paragraph(paragraph) => {
                for segment in &paragraph.segments {
                    if let ContentModelSegment::General(general) = segment {
                        validate_blocks(&general.blocks)?;
                    }
                }
            }
            ContentModelBlock::Table(table) => validate_table(table)?,
            ContentModelBlock::BlockGroup(group) => {
                validate_blocks(group.blocks())?
            }
        }
    }
    Ok(())
}

/// A table must be rectangular, and every continuation cell must have a
/// cell on the side it continues from.
pub fn validate_table(table: &ContentModelTable) -> Result<(), ContentModelError> {
    let expected = table.column_count();
    for (row, cells) in table.cells.iter().enumerate() {
        if cells.len() != expected {
            return Err(ContentModelError::RaggedTable {
                row,
                expected,
                actual: cells.len(),
            });
        }
        for (col, cell) in cells.iter().enumerate() {
            if (cell.span_left && col == 0) || (cell.span_above && row == 0) {
                return Err(ContentModelError::OrphanSpanCell { row, col });
            }
            validate_blocks(&cell.blocks)?;
        }
    }
    Ok(())
}
