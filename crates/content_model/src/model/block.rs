// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::Serialize;

use super::{
    BlockType, ContentModelBlockGroup, ContentModelGeneralBlock,
    ContentModelSegment, ContentModelTableCell, FormatRecord,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "blockType")]
pub enum ContentModelBlock {
    Paragraph(ContentModelParagraph),
    Table(ContentModelTable),
    BlockGroup(ContentModelBlockGroup),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModelParagraph {
    pub segments: Vec<ContentModelSegment>,
    /// `Some(true)` when the paragraph only exists to hold inline content
    /// that had no block of its own. Never `Some(false)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_implicit: Option<bool>,
}

impl ContentModelParagraph {
    pub fn is_implicit(&self) -> bool {
        self.is_implicit.unwrap_or(false)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModelTable {
    pub cells: Vec<Vec<ContentModelTableCell>>,
    pub format: FormatRecord,
}

impl ContentModelTable {
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Width of the first row. Rectangular tables have the same width on
    /// every row.
    pub fn column_count(&self) -> usize {
        self.cells.first().map(Vec::len).unwrap_or(0)
    }
}

impl ContentModelBlock {
    pub fn block_type(&self) -> BlockType {
        match self {
            ContentModelBlock::Paragraph(_) => BlockType::Paragraph,
            ContentModelBlock::Table(_) => BlockType::Table,
            ContentModelBlock::BlockGroup(_) => BlockType::BlockGroup,
        }
    }

    pub fn as_paragraph(&self) -> Option<&ContentModelParagraph> {
        match self {
            ContentModelBlock::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    pub fn as_paragraph_mut(&mut self) -> Option<&mut ContentModelParagraph> {
        match self {
            ContentModelBlock::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }
}

impl From<ContentModelParagraph> for ContentModelBlock {
    fn from(paragraph: ContentModelParagraph) -> Self {
        ContentModelBlock::Paragraph(paragraph)
    }
}

impl From<ContentModelTable> for ContentModelBlock {
    fn from(table: ContentModelTable) -> Self {
        ContentModelBlock::Table(table)
    }
}

impl From<ContentModelBlockGroup> for ContentModelBlock {
    fn from(group: ContentModelBlockGroup) -> Self {
        ContentModelBlock::BlockGroup(group)
    }
}

impl From<ContentModelGeneralBlock> for ContentModelBlock {
    fn from(group: ContentModelGeneralBlock) -> Self {
        ContentModelBlock::BlockGroup(ContentModelBlockGroup::General(group))
    }
}

impl From<ContentModelTableCell> for ContentModelBlock {
    fn from(group: ContentModelTableCell) -> Self {
        ContentModelBlock::BlockGroup(ContentModelBlockGroup::TableCell(group))
    }
}
