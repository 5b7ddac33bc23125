// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Serialize, Serializer};

use super::{BlockGroupType, ContentModelBlock, FormatRecord, OpaqueElement};
use crate::markup::{MarkupTree, SharedMarkupTree};

/// Anything that owns an ordered list of blocks.
pub trait BlockGroup {
    fn block_group_type(&self) -> BlockGroupType;
    fn blocks(&self) -> &[ContentModelBlock];
    fn blocks_mut(&mut self) -> &mut Vec<ContentModelBlock>;
}

/// Non-owning link from a document to the markup tree it was built from.
#[derive(Clone, Debug, Default)]
pub struct OwnerDocument(Weak<RefCell<MarkupTree>>);

impl OwnerDocument {
    pub fn new(tree: &SharedMarkupTree) -> Self {
        Self(Rc::downgrade(tree))
    }

    /// An owner that never resolves. Rendering a document bound to it fails.
    pub fn detached() -> Self {
        Self(Weak::new())
    }

    pub fn upgrade(&self) -> Option<SharedMarkupTree> {
        self.0.upgrade()
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

/// Two owners are equal when they point at the same tree.
impl PartialEq for OwnerDocument {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl Serialize for OwnerDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_alive() {
            serializer.serialize_str("MarkupTree")
        } else {
            serializer.serialize_none()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModelDocument {
    pub blocks: Vec<ContentModelBlock>,
    #[serde(rename = "document")]
    pub owner: OwnerDocument,
}

/// Block level markup passed through unchanged, with the content found
/// inside it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModelGeneralBlock {
    pub element: OpaqueElement,
    pub blocks: Vec<ContentModelBlock>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModelTableCell {
    pub blocks: Vec<ContentModelBlock>,
    /// Continues a `colspan` from the cell on the left.
    pub span_left: bool,
    /// Continues a `rowspan` from the cell above.
    pub span_above: bool,
    pub is_header: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,
    pub format: FormatRecord,
}

impl ContentModelTableCell {
    pub fn is_selected(&self) -> bool {
        self.is_selected.unwrap_or(false)
    }

    /// True for cells that continue a span and so are not grid origins.
    pub fn is_span_continuation(&self) -> bool {
        self.span_left || self.span_above
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "blockGroupType")]
pub enum ContentModelBlockGroup {
    Document(ContentModelDocument),
    General(ContentModelGeneralBlock),
    TableCell(ContentModelTableCell),
}

macro_rules! impl_block_group {
    ($($group:ty => $kind:ident),*) => {
        $(
            impl BlockGroup for $group {
                fn block_group_type(&self) -> BlockGroupType {
                    BlockGroupType::$kind
                }

                fn blocks(&self) -> &[ContentModelBlock] {
                    &self.blocks
                }

                fn blocks_mut(&mut self) -> &mut Vec<ContentModelBlock> {
                    &mut self.blocks
                }
            }
        )*
    };
}

impl_block_group!(
    ContentModelDocument => Document,
    ContentModelGeneralBlock => General,
    ContentModelTableCell => TableCell
);

impl BlockGroup for ContentModelBlockGroup {
    fn block_group_type(&self) -> BlockGroupType {
        match self {
            ContentModelBlockGroup::Document(g) => g.block_group_type(),
            ContentModelBlockGroup::General(g) => g.block_group_type(),
            ContentModelBlockGroup::TableCell(g) => g.block_group_type(),
        }
    }

    fn blocks(&self) -> &[ContentModelBlock] {
        match self {
            ContentModelBlockGroup::Document(g) => g.blocks(),
            ContentModelBlockGroup::General(g) => g.blocks(),
            ContentModelBlockGroup::TableCell(g) => g.blocks(),
        }
    }

    fn blocks_mut(&mut self) -> &mut Vec<ContentModelBlock> {
        match self {
            ContentModelBlockGroup::Document(g) => g.blocks_mut(),
            ContentModelBlockGroup::General(g) => g.blocks_mut(),
            ContentModelBlockGroup::TableCell(g) => g.blocks_mut(),
        }
    }
}
