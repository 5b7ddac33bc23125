// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Content model types.
//!
//! The model is a tree of plain owned values. Blocks and segments are closed
//! sum types; the `*Type` enums give each variant a stable code and name used
//! by serialized forms, independent of how the variants are laid out in
//! memory.

mod block;
mod block_group;
mod format;
mod opaque_element;
mod segment;

use strum_macros::{AsRefStr, Display, EnumString, FromRepr};

pub use block::{ContentModelBlock, ContentModelParagraph, ContentModelTable};
pub use block_group::{
    BlockGroup, ContentModelBlockGroup, ContentModelDocument,
    ContentModelGeneralBlock, ContentModelTableCell, OwnerDocument,
};
pub use format::{FormatKey, FormatRecord, FormatValue};
pub use opaque_element::OpaqueElement;
pub use segment::{
    ContentModelBr, ContentModelGeneralSegment, ContentModelSegment,
    ContentModelSelectionMarker, ContentModelText,
};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumString,
    FromRepr,
)]
#[repr(u8)]
pub enum BlockType {
    Paragraph = 0,
    Table = 1,
    BlockGroup = 2,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumString,
    FromRepr,
)]
#[repr(u8)]
pub enum BlockGroupType {
    Document = 0,
    General = 1,
    TableCell = 2,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumString,
    FromRepr,
)]
#[repr(u8)]
pub enum SegmentType {
    Text = 0,
    Br = 1,
    SelectionMarker = 2,
    General = 3,
}

macro_rules! impl_code {
    ($($kind:ty),*) => {
        $(
            impl $kind {
                /// Stable numeric code for persisted forms.
                pub fn code(self) -> u8 {
                    self as u8
                }
            }
        )*
    };
}

impl_code!(BlockType, BlockGroupType, SegmentType);
