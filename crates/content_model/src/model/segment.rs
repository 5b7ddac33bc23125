// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::Serialize;

use super::{
    BlockGroup, BlockGroupType, ContentModelBlock, OpaqueElement, SegmentType,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "segmentType")]
pub enum ContentModelSegment {
    Text(ContentModelText),
    SelectionMarker(ContentModelSelectionMarker),
    Br(ContentModelBr),
    General(ContentModelGeneralSegment),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModelText {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,
}

/// A zero-width segment marking a collapsed selection.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModelSelectionMarker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModelBr {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,
}

/// Inline markup passed through unchanged, with the content found inside it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModelGeneralSegment {
    pub element: OpaqueElement,
    pub blocks: Vec<ContentModelBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_selected: Option<bool>,
}

impl BlockGroup for ContentModelGeneralSegment {
    fn block_group_type(&self) -> BlockGroupType {
        BlockGroupType::General
    }

    fn blocks(&self) -> &[ContentModelBlock] {
        &self.blocks
    }

    fn blocks_mut(&mut self) -> &mut Vec<ContentModelBlock> {
        &mut self.blocks
    }
}

impl ContentModelSegment {
    pub fn segment_type(&self) -> SegmentType {
        match self {
            ContentModelSegment::Text(_) => SegmentType::Text,
            ContentModelSegment::SelectionMarker(_) => {
                SegmentType::SelectionMarker
            }
            ContentModelSegment::Br(_) => SegmentType::Br,
            ContentModelSegment::General(_) => SegmentType::General,
        }
    }

    fn is_selected_flag(&self) -> &Option<bool> {
        match self {
            ContentModelSegment::Text(s) => &s.is_selected,
            ContentModelSegment::SelectionMarker(s) => &s.is_selected,
            ContentModelSegment::Br(s) => &s.is_selected,
            ContentModelSegment::General(s) => &s.is_selected,
        }
    }

    fn is_selected_flag_mut(&mut self) -> &mut Option<bool> {
        match self {
            ContentModelSegment::Text(s) => &mut s.is_selected,
            ContentModelSegment::SelectionMarker(s) => &mut s.is_selected,
            ContentModelSegment::Br(s) => &mut s.is_selected,
            ContentModelSegment::General(s) => &mut s.is_selected,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected_flag().unwrap_or(false)
    }

    /// Mark the segment selected, or remove the flag entirely.
    pub fn set_selected(&mut self, selected: bool) {
        *self.is_selected_flag_mut() = selected.then_some(true);
    }

    pub fn as_text(&self) -> Option<&ContentModelText> {
        match self {
            ContentModelSegment::Text(text) => Some(text),
            _ => None,
        }
    }
}

macro_rules! impl_from_segment {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl From<$ty> for ContentModelSegment {
                fn from(segment: $ty) -> Self {
                    ContentModelSegment::$variant(segment)
                }
            }
        )*
    };
}

impl_from_segment!(
    ContentModelText => Text,
    ContentModelSelectionMarker => SelectionMarker,
    ContentModelBr => Br,
    ContentModelGeneralSegment => General
);
