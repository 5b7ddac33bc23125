// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Content model for a rich text editor.
//!
//! A [`MarkupTree`] (elements, text nodes and fragments) is converted into a
//! [`ContentModelDocument`] by [`convert`], edited through the model API, and
//! written back into markup by [`render`]. The editing selection travels with
//! the content in both directions.

mod debug_json;
mod dom_to_model;
mod error;
mod format_handlers;
mod markup;
mod model;
mod model_api;
mod model_to_dom;
mod selection;

pub use crate::debug_json::to_debug_json;
pub use crate::dom_to_model::{
    convert, convert_tree, ConversionOptions, DomToModelContext,
};
pub use crate::error::{ContentModelError, MarkupParseError};
pub use crate::format_handlers::{
    BackgroundColorFormatHandler, BorderFormatHandler, DirectionFormatHandler,
    FormatHandler, SizeFormatHandler, TableCellMetadataFormatHandler,
    TextAlignFormatHandler, VerticalAlignFormatHandler,
    TABLE_CELL_FORMAT_HANDLERS, TABLE_FORMAT_HANDLERS,
};
pub use crate::markup::geometry::{
    BoxSizing, FixedGeometry, GeometryProvider, NodeGeometry,
};
pub use crate::markup::{
    MarkupElement, MarkupNode, MarkupTree, NodeId, SharedMarkupTree,
};
pub use crate::model::{
    BlockGroup, BlockGroupType, BlockType, ContentModelBlock,
    ContentModelBlockGroup, ContentModelBr, ContentModelDocument,
    ContentModelGeneralBlock, ContentModelGeneralSegment,
    ContentModelParagraph, ContentModelSegment, ContentModelSelectionMarker,
    ContentModelTable, ContentModelTableCell, ContentModelText, FormatKey,
    FormatRecord, FormatValue, OpaqueElement, OwnerDocument, SegmentType,
};
pub use crate::model_api::common::{
    add_block, add_segment, add_selection_marker,
};
pub use crate::model_api::creators::{
    create_br, create_content_model_document, create_general_block,
    create_general_segment, create_paragraph, create_selection_marker,
    create_table, create_table_cell, create_text,
};
pub use crate::model_api::selection::{
    get_selected_segments, has_selection_in_block,
    has_selection_in_block_group, has_selection_in_segment,
};
pub use crate::model_api::validate::{validate_document, validate_table};
pub use crate::model_to_dom::{
    render, render_tree, ModelToDomContext, RenderedContent,
};
pub use crate::selection::{
    BoundaryPoint, CellCoordinates, RangeSelection, SelectionDescriptor,
    TableSelection,
};
