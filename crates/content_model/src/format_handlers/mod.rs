// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Rules mapping presentational markup to format records and back.
//!
//! Every handler owns a fixed set of [`FormatKey`]s. `parse` only ever adds
//! its own keys and `apply` writes nothing for keys that are absent, so the
//! handlers of a list can run one after the other without interfering.
//!
//! [`FormatKey`]: crate::model::FormatKey

mod background_color;
mod border;
mod direction;
mod size;
mod table_cell_metadata;
mod text_align;
mod vertical_align;

pub use background_color::BackgroundColorFormatHandler;
pub use border::BorderFormatHandler;
pub(crate) use direction::element_direction;
pub use direction::DirectionFormatHandler;
pub use size::SizeFormatHandler;
pub use table_cell_metadata::TableCellMetadataFormatHandler;
pub use text_align::TextAlignFormatHandler;
pub use vertical_align::VerticalAlignFormatHandler;

use crate::dom_to_model::DomToModelContext;
use crate::markup::NodeId;
use crate::model::FormatRecord;
use crate::model_to_dom::ModelToDomContext;

pub trait FormatHandler: Sync {
    /// Read the keys this handler owns from `node` into `format`.
    fn parse(
        &self,
        format: &mut FormatRecord,
        node: NodeId,
        context: &DomToModelContext,
    );

    /// Write the keys this handler owns from `format` onto `node`.
    fn apply(
        &self,
        format: &FormatRecord,
        node: NodeId,
        context: &mut ModelToDomContext,
    );
}

pub static TABLE_CELL_FORMAT_HANDLERS: &[&dyn FormatHandler] = &[
    &SizeFormatHandler,
    &BorderFormatHandler,
    &BackgroundColorFormatHandler,
    &TextAlignFormatHandler,
    &VerticalAlignFormatHandler,
    &TableCellMetadataFormatHandler,
];

pub static TABLE_FORMAT_HANDLERS: &[&dyn FormatHandler] = &[
    &SizeFormatHandler,
    &BorderFormatHandler,
    &BackgroundColorFormatHandler,
    &DirectionFormatHandler,
];

pub(crate) fn parse_format(
    handlers: &[&dyn FormatHandler],
    node: NodeId,
    context: &DomToModelContext,
) -> FormatRecord {
    let mut format = FormatRecord::new();
    for handler in handlers {
        handler.parse(&mut format, node, context);
    }
    format
}

pub(crate) fn apply_format(
    handlers: &[&dyn FormatHandler],
    format: &FormatRecord,
    node: NodeId,
    context: &mut ModelToDomContext,
) {
    for handler in handlers {
        handler.apply(format, node, context);
    }
}

/// Parse a CSS pixel length such as `10px` or `12.5`.
pub(crate) fn parse_pixels(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Write a number without a trailing `.0` when it is whole.
pub(crate) fn format_pixels(value: f64) -> String {
    format!("{value}px")
}
