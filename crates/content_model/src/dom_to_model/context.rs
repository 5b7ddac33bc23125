// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::fmt;

use super::selection_mapper::SelectionBoundaries;
use crate::markup::geometry::GeometryProvider;
use crate::markup::MarkupTree;
use crate::model::{FormatKey, FormatRecord};
use crate::selection::TableSelection;

/// Settings for one conversion.
#[derive(Clone, Copy)]
pub struct ConversionOptions<'a> {
    /// Source of node measurements for the size format handler.
    pub geometry: &'a dyn GeometryProvider,
    /// Measurements are divided by this to undo the editor's zoom.
    pub zoom_scale: f64,
    /// Base direction of the content when no markup sets one.
    pub is_right_to_left: bool,
}

impl Default for ConversionOptions<'static> {
    fn default() -> Self {
        Self {
            geometry: &(),
            zoom_scale: 1.0,
            is_right_to_left: false,
        }
    }
}

impl<'a> ConversionOptions<'a> {
    pub fn with_geometry(geometry: &'a dyn GeometryProvider) -> Self {
        Self {
            geometry,
            ..ConversionOptions::default()
        }
    }

    pub fn zoom_scale(mut self, zoom_scale: f64) -> Self {
        self.zoom_scale = zoom_scale;
        self
    }

    pub fn right_to_left(mut self, is_right_to_left: bool) -> Self {
        self.is_right_to_left = is_right_to_left;
        self
    }
}

impl fmt::Debug for ConversionOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionOptions")
            .field("zoom_scale", &self.zoom_scale)
            .field("is_right_to_left", &self.is_right_to_left)
            .finish_non_exhaustive()
    }
}

/// State threaded through a single markup to model conversion.
pub struct DomToModelContext<'a> {
    pub(crate) tree: &'a MarkupTree,
    pub(crate) regular_selection: Option<SelectionBoundaries>,
    pub(crate) table_selection: Option<TableSelection>,
    pub(crate) is_in_selection: bool,
    /// Formats inherited from enclosing blocks, innermost last.
    pub(crate) block_format_stack: Vec<FormatRecord>,
    options: ConversionOptions<'a>,
}

impl<'a> DomToModelContext<'a> {
    pub(crate) fn new(
        tree: &'a MarkupTree,
        options: ConversionOptions<'a>,
    ) -> Self {
        Self {
            tree,
            regular_selection: None,
            table_selection: None,
            is_in_selection: false,
            block_format_stack: Vec::new(),
            options,
        }
    }

    pub fn tree(&self) -> &MarkupTree {
        self.tree
    }

    pub fn geometry(&self) -> &dyn GeometryProvider {
        self.options.geometry
    }

    pub fn zoom_scale(&self) -> f64 {
        self.options.zoom_scale
    }

    pub fn is_in_selection(&self) -> bool {
        self.is_in_selection
    }

    /// Direction set by the innermost enclosing block, or the base
    /// direction of the conversion.
    pub fn is_right_to_left(&self) -> bool {
        self.block_format_stack
            .iter()
            .rev()
            .find_map(|format| format.get_str(FormatKey::Direction))
            .map(|direction| direction == "rtl")
            .unwrap_or(self.options.is_right_to_left)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn direction_comes_from_the_innermost_block() {
        let tree = MarkupTree::new();
        let mut context =
            DomToModelContext::new(&tree, ConversionOptions::default());
        assert!(!context.is_right_to_left());

        let mut rtl = FormatRecord::new();
        rtl.set(FormatKey::Direction, "rtl");
        context.block_format_stack.push(rtl);
        context.block_format_stack.push(FormatRecord::new());
        assert!(context.is_right_to_left());

        let mut ltr = FormatRecord::new();
        ltr.set(FormatKey::Direction, "ltr");
        context.block_format_stack.push(ltr);
        assert!(!context.is_right_to_left());
    }

    #[test]
    fn base_direction_applies_without_markup() {
        let tree = MarkupTree::new();
        let context = DomToModelContext::new(
            &tree,
            ConversionOptions::default().right_to_left(true),
        );
        assert!(context.is_right_to_left());
    }
}
