// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::{format_pixels, parse_pixels, FormatHandler};
use crate::dom_to_model::DomToModelContext;
use crate::markup::geometry::BoxSizing;
use crate::markup::NodeId;
use crate::model::{FormatKey, FormatRecord};
use crate::model_to_dom::ModelToDomContext;

/// `width`, `height` and `useBorderBox`.
///
/// Sizes come from the host's measurement of the node. A node with no
/// layout falls back to the sizes declared in its inline style. A size of
/// zero means "no intrinsic size" and is never recorded.
pub struct SizeFormatHandler;

impl FormatHandler for SizeFormatHandler {
    fn parse(
        &self,
        format: &mut FormatRecord,
        node: NodeId,
        context: &DomToModelContext,
    ) {
        let Some(element) = context.tree().element(node) else {
            return;
        };
        let declared_border_box =
            element.contains_style("box-sizing", BoxSizing::BorderBox.as_ref());

        let (width, height, border_box) =
            match context.geometry().measure(context.tree(), node) {
                Some(geometry) => {
                    let zoom = if context.zoom_scale() > 0.0 {
                        context.zoom_scale()
                    } else {
                        1.0
                    };
                    (
                        geometry.width / zoom,
                        geometry.height / zoom,
                        geometry.box_sizing == BoxSizing::BorderBox
                            || declared_border_box,
                    )
                }
                None => (
                    element
                        .style("width")
                        .and_then(|w| parse_pixels(&w))
                        .unwrap_or(0.0),
                    element
                        .style("height")
                        .and_then(|h| parse_pixels(&h))
                        .unwrap_or(0.0),
                    declared_border_box,
                ),
            };

        if width > 0.0 {
            format.set(FormatKey::Width, width);
        }
        if height > 0.0 {
            format.set(FormatKey::Height, height);
        }
        if width <= 0.0 && height <= 0.0 && border_box {
            format.set(FormatKey::UseBorderBox, true);
        }
    }

    fn apply(
        &self,
        format: &FormatRecord,
        node: NodeId,
        context: &mut ModelToDomContext,
    ) {
        let Some(element) = context.tree_mut().element_mut(node) else {
            return;
        };
        if format.get_bool(FormatKey::UseBorderBox) == Some(true) {
            element.set_style("box-sizing", BoxSizing::BorderBox.as_ref());
            return;
        }
        if let Some(width) = format.get_number(FormatKey::Width) {
            if width > 0.0 {
                element.set_style("width", &format_pixels(width));
            }
        }
        if let Some(height) = format.get_number(FormatKey::Height) {
            if height > 0.0 {
                element.set_style("height", &format_pixels(height));
            }
        }
    }
}
