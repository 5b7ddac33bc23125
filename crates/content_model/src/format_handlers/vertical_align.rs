// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::FormatHandler;
use crate::dom_to_model::DomToModelContext;
use crate::markup::NodeId;
use crate::model::{FormatKey, FormatRecord};
use crate::model_to_dom::ModelToDomContext;

/// `verticalAlign`: `top`, `middle` or `bottom`.
pub struct VerticalAlignFormatHandler;

impl FormatHandler for VerticalAlignFormatHandler {
    fn parse(
        &self,
        format: &mut FormatRecord,
        node: NodeId,
        context: &DomToModelContext,
    ) {
        let Some(element) = context.tree().element(node) else {
            return;
        };
        let align = element
            .style("vertical-align")
            .or_else(|| element.get_attr("valign").map(str::to_owned));
        let align = match align.map(|a| a.trim().to_ascii_lowercase()) {
            Some(a) if a == "top" => "top",
            Some(a) if a == "middle" || a == "center" => "middle",
            Some(a) if a == "bottom" => "bottom",
            _ => return,
        };
        format.set(FormatKey::VerticalAlign, align);
    }

    fn apply(
        &self,
        format: &FormatRecord,
        node: NodeId,
        context: &mut ModelToDomContext,
    ) {
        if let Some(align) = format.get_str(FormatKey::VerticalAlign) {
            if let Some(element) = context.tree_mut().element_mut(node) {
                element.set_style("vertical-align", align);
            }
        }
    }
}
