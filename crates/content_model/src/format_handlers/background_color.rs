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

pub struct BackgroundColorFormatHandler;

impl FormatHandler for BackgroundColorFormatHandler {
    fn parse(
        &self,
        format: &mut FormatRecord,
        node: NodeId,
        context: &DomToModelContext,
    ) {
        let Some(element) = context.tree().element(node) else {
            return;
        };
        let color = element
            .style("background-color")
            .or_else(|| element.get_attr("bgcolor").map(str::to_owned));
        if let Some(color) = color.filter(|c| !c.trim().is_empty()) {
            format.set(FormatKey::BackgroundColor, color.trim());
        }
    }

    fn apply(
        &self,
        format: &FormatRecord,
        node: NodeId,
        context: &mut ModelToDomContext,
    ) {
        if let Some(color) = format.get_str(FormatKey::BackgroundColor) {
            if let Some(element) = context.tree_mut().element_mut(node) {
                element.set_style("background-color", color);
            }
        }
    }
}
