// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::FormatHandler;
use crate::dom_to_model::DomToModelContext;
use crate::markup::{MarkupElement, NodeId};
use crate::model::{FormatKey, FormatRecord};
use crate::model_to_dom::ModelToDomContext;

/// `direction`: `ltr` or `rtl`.
pub struct DirectionFormatHandler;

impl FormatHandler for DirectionFormatHandler {
    fn parse(
        &self,
        format: &mut FormatRecord,
        node: NodeId,
        context: &DomToModelContext,
    ) {
        if let Some(direction) =
            context.tree().element(node).and_then(element_direction)
        {
            format.set(FormatKey::Direction, direction);
        }
    }

    fn apply(
        &self,
        format: &FormatRecord,
        node: NodeId,
        context: &mut ModelToDomContext,
    ) {
        if let Some(direction) = format.get_str(FormatKey::Direction) {
            if let Some(element) = context.tree_mut().element_mut(node) {
                element.set_attr("dir", direction);
            }
        }
    }
}

/// Direction declared by the `dir` attribute, falling back to the
/// `direction` style. Values other than `ltr` and `rtl` are ignored.
pub(crate) fn element_direction(element: &MarkupElement) -> Option<&'static str> {
    let direction = element
        .get_attr("dir")
        .map(str::to_owned)
        .or_else(|| element.style("direction"))?;
    match direction.trim().to_ascii_lowercase().as_str() {
        "rtl" => Some("rtl"),
        "ltr" => Some("ltr"),
        _ => None,
    }
}
