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

const SIDES: [(FormatKey, &str); 4] = [
    (FormatKey::BorderTop, "border-top"),
    (FormatKey::BorderRight, "border-right"),
    (FormatKey::BorderBottom, "border-bottom"),
    (FormatKey::BorderLeft, "border-left"),
];

/// One key per side, holding the side's `border` shorthand value.
pub struct BorderFormatHandler;

impl FormatHandler for BorderFormatHandler {
    fn parse(
        &self,
        format: &mut FormatRecord,
        node: NodeId,
        context: &DomToModelContext,
    ) {
        let Some(element) = context.tree().element(node) else {
            return;
        };
        let shorthand = element.style("border");
        for (key, property) in SIDES {
            if let Some(value) = element.style(property).or(shorthand.clone()) {
                format.set(key, value.trim());
            }
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
        let values: Vec<Option<&str>> =
            SIDES.iter().map(|(key, _)| format.get_str(*key)).collect();

        // Four equal sides collapse back into the shorthand
        if let Some(first) = values[0] {
            if values.iter().all(|v| *v == Some(first)) {
                element.set_style("border", first);
                return;
            }
        }
        for ((_, property), value) in SIDES.iter().zip(values) {
            if let Some(value) = value {
                element.set_style(property, value);
            }
        }
    }
}
