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

/// `textAlign`, stored relative to the text direction: `start`, `center`,
/// `end` or `justify`.
pub struct TextAlignFormatHandler;

fn is_rtl(format: &FormatRecord, inherited: bool) -> bool {
    format
        .get_str(FormatKey::Direction)
        .map(|direction| direction == "rtl")
        .unwrap_or(inherited)
}

fn to_logical(align: &str, rtl: bool) -> Option<&'static str> {
    match align.trim().to_ascii_lowercase().as_str() {
        "left" => Some(if rtl { "end" } else { "start" }),
        "right" => Some(if rtl { "start" } else { "end" }),
        "start" => Some("start"),
        "end" => Some("end"),
        "center" | "middle" => Some("center"),
        "justify" => Some("justify"),
        _ => None,
    }
}

fn to_physical(align: &str, rtl: bool) -> Option<&'static str> {
    match align {
        "start" => Some(if rtl { "right" } else { "left" }),
        "end" => Some(if rtl { "left" } else { "right" }),
        "center" => Some("center"),
        "justify" => Some("justify"),
        _ => None,
    }
}

impl FormatHandler for TextAlignFormatHandler {
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
            .style("text-align")
            .or_else(|| element.get_attr("align").map(str::to_owned));
        let rtl = is_rtl(format, context.is_right_to_left());
        if let Some(align) = align.and_then(|a| to_logical(&a, rtl)) {
            format.set(FormatKey::TextAlign, align);
        }
    }

    fn apply(
        &self,
        format: &FormatRecord,
        node: NodeId,
        context: &mut ModelToDomContext,
    ) {
        let rtl = is_rtl(format, context.is_right_to_left());
        let Some(align) = format
            .get_str(FormatKey::TextAlign)
            .and_then(|a| to_physical(a, rtl))
        else {
            return;
        };
        if let Some(element) = context.tree_mut().element_mut(node) {
            element.set_style("text-align", align);
        }
    }
}
