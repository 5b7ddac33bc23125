// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::{Deserialize, Serialize};

use super::FormatHandler;
use crate::dom_to_model::DomToModelContext;
use crate::markup::NodeId;
use crate::model::{FormatKey, FormatRecord};
use crate::model_to_dom::ModelToDomContext;

const EDITING_INFO_ATTRIBUTE: &str = "data-editing-info";

/// Editor state stored on a cell as JSON, e.g. `{"bgColorOverride":true}`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct TableCellMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bg_color_override: Option<bool>,
}

pub struct TableCellMetadataFormatHandler;

impl FormatHandler for TableCellMetadataFormatHandler {
    fn parse(
        &self,
        format: &mut FormatRecord,
        node: NodeId,
        context: &DomToModelContext,
    ) {
        let Some(info) = context
            .tree()
            .element(node)
            .and_then(|e| e.get_attr(EDITING_INFO_ATTRIBUTE))
        else {
            return;
        };
        match serde_json::from_str::<TableCellMetadata>(info) {
            Ok(metadata) => {
                if let Some(value) = metadata.bg_color_override {
                    format.set(FormatKey::BgColorOverride, value);
                }
            }
            Err(e) => tracing::debug!(
                target: "content_model::format_handlers",
                node = ?node,
                error = %e,
                "ignoring unreadable table cell metadata"
            ),
        }
    }

    fn apply(
        &self,
        format: &FormatRecord,
        node: NodeId,
        context: &mut ModelToDomContext,
    ) {
        let metadata = TableCellMetadata {
            bg_color_override: format.get_bool(FormatKey::BgColorOverride),
        };
        if metadata.bg_color_override.is_none() {
            return;
        }
        match serde_json::to_string(&metadata) {
            Ok(json) => {
                if let Some(element) = context.tree_mut().element_mut(node) {
                    element.set_attr(EDITING_INFO_ATTRIBUTE, &json);
                }
            }
            Err(e) => tracing::debug!(
                target: "content_model::format_handlers",
                error = %e,
                "failed to write table cell metadata"
            ),
        }
    }
}
