// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use serde::Serialize;
use serde_json::Value;

use crate::error::ContentModelError;

const MAX_STRING_LENGTH: usize = 100;
const TRUNCATED_LENGTH: usize = 97;

/// Pretty printed JSON of a model value for logs and test failures.
///
/// Elements appear as a one line summary of their opening tag and long
/// strings are shortened, so the output stays readable for large documents.
pub fn to_debug_json<T: Serialize + ?Sized>(
    value: &T,
) -> Result<String, ContentModelError> {
    let mut json = serde_json::to_value(value)?;
    truncate_strings(&mut json);
    Ok(serde_json::to_string_pretty(&json)?)
}

fn truncate_strings(value: &mut Value) {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_LENGTH => {
            let mut short: String = s.chars().take(TRUNCATED_LENGTH).collect();
            short.push_str("...");
            *s = short;
        }
        Value::Array(items) => items.iter_mut().for_each(truncate_strings),
        Value::Object(map) => map.values_mut().for_each(truncate_strings),
        _ => {}
    }
}
