// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Format records.
//!
//! A format record is a flat map from a [`FormatKey`] to a primitive
//! [`FormatValue`]. Values cannot hold other values, so cloning a record is
//! always a complete one-level copy and two records never share state.

use std::collections::BTreeMap;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FormatKey {
    Width,
    Height,
    UseBorderBox,
    BorderTop,
    BorderRight,
    BorderBottom,
    BorderLeft,
    BackgroundColor,
    TextAlign,
    VerticalAlign,
    Direction,
    BgColorOverride,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FormatValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for FormatValue {
    fn from(value: bool) -> Self {
        FormatValue::Bool(value)
    }
}

impl From<f64> for FormatValue {
    fn from(value: f64) -> Self {
        FormatValue::Number(value)
    }
}

impl From<&str> for FormatValue {
    fn from(value: &str) -> Self {
        FormatValue::Text(value.to_owned())
    }
}

impl From<String> for FormatValue {
    fn from(value: String) -> Self {
        FormatValue::Text(value)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormatRecord(BTreeMap<FormatKey, FormatValue>);

impl FormatRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains_key(&self, key: FormatKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn get(&self, key: FormatKey) -> Option<&FormatValue> {
        self.0.get(&key)
    }

    pub fn get_number(&self, key: FormatKey) -> Option<f64> {
        match self.0.get(&key) {
            Some(FormatValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: FormatKey) -> Option<bool> {
        match self.0.get(&key) {
            Some(FormatValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn get_str(&self, key: FormatKey) -> Option<&str> {
        match self.0.get(&key) {
            Some(FormatValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn set(&mut self, key: FormatKey, value: impl Into<FormatValue>) {
        self.0.insert(key, value.into());
    }

    pub fn remove(&mut self, key: FormatKey) -> Option<FormatValue> {
        self.0.remove(&key)
    }

    /// Overwrite keys present in `other`, leaving every other key alone.
    pub fn merge(&mut self, other: &FormatRecord) {
        for (key, value) in &other.0 {
            self.0.insert(*key, value.clone());
        }
    }

    /// One-level copy. Equivalent to `clone`, named for call sites that
    /// derive a new record from an inherited one.
    pub fn shallow_clone(&self) -> FormatRecord {
        self.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormatKey, &FormatValue)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

impl FromIterator<(FormatKey, FormatValue)> for FormatRecord {
    fn from_iter<T: IntoIterator<Item = (FormatKey, FormatValue)>>(
        iter: T,
    ) -> Self {
        Self(iter.into_iter().collect())
    }
}
