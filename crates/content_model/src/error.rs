// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::markup::{MarkupTree, NodeId};

/// Errors reported by tree mutation, conversion and rendering.
///
/// Messy input markup never produces one of these: conversion recovers from
/// it locally. They are reserved for broken handles and for models whose
/// invariants were violated after construction.
#[derive(Debug, thiserror::Error)]
pub enum ContentModelError {
    #[error("node {0:?} does not belong to this markup tree")]
    UnknownNode(NodeId),

    #[error("node {0:?} cannot have children")]
    NotAContainer(NodeId),

    #[error("appending {child:?} to {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    #[error("node {reference:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, reference: NodeId },

    #[error("the markup tree owning this document has been dropped")]
    OwnerDropped,

    #[error("the markup tree owning this document is already borrowed")]
    OwnerBusy,

    #[error("table row {row} has {actual} cells, expected {expected}")]
    RaggedTable {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error(
        "table cell at row {row}, column {col} continues a span with no origin cell"
    )]
    OrphanSpanCell { row: usize, col: usize },

    #[error("failed to serialize the content model: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The HTML parser reported problems.
///
/// The parser is lenient, so `tree` still holds its best effort at the
/// document and callers may choose to carry on with it.
#[derive(Debug, thiserror::Error)]
#[error("failed to parse markup: {}", .parse_errors.join("; "))]
pub struct MarkupParseError {
    pub tree: MarkupTree,
    pub parse_errors: Vec<String>,
}
