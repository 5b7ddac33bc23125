// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Rendering of a content model document back into markup.
//!
//! The output is a new fragment in the document's owner tree. The caller
//! decides where to insert it. Selection state in the model becomes the
//! boundaries of the returned [`SelectionDescriptor`].

mod block_renderer;
mod context;
mod segment_renderer;
mod table_renderer;

pub use context::ModelToDomContext;

use crate::error::ContentModelError;
use crate::markup::{MarkupTree, NodeId};
use crate::model::ContentModelDocument;
use crate::model_api::validate::validate_document;
use crate::selection::SelectionDescriptor;
use block_renderer::render_blocks;

/// Result of [`render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedContent {
    /// Detached fragment holding the rendered markup.
    pub root: NodeId,
    pub selection: Option<SelectionDescriptor>,
}

/// Render `document` into the markup tree that owns it.
pub fn render(
    document: &ContentModelDocument,
) -> Result<RenderedContent, ContentModelError> {
    let owner = document
        .owner
        .upgrade()
        .ok_or(ContentModelError::OwnerDropped)?;
    let mut tree = owner
        .try_borrow_mut()
        .map_err(|_| ContentModelError::OwnerBusy)?;
    render_tree(document, &mut tree)
}

/// Render `document` into `tree`, whatever its owner.
pub fn render_tree(
    document: &ContentModelDocument,
    tree: &mut MarkupTree,
) -> Result<RenderedContent, ContentModelError> {
    validate_document(document)?;

    let root = tree.create_fragment();
    let mut context = ModelToDomContext::new(tree);
    render_blocks(&document.blocks, root, &mut context)?;

    let selection = context.selection.into_descriptor();
    tracing::debug!(
        target: "content_model::model_to_dom",
        blocks = document.blocks.len(),
        ?selection,
        "rendered document"
    );
    Ok(RenderedContent { root, selection })
}
