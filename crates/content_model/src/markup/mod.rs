// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The markup tree consumed and produced by the converters.
//!
//! All nodes are owned by a single arena inside [`MarkupTree`] and refer to
//! each other through [`NodeId`] handles. Nodes are never freed: a node that
//! is removed from its parent stays in the arena, detached, and may be
//! appended somewhere else later.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ContentModelError;

pub mod geometry;
mod markup_element;
pub(crate) mod to_html;

cfg_if::cfg_if! {
    if #[cfg(feature = "sys")] {
        mod markup_creator;
    }
}

pub use markup_element::MarkupElement;

/// A markup tree shared between the editor host and the documents converted
/// from it. Documents keep a weak reference so they can create nodes when
/// they are rendered.
pub type SharedMarkupTree = Rc<RefCell<MarkupTree>>;

/// Handle to a node inside a [`MarkupTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Clone, Debug, PartialEq)]
pub enum MarkupNode {
    Fragment(Vec<NodeId>),
    Element(MarkupElement),
    Text(String),
    /// Comments and processing instructions. They carry no content for the
    /// model and are skipped by the converter.
    Comment(String),
}

impl MarkupNode {
    fn children(&self) -> &[NodeId] {
        match self {
            MarkupNode::Fragment(children) => children,
            MarkupNode::Element(element) => &element.children,
            MarkupNode::Text(_) | MarkupNode::Comment(_) => &[],
        }
    }

    fn children_mut(&mut self) -> Option<&mut Vec<NodeId>> {
        match self {
            MarkupNode::Fragment(children) => Some(children),
            MarkupNode::Element(element) => Some(&mut element.children),
            MarkupNode::Text(_) | MarkupNode::Comment(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkupTree {
    nodes: Vec<MarkupNode>,
    parents: Vec<Option<NodeId>>,
}

impl Default for MarkupTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupTree {
    /// Create a tree holding a single empty fragment as its root.
    pub fn new() -> Self {
        Self {
            nodes: vec![MarkupNode::Fragment(Vec::new())],
            parents: vec![None],
        }
    }

    pub fn into_shared(self) -> SharedMarkupTree {
        Rc::new(RefCell::new(self))
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&MarkupNode> {
        self.nodes.get(id.0)
    }

    pub fn element(&self, id: NodeId) -> Option<&MarkupElement> {
        match self.nodes.get(id.0) {
            Some(MarkupNode::Element(element)) => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut MarkupElement> {
        match self.nodes.get_mut(id.0) {
            Some(MarkupNode::Element(element)) => Some(element),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id.0) {
            Some(MarkupNode::Text(content)) => Some(content),
            _ => None,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents.get(id.0).copied().flatten()
    }

    /// Children of `id` in document order; empty for leaves and unknown
    /// handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id.0).map(MarkupNode::children).unwrap_or(&[])
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|child| *child == id)
    }

    /// The DOM notion of node length: UTF-16 code units for character data,
    /// the number of children otherwise.
    pub fn node_length(&self, id: NodeId) -> usize {
        match self.nodes.get(id.0) {
            Some(MarkupNode::Text(content))
            | Some(MarkupNode::Comment(content)) => {
                content.encode_utf16().count()
            }
            Some(node) => node.children().len(),
            None => 0,
        }
    }

    /// Concatenated text of all descendant text nodes. Empty for unknown
    /// handles.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match self.get(id) {
            Some(MarkupNode::Text(content)) => out.push_str(content),
            Some(MarkupNode::Comment(_)) | None => {}
            Some(node) => {
                for child in node.children() {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    pub(crate) fn add_node(&mut self, node: MarkupNode) -> NodeId {
        self.nodes.push(node);
        self.parents.push(None);
        NodeId(self.nodes.len() - 1)
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.add_node(MarkupNode::Element(MarkupElement::new(tag)))
    }

    pub fn create_element_with_attrs(
        &mut self,
        tag: &str,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        let mut element = MarkupElement::new(tag);
        element.attrs = attrs;
        self.add_node(MarkupNode::Element(element))
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.add_node(MarkupNode::Text(content.to_owned()))
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.add_node(MarkupNode::Fragment(Vec::new()))
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.add_node(MarkupNode::Comment(content.to_owned()))
    }

    /// True when `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn check_can_adopt(
        &self,
        parent: NodeId,
        child: NodeId,
    ) -> Result<(), ContentModelError> {
        if !self.contains(parent) {
            return Err(ContentModelError::UnknownNode(parent));
        }
        if !self.contains(child) {
            return Err(ContentModelError::UnknownNode(child));
        }
        if !matches!(
            self.get(parent),
            Some(MarkupNode::Fragment(_) | MarkupNode::Element(_))
        ) {
            return Err(ContentModelError::NotAContainer(parent));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(ContentModelError::Cycle { parent, child });
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// current parent first.
    pub fn append_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
    ) -> Result<(), ContentModelError> {
        self.check_can_adopt(parent, child)?;
        self.remove_from_parent(child);
        if let Some(children) = self.nodes[parent.0].children_mut() {
            children.push(child);
        }
        self.parents[child.0] = Some(parent);
        Ok(())
    }

    /// Insert `child` into `parent` immediately before `reference`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), ContentModelError> {
        self.check_can_adopt(parent, child)?;
        if self.parent(reference) != Some(parent) {
            return Err(ContentModelError::NotAChild { parent, reference });
        }
        self.remove_from_parent(child);
        if let Some(children) = self.nodes[parent.0].children_mut() {
            let index = children
                .iter()
                .position(|c| *c == reference)
                .unwrap_or(children.len());
            children.insert(index, child);
        }
        self.parents[child.0] = Some(parent);
        Ok(())
    }

    /// Detach `id` from its parent. Detached nodes stay in the arena.
    pub fn remove_from_parent(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(children) = self.nodes[parent.0].children_mut() {
            children.retain(|c| *c != id);
        }
        self.parents[id.0] = None;
    }

    /// Move every child of `from` to the end of `to`, keeping their order.
    pub fn reparent_children(
        &mut self,
        from: NodeId,
        to: NodeId,
    ) -> Result<(), ContentModelError> {
        let children = self.children(from).to_vec();
        for child in children {
            self.append_child(to, child)?;
        }
        Ok(())
    }

    /// The top-most ancestor of `id` and the child indexes leading from it
    /// down to `id`.
    pub(crate) fn path(&self, id: NodeId) -> Option<(NodeId, Vec<usize>)> {
        if !self.contains(id) {
            return None;
        }
        let mut path = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            path.push(self.index_in_parent(current)?);
            current = parent;
        }
        path.reverse();
        Some((current, path))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tree_with_div() -> (MarkupTree, NodeId) {
        let mut tree = MarkupTree::new();
        let div = tree.create_element("DIV");
        tree.append_child(tree.root(), div).unwrap();
        (tree, div)
    }

    #[test]
    fn element_tags_are_lower_cased() {
        let (tree, div) = tree_with_div();
        assert_eq!(tree.element(div).unwrap().tag(), "div");
    }

    #[test]
    fn appending_moves_a_node_between_parents() {
        let (mut tree, div) = tree_with_div();
        let span = tree.create_element("span");
        tree.append_child(div, span).unwrap();
        tree.append_child(tree.root(), span).unwrap();

        assert!(tree.children(div).is_empty());
        assert_eq!(tree.children(tree.root()), &[div, span]);
        assert_eq!(tree.parent(span), Some(tree.root()));
    }

    #[test]
    fn appending_an_ancestor_is_rejected() {
        let (mut tree, div) = tree_with_div();
        let root = tree.root();
        assert!(matches!(
            tree.append_child(div, root),
            Err(ContentModelError::Cycle { .. })
        ));
    }

    #[test]
    fn text_nodes_cannot_have_children() {
        let (mut tree, div) = tree_with_div();
        let text = tree.create_text("abc");
        let span = tree.create_element("span");
        tree.append_child(div, text).unwrap();
        assert!(matches!(
            tree.append_child(text, span),
            Err(ContentModelError::NotAContainer(_))
        ));
    }

    #[test]
    fn insert_before_places_the_node_at_the_reference() {
        let (mut tree, div) = tree_with_div();
        let a = tree.create_text("a");
        let b = tree.create_text("b");
        tree.append_child(div, b).unwrap();
        tree.insert_before(div, a, b).unwrap();
        assert_eq!(tree.text_content(div), "ab");
        assert_eq!(tree.index_in_parent(b), Some(1));
    }

    #[test]
    fn node_length_counts_utf16_code_units() {
        let mut tree = MarkupTree::new();
        let text = tree.create_text("a\u{1F4A9}");
        assert_eq!(tree.node_length(text), 3);
        assert_eq!(tree.node_length(tree.root()), 0);
    }

    #[test]
    fn paths_run_from_the_top_most_ancestor() {
        let (mut tree, div) = tree_with_div();
        let a = tree.create_text("a");
        let span = tree.create_element("span");
        let b = tree.create_text("b");
        tree.append_child(div, a).unwrap();
        tree.append_child(div, span).unwrap();
        tree.append_child(span, b).unwrap();

        assert_eq!(tree.path(b), Some((tree.root(), vec![0, 1, 0])));
        let detached = tree.create_element("p");
        assert_eq!(tree.path(detached), Some((detached, vec![])));
    }

    #[test]
    fn unknown_handles_have_no_content() {
        let (tree, _div) = tree_with_div();
        let foreign = NodeId(42);
        assert_eq!(tree.get(foreign), None);
        assert_eq!(tree.text_content(foreign), "");
        assert!(tree.children(foreign).is_empty());
        assert_eq!(tree.node_length(foreign), 0);
    }
}
