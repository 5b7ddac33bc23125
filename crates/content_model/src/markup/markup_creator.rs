// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::borrow::Cow;
use std::cell::{Ref, RefCell};
use std::collections::HashMap;

use html5ever::interface::NextParserState;
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{
    parse_fragment, Attribute, LocalName, Namespace, QualName,
};

use super::{MarkupNode, MarkupTree, NodeId};
use crate::error::MarkupParseError;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

fn html_name(local: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from(local),
    )
}

struct CreationState {
    tree: MarkupTree,
    /// html5ever asks for qualified names; the tree itself only keeps tags.
    names: HashMap<NodeId, QualName>,
    unnamed: QualName,
    parse_errors: Vec<String>,
}

pub(crate) struct MarkupCreator {
    state: RefCell<CreationState>,
}

impl Default for MarkupCreator {
    fn default() -> Self {
        Self {
            state: RefCell::new(CreationState {
                tree: MarkupTree::new(),
                names: HashMap::new(),
                unnamed: html_name(""),
                parse_errors: Vec::new(),
            }),
        }
    }
}

impl MarkupTree {
    /// Parse an HTML fragment the way `innerHTML` on a `<body>` would.
    ///
    /// The parsed nodes become the children of [`MarkupTree::root`]. The
    /// parser always produces a tree; when it had to recover from invalid
    /// input the tree is handed back inside the error.
    pub fn parse_fragment(html: &str) -> Result<MarkupTree, MarkupParseError> {
        parse_fragment(
            MarkupCreator::default(),
            Default::default(),
            html_name("body"),
            vec![],
        )
        .from_utf8()
        .one(html.as_bytes())
    }
}

impl MarkupCreator {
    fn append_node(&self, parent: &NodeId, child: NodeOrText<NodeId>) {
        let state = &mut *self.state.borrow_mut();
        let tree = &mut state.tree;
        let child = match child {
            NodeOrText::AppendNode(child) => child,
            NodeOrText::AppendText(tendril) => {
                // Consecutive character tokens extend the previous text node
                if let Some(last) = tree.children(*parent).last().copied() {
                    if let Some(MarkupNode::Text(content)) =
                        tree.nodes.get_mut(last.0)
                    {
                        content.push_str(&tendril);
                        return;
                    }
                }
                tree.create_text(&tendril)
            }
        };
        if let Err(e) = tree.append_child(*parent, child) {
            state.parse_errors.push(e.to_string());
        }
    }

    fn insert_node_before(&self, sibling: &NodeId, child: NodeOrText<NodeId>) {
        let state = &mut *self.state.borrow_mut();
        let tree = &mut state.tree;
        let Some(parent) = tree.parent(*sibling) else {
            return;
        };
        let child = match child {
            NodeOrText::AppendNode(child) => child,
            NodeOrText::AppendText(tendril) => tree.create_text(&tendril),
        };
        if let Err(e) = tree.insert_before(parent, child, *sibling) {
            state.parse_errors.push(e.to_string());
        }
    }
}

/// Fragment parsing wraps everything in an `<html>` element. Lift its
/// children up to the root so the tree holds just the fragment.
fn unwrap_html_element(tree: &mut MarkupTree) {
    let root = tree.root();
    let wrappers: Vec<NodeId> = tree
        .children(root)
        .iter()
        .copied()
        .filter(|c| tree.element(*c).is_some_and(|e| e.tag() == "html"))
        .collect();
    for wrapper in wrappers {
        let children = tree.children(wrapper).to_vec();
        for child in children {
            // Cannot fail: the wrapper's children are not ancestors of the root
            let _ = tree.insert_before(root, child, wrapper);
        }
        tree.remove_from_parent(wrapper);
    }
}

impl TreeSink for MarkupCreator {
    type Handle = NodeId;
    type Output = Result<MarkupTree, MarkupParseError>;
    type ElemName<'a> = Ref<'a, QualName>;

    fn finish(self) -> Self::Output {
        let mut state = self.state.into_inner();
        unwrap_html_element(&mut state.tree);
        if state.parse_errors.is_empty() {
            Ok(state.tree)
        } else {
            tracing::debug!(
                target: "content_model::markup",
                errors = state.parse_errors.len(),
                "markup parsed with recoverable errors"
            );
            Err(MarkupParseError {
                tree: state.tree,
                parse_errors: state.parse_errors,
            })
        }
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.state.borrow_mut().parse_errors.push(String::from(msg));
    }

    fn get_document(&self) -> Self::Handle {
        self.state.borrow().tree.root()
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        Ref::map(self.state.borrow(), |state| {
            state.names.get(target).unwrap_or(&state.unnamed)
        })
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let state = &mut *self.state.borrow_mut();
        let attrs = attrs
            .into_iter()
            .map(|a| (a.name.local.to_string(), a.value.to_string()))
            .collect();
        let handle =
            state.tree.create_element_with_attrs(name.local.as_ref(), attrs);
        state.names.insert(handle, name);
        handle
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        self.state.borrow_mut().tree.create_comment(&text)
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        self.state.borrow_mut().tree.create_comment(&data)
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.append_node(parent, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self.state.borrow().tree.parent(*element).is_some();
        if has_parent {
            self.insert_node_before(element, child);
        } else {
            self.append_node(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // Doctypes carry nothing for a fragment
    }

    fn mark_script_already_started(&self, _node: &Self::Handle) {}

    fn pop(&self, _node: &Self::Handle) {}

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents are kept inline as children of the template
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, _mode: QuirksMode) {}

    fn append_before_sibling(
        &self,
        sibling: &Self::Handle,
        new_node: NodeOrText<Self::Handle>,
    ) {
        self.insert_node_before(sibling, new_node);
    }

    fn add_attrs_if_missing(
        &self,
        target: &Self::Handle,
        attrs: Vec<Attribute>,
    ) {
        let state = &mut *self.state.borrow_mut();
        if let Some(element) = state.tree.element_mut(*target) {
            for attr in attrs {
                let name = attr.name.local.as_ref();
                if element.get_attr(name).is_none() {
                    element.set_attr(name, attr.value.as_ref());
                }
            }
        }
    }

    fn associate_with_form(
        &self,
        _target: &Self::Handle,
        _form: &Self::Handle,
        _nodes: (&Self::Handle, Option<&Self::Handle>),
    ) {
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.state.borrow_mut().tree.remove_from_parent(*target);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let state = &mut *self.state.borrow_mut();
        if let Err(e) = state.tree.reparent_children(*node, *new_parent) {
            state.parse_errors.push(e.to_string());
        }
    }

    fn is_mathml_annotation_xml_integration_point(
        &self,
        _handle: &Self::Handle,
    ) -> bool {
        false
    }

    fn set_current_line(&self, _line_number: u64) {}

    fn complete_script(&self, _node: &Self::Handle) -> NextParserState {
        NextParserState::Continue
    }

    fn allow_declarative_shadow_roots(
        &self,
        _intended_parent: &Self::Handle,
    ) -> bool {
        false
    }

    fn attach_declarative_shadow(
        &self,
        _location: &Self::Handle,
        _template: &Self::Handle,
        _attrs: Vec<Attribute>,
    ) -> Result<(), String> {
        Err(String::from("declarative shadow roots are not supported"))
    }
}
