// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use super::{MarkupNode, MarkupTree, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link",
    "meta", "source", "track", "wbr",
];

pub(crate) fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Write `<tag attr="value" ...>`.
pub(crate) fn write_open_tag(
    out: &mut String,
    tag: &str,
    attrs: &[(String, String)],
) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');
}

/// An element without its children, e.g. `<span class="a"></span>`.
pub(crate) fn shallow_outer_html(tag: &str, attrs: &[(String, String)]) -> String {
    let mut out = String::new();
    write_open_tag(&mut out, tag, attrs);
    if !is_void_element(tag) {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
    out
}

impl MarkupTree {
    /// Serialize a node and its descendants. Fragments have no tags of their
    /// own, so this is the same as [`MarkupTree::inner_html`] for them.
    /// Unknown handles serialize to an empty string.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_node(*child, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match node {
            MarkupNode::Text(content) => {
                out.push_str(&html_escape::encode_text(content));
            }
            MarkupNode::Comment(content) => {
                out.push_str("<!--");
                out.push_str(content);
                out.push_str("-->");
            }
            MarkupNode::Fragment(children) => {
                for child in children {
                    self.write_node(*child, out);
                }
            }
            MarkupNode::Element(element) => {
                write_open_tag(out, element.tag(), element.attrs());
                if is_void_element(element.tag()) {
                    return;
                }
                for child in element.children() {
                    self.write_node(*child, out);
                }
                out.push_str("</");
                out.push_str(element.tag());
                out.push('>');
            }
        }
    }
}
