// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use once_cell::sync::Lazy;
use regex::Regex;

use super::NodeId;

static STYLE_DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*([^:;]+?)\s*:\s*([^;]*?)\s*(?:;|$)").unwrap());

#[derive(Clone, Debug, PartialEq)]
pub struct MarkupElement {
    pub(crate) tag: String,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<NodeId>,
}

impl MarkupElement {
    pub(crate) fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Lower-case tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _v)| n == name)
            .map(|(_n, v)| v.as_str())
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(n, _v)| n == name) {
            Some((_n, v)) => *v = value.to_owned(),
            None => self.attrs.push((name.to_owned(), value.to_owned())),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(n, _v)| n != name);
    }

    /// Inline style declarations in source order, property names lower-cased.
    pub fn styles(&self) -> Vec<(String, String)> {
        self.get_attr("style")
            .map(|style| {
                STYLE_DECLARATION
                    .captures_iter(style)
                    .map(|c| (c[1].to_ascii_lowercase(), c[2].to_owned()))
                    .filter(|(_name, value)| !value.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Value of one inline style property; the last declaration wins.
    pub fn style(&self, name: &str) -> Option<String> {
        self.styles()
            .into_iter()
            .rev()
            .find(|(n, _v)| n.eq_ignore_ascii_case(name))
            .map(|(_n, v)| v)
    }

    pub fn contains_style(&self, name: &str, value: &str) -> bool {
        self.style(name)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
    }

    /// Set an inline style property, serialized the way a browser writes
    /// `cssText`: `name: value;` declarations separated by single spaces.
    pub fn set_style(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        let mut styles = self.styles();
        match styles.iter_mut().find(|(n, _v)| *n == name) {
            Some((_n, v)) => *v = value.to_owned(),
            None => styles.push((name, value.to_owned())),
        }
        self.write_styles(&styles);
    }

    pub fn remove_style(&mut self, name: &str) {
        let mut styles = self.styles();
        styles.retain(|(n, _v)| !n.eq_ignore_ascii_case(name));
        self.write_styles(&styles);
    }

    fn write_styles(&mut self, styles: &[(String, String)]) {
        if styles.is_empty() {
            self.remove_attr("style");
        } else {
            let css = styles
                .iter()
                .map(|(n, v)| format!("{n}: {v};"))
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attr("style", &css);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn div_with_style(style: &str) -> MarkupElement {
        let mut node = MarkupElement::new("div");
        node.set_attr("style", style);
        node
    }

    #[test]
    fn test_contains_style() {
        let node = div_with_style("font-weight:bold;");
        assert!(node.contains_style("font-weight", "bold"));
        assert!(!node.contains_style("font-weight", "normal"));
    }

    #[test]
    fn style_values_may_contain_colons() {
        let node =
            div_with_style("background: url(http://a/b.png); COLOR: red");
        assert_eq!(
            node.style("background").as_deref(),
            Some("url(http://a/b.png)")
        );
        assert_eq!(node.style("color").as_deref(), Some("red"));
    }

    #[test]
    fn set_style_writes_css_text() {
        let mut node = MarkupElement::new("div");
        node.set_style("width", "10px");
        node.set_style("height", "20px");
        assert_eq!(node.get_attr("style"), Some("width: 10px; height: 20px;"));

        node.set_style("width", "5px");
        assert_eq!(node.get_attr("style"), Some("width: 5px; height: 20px;"));
    }

    #[test]
    fn removing_the_last_style_drops_the_attribute() {
        let mut node = div_with_style("width: 1px");
        node.remove_style("width");
        assert_eq!(node.get_attr("style"), None);
    }

    #[test]
    fn set_attr_keeps_attribute_order() {
        let mut node = MarkupElement::new("td");
        node.set_attr("colspan", "2");
        node.set_attr("rowspan", "3");
        node.set_attr("colspan", "4");
        assert_eq!(
            node.attrs(),
            &[
                ("colspan".to_owned(), "4".to_owned()),
                ("rowspan".to_owned(), "3".to_owned())
            ]
        );
    }
}
