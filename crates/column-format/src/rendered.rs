//! Rendered preview trees: types, HTML serializer and walker.
//!
//! A rendered tree is plain data (tag, resolved style, resolved attributes,
//! children) so any UI layer can mount it with a single generic
//! "create element of this kind" call.

use crate::style::kebab_case;
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

// ── Types ──────────────────────────────────────────────────────────────────

/// A node of a rendered tree: either a text leaf or an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RenderedNode {
    Text(String),
    Element(RenderedElement),
}

/// An element with every formula already evaluated.
///
/// Style keys are camelCase; maps keep document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedElement {
    pub tag: String,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub style: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderedNode>,
}

impl RenderedNode {
    pub fn as_element(&self) -> Option<&RenderedElement> {
        match self {
            RenderedNode::Element(el) => Some(el),
            RenderedNode::Text(_) => None,
        }
    }

    /// All text leaves of the subtree, concatenated in document order.
    pub fn text_content(&self) -> String {
        walk(self)
            .filter_map(|node| match node {
                RenderedNode::Text(s) => Some(s.as_str()),
                RenderedNode::Element(_) => None,
            })
            .collect()
    }
}

// ── HTML serializer ────────────────────────────────────────────────────────

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

fn tag_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").unwrap())
}

fn attr_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_:][A-Za-z0-9_.:-]*$").unwrap())
}

/// Inline `style` attribute value, with keys back in CSS casing.
fn style_attr(style: &IndexMap<String, String>) -> String {
    style
        .iter()
        .map(|(k, v)| format!("{}: {}", kebab_case(k), v))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Serialize a [`RenderedNode`] to an HTML string.
///
/// - `tab`: indentation string (e.g. `"  "`); use `""` for compact output.
/// - `indent`: current indentation prefix (used in recursion).
///
/// An element whose tag is not a valid HTML name is replaced by its
/// children; attributes with invalid names are dropped.
pub fn to_html(node: &RenderedNode, tab: &str, indent: &str) -> String {
    match node {
        RenderedNode::Text(s) => format!("{}{}", indent, escape_text(s)),
        RenderedNode::Element(el) => element_to_html(el, tab, indent),
    }
}

fn element_to_html(el: &RenderedElement, tab: &str, indent: &str) -> String {
    if !tag_name().is_match(&el.tag) {
        debug!("dropping element with invalid tag {:?}", el.tag);
        let sep = if tab.is_empty() { "" } else { "\n" };
        return el
            .children
            .iter()
            .map(|child| to_html(child, tab, indent))
            .collect::<Vec<_>>()
            .join(sep);
    }
    let children_indent = format!("{}{}", indent, tab);
    let do_indent = !tab.is_empty();
    let text_only_children = el
        .children
        .iter()
        .all(|c| matches!(c, RenderedNode::Text(_)));

    let children_str = if text_only_children {
        el.children
            .iter()
            .filter_map(|c| match c {
                RenderedNode::Text(s) => Some(escape_text(s)),
                RenderedNode::Element(_) => None,
            })
            .collect::<String>()
    } else {
        let mut s = String::new();
        for child in &el.children {
            if do_indent {
                s.push('\n');
            }
            s.push_str(&to_html(child, tab, &children_indent));
        }
        s
    };

    let mut attr_str = String::new();
    if !el.style.is_empty() {
        attr_str.push_str(" style=\"");
        attr_str.push_str(&escape_attr(&style_attr(&el.style)));
        attr_str.push('"');
    }
    for (k, v) in &el.attributes {
        if !attr_name().is_match(k) {
            debug!("dropping attribute with invalid name {k:?}");
            continue;
        }
        attr_str.push(' ');
        attr_str.push_str(k);
        attr_str.push_str("=\"");
        attr_str.push_str(&escape_attr(v));
        attr_str.push('"');
    }

    let html_head = format!("<{}{}", el.tag, attr_str);
    if children_str.is_empty() {
        return format!("{}{} />", indent, html_head);
    }
    let closing_indent = if do_indent && !text_only_children {
        format!("\n{}", indent)
    } else {
        String::new()
    };
    format!(
        "{}{}>{}{}</{}>",
        indent, html_head, children_str, closing_indent, el.tag
    )
}

// ── Walker ─────────────────────────────────────────────────────────────────

/// Depth-first (pre-order) iterator over a rendered tree.
pub struct Walk<'a> {
    stack: Vec<&'a RenderedNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a RenderedNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let RenderedNode::Element(el) = node {
            // Reverse so the first child is popped first
            self.stack.extend(el.children.iter().rev());
        }
        Some(node)
    }
}

pub fn walk(node: &RenderedNode) -> Walk<'_> {
    Walk { stack: vec![node] }
}
