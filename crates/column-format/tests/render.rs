//! Rendering of full documents and the built-in profiles.

use column_format::rendered::to_html;
use column_format::templates::{builtin_templates, find};
use column_format::{render, EvalCtx, FormatDefinition, RenderedElement, RenderedNode};
use serde_json::{json, Value};

const NOW: i64 = 1_767_225_600_000; // 2026-01-01T00:00:00Z

fn template_doc(name: &str) -> FormatDefinition {
    let templates = builtin_templates();
    let (_, t) = find(&templates, name).unwrap_or_else(|| panic!("no template {name}"));
    FormatDefinition::from_value(&t.json_document)
}

fn render_value(doc: Value, field: &str) -> Option<RenderedNode> {
    render(&FormatDefinition::from(doc), &EvalCtx::new(field, NOW))
}

fn element(node: &RenderedNode) -> &RenderedElement {
    node.as_element().unwrap_or_else(|| panic!("expected element, got {node:?}"))
}

fn child(node: &RenderedNode, index: usize) -> &RenderedNode {
    &element(node).children[index]
}

// ----------------------------------------------------------------- Robustness

#[test]
fn test_missing_elm_type_renders_nothing() {
    assert_eq!(render_value(json!({"txtContent": "hi"}), "x"), None);
    assert_eq!(render_value(json!({}), "x"), None);
    assert_eq!(render_value(json!("div"), "x"), None);
    assert_eq!(render_value(json!(null), "x"), None);
}

#[test]
fn test_html_output_never_carries_raw_names() {
    let node = render_value(
        json!({
            "elmType": "div",
            "children": [{
                "elmType": "img src=x onerror=alert(1) x",
                "attributes": {"title\" onmouseover=\"alert(2)": "v", "alt": "@currentField"},
                "txtContent": "@currentField"
            }]
        }),
        "<x>",
    )
    .unwrap();
    assert_eq!(to_html(&node, "", ""), "<div>&lt;x&gt;</div>");
}

#[test]
fn test_malformed_children_are_omitted() {
    let node = render_value(
        json!({
            "elmType": "div",
            "children": [
                {"elmType": "span", "txtContent": "a"},
                {"txtContent": "lost", "children": [{"elmType": "b", "txtContent": "also lost"}]},
                42,
                {"elmType": "span", "txtContent": "b"}
            ]
        }),
        "x",
    )
    .unwrap();
    assert_eq!(element(&node).children.len(), 2);
    assert_eq!(node.text_content(), "ab");
}

#[test]
fn test_deep_nesting_keeps_order() {
    fn level(depth: usize) -> Value {
        if depth == 0 {
            return json!({"elmType": "span", "txtContent": "leaf"});
        }
        json!({
            "elmType": "div",
            "txtContent": format!("L{depth}"),
            "children": [
                {"elmType": "i", "txtContent": format!("first{depth}")},
                level(depth - 1),
                {"elmType": "i", "txtContent": format!("last{depth}")}
            ]
        })
    }
    let node = render_value(level(5), "x").unwrap();
    assert_eq!(
        node.text_content(),
        "L5first5L4first4L3first3L2first2L1first1leaflast1last2last3last4last5"
    );
}

#[test]
fn test_render_is_idempotent() {
    let doc = template_doc("Status Icons");
    let ctx = EvalCtx::new("Blocked", NOW);
    assert_eq!(render(&doc, &ctx), render(&doc, &ctx));
}

#[test]
fn test_literal_text_passthrough() {
    let node = render_value(json!({"elmType": "span", "txtContent": "@currentField"}), "In Progress").unwrap();
    assert_eq!(node.text_content(), "In Progress");
}

#[test]
fn test_non_string_expression_values() {
    let node = render_value(json!({"elmType": "div", "style": {"top": 0, "flex-grow": 1}, "attributes": {"tabindex": 3}}), "x").unwrap();
    let el = element(&node);
    assert_eq!(el.style["top"], "0");
    assert_eq!(el.style["flexGrow"], "1");
    assert_eq!(el.attributes["tabindex"], "3");
}

// ----------------------------------------------------------------- Profiles

#[test]
fn test_progress_bar_mid_tier() {
    let node = render(&template_doc("Progress Bar"), &EvalCtx::new("75", NOW)).unwrap();
    let bar = element(child(&node, 0));
    assert_eq!(bar.style["width"], "75%");
    assert_eq!(bar.style["backgroundColor"], "#f59e0b");
    assert_eq!(child(&node, 1).text_content(), "75%");
    assert_eq!(element(&node).style["backgroundColor"], "#e5e7eb");
}

#[test]
fn test_progress_bar_tiers() {
    let doc = template_doc("Progress Bar");
    for (value, color) in [("100", "#10b981"), ("80", "#10b981"), ("50", "#f59e0b"), ("25", "#ef4444")] {
        let node = render(&doc, &EvalCtx::new(value, NOW)).unwrap();
        assert_eq!(element(child(&node, 0)).style["backgroundColor"], color, "value {value}");
    }
}

#[test]
fn test_status_icons() {
    let doc = template_doc("Status Icons");
    for (value, icon, color) in [
        ("Done", "✅", "#10b981"),
        ("In Progress", "🔄", "#f59e0b"),
        ("Blocked", "🚫", "#ef4444"),
        ("Not Started", "⬜", "#94a3b8"),
    ] {
        let node = render(&doc, &EvalCtx::new(value, NOW)).unwrap();
        assert_eq!(child(&node, 0).text_content(), icon);
        let label = element(child(&node, 1));
        assert_eq!(label.style["color"], color);
        assert_eq!(label.children, vec![RenderedNode::Text(value.to_owned())]);
    }
}

#[test]
fn test_due_date_highlight() {
    let doc = template_doc("Due Date Highlight");
    for (value, icon, background) in [
        ("2024-01-01", "⚠️", "#fef2f2"),
        ("2026-01-05", "⏳", "#fffbeb"),
        ("2026-12-31", "✅", "#f0fdf4"),
    ] {
        let node = render(&doc, &EvalCtx::new(value, NOW)).unwrap();
        assert_eq!(child(&node, 0).text_content(), icon, "value {value}");
        assert_eq!(element(&node).style["backgroundColor"], background, "value {value}");
    }
}

#[test]
fn test_conditional_background_text_on_root() {
    let node = render(&template_doc("Conditional Background"), &EvalCtx::new("High", NOW)).unwrap();
    let el = element(&node);
    assert_eq!(el.children, vec![RenderedNode::Text("High".into())]);
    assert_eq!(el.style["border"], "1px solid #fecaca");
    assert_eq!(el.style["textAlign"], "center");
}

#[test]
fn test_every_profile_renders_every_sample() {
    for t in builtin_templates() {
        let doc = FormatDefinition::from_value(&t.json_document);
        for sample in &t.sample_values {
            let node = render(&doc, &EvalCtx::new(sample.as_str(), NOW));
            assert!(node.is_some(), "{} / {sample}", t.name);
        }
    }
}
