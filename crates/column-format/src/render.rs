//! Tree renderer: [`FormatDefinition`] + sample value -> [`RenderedNode`].

use crate::definition::FormatDefinition;
use crate::rendered::{RenderedElement, RenderedNode};
use crate::style::resolve_style;
use column_format_expression::{evaluate, EvalCtx};
use log::{debug, trace};

/// Renders one node and its subtree against `ctx`.
///
/// Returns `None` for a node without `elmType`; such a node and its subtree
/// are left out of the parent's children. Children come out in document
/// order, preceded by the resolved `txtContent` when it is not empty.
///
/// Pure: the same `(node, ctx)` always renders the same tree.
pub fn render(node: &FormatDefinition, ctx: &EvalCtx) -> Option<RenderedNode> {
    let Some(tag) = node.elm_type.as_deref() else {
        debug!("skipping node without elmType ({} nodes)", node.node_count());
        return None;
    };
    trace!("render <{tag}> for {:?}", ctx.field_value);

    let style = resolve_style(&node.style, ctx);
    let attributes = node
        .attributes
        .iter()
        .map(|(name, expr)| (name.clone(), evaluate(expr, ctx)))
        .collect();

    let mut children = Vec::with_capacity(node.children.len() + 1);
    if let Some(expr) = &node.txt_content {
        let text = evaluate(expr, ctx);
        if !text.is_empty() {
            children.push(RenderedNode::Text(text));
        }
    }
    children.extend(node.children.iter().filter_map(|child| render(child, ctx)));

    Some(RenderedNode::Element(RenderedElement {
        tag: tag.to_owned(),
        style,
        attributes,
        children,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_comes_before_children() {
        let def = FormatDefinition::from(json!({
            "elmType": "div",
            "txtContent": "head",
            "children": [{"elmType": "span", "txtContent": "tail"}]
        }));
        let node = render(&def, &EvalCtx::new("x", 0)).unwrap();
        let el = node.as_element().unwrap();
        assert_eq!(el.children[0], RenderedNode::Text("head".into()));
        assert_eq!(node.text_content(), "headtail");
    }

    #[test]
    fn attributes_are_evaluated() {
        let def = FormatDefinition::from(json!({
            "elmType": "a",
            "attributes": {"href": "https://example.invalid/?q=@currentField", "title": "=if(@currentField == 'a', 'A', 'other')"}
        }));
        let node = render(&def, &EvalCtx::new("a", 0)).unwrap();
        let el = node.as_element().unwrap();
        assert_eq!(el.attributes["href"], "https://example.invalid/?q=a");
        assert_eq!(el.attributes["title"], "A");
    }

    #[test]
    fn empty_text_is_dropped() {
        let def = FormatDefinition::from(json!({"elmType": "span", "txtContent": "=''"}));
        let node = render(&def, &EvalCtx::new("x", 0)).unwrap();
        assert!(node.as_element().unwrap().children.is_empty());
    }
}
