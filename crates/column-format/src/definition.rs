//! The column formatting document tree.

use crate::error::SyntaxError;
use crate::json_validate::parse_document;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One element of a column formatting document.
///
/// Built from JSON by a lenient, total conversion: anything that does not
/// fit is dropped instead of rejected, because half-typed documents are the
/// normal state of the editor. A node without `elmType` renders as nothing.
///
/// Expression values are kept as written; they are evaluated afresh on every
/// render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Value")]
pub struct FormatDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elm_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txt_content: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub style: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FormatDefinition>,
}

impl FormatDefinition {
    /// Parses editor text. `Ok(None)` for blank text.
    pub fn parse(text: &str) -> Result<Option<Self>, SyntaxError> {
        Ok(parse_document(text)?.map(Self::from))
    }

    pub fn from_value(value: &Value) -> Self {
        let Value::Object(obj) = value else {
            return Self::default();
        };
        FormatDefinition {
            elm_type: obj.get("elmType").and_then(Value::as_str).map(str::to_owned),
            txt_content: obj.get("txtContent").and_then(expression_text),
            style: expression_map(obj.get("style")),
            attributes: expression_map(obj.get("attributes")),
            children: match obj.get("children") {
                Some(Value::Array(items)) => items.iter().map(Self::from_value).collect(),
                _ => Vec::new(),
            },
        }
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

impl From<Value> for FormatDefinition {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

/// Scalars become expression text the way the browser would stringify them.
fn expression_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn expression_map(value: Option<&Value>) -> IndexMap<String, String> {
    let Some(Value::Object(obj)) = value else {
        return IndexMap::new();
    };
    entries(obj)
}

fn entries(obj: &Map<String, Value>) -> IndexMap<String, String> {
    obj.iter()
        .filter_map(|(k, v)| expression_text(v).map(|text| (k.clone(), text)))
        .collect()
}
