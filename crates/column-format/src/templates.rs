//! Template profiles: named starting documents with sample values.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;

const SCHEMA: &str = "https://columnformatting.sharepointpnp.com/columnFormattingSchema.json";

/// A predefined column formatting document and the field values used to
/// preview it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    pub description: String,
    pub json_document: Value,
    pub sample_values: Vec<String>,
}

impl Template {
    /// The document as it is loaded into the editor.
    pub fn editor_text(&self) -> String {
        serde_json::to_string_pretty(&self.json_document).unwrap_or_default()
    }
}

/// Case-insensitive lookup by name.
pub fn find<'a>(templates: &'a [Template], name: &str) -> Option<(usize, &'a Template)> {
    templates
        .iter()
        .enumerate()
        .find(|(_, t)| t.name.eq_ignore_ascii_case(name))
}

/// Reads extra profiles from a JSON array file.
pub fn load_profiles(path: &Path) -> Result<Vec<Template>, FormatError> {
    let text = std::fs::read_to_string(path).map_err(|source| FormatError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|e| FormatError::Config(format!("{}: {e}", path.display())))
}

fn template(name: &str, description: &str, json_document: Value, samples: &[&str]) -> Template {
    Template {
        name: name.to_owned(),
        description: description.to_owned(),
        json_document,
        sample_values: samples.iter().map(|s| s.to_string()).collect(),
    }
}

/// The built-in profiles, in menu order.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        template(
            "Status Icons",
            "Show colored icons based on status text (Done, In Progress, Blocked)",
            json!({
                "$schema": SCHEMA,
                "elmType": "div",
                "style": {"display": "flex", "align-items": "center", "gap": "6px"},
                "children": [
                    {
                        "elmType": "span",
                        "txtContent": "=if(@currentField == 'Done', '✅', if(@currentField == 'In Progress', '🔄', if(@currentField == 'Blocked', '🚫', '⬜')))",
                        "style": {"font-size": "16px"}
                    },
                    {
                        "elmType": "span",
                        "txtContent": "@currentField",
                        "style": {
                            "color": "=if(@currentField == 'Done', '#10b981', if(@currentField == 'In Progress', '#f59e0b', if(@currentField == 'Blocked', '#ef4444', '#94a3b8')))",
                            "font-weight": "600"
                        }
                    }
                ]
            }),
            &["Done", "In Progress", "Blocked", "Not Started"],
        ),
        template(
            "Progress Bar",
            "Render a colored progress bar from a percentage value (0–100)",
            json!({
                "$schema": SCHEMA,
                "elmType": "div",
                "style": {
                    "width": "100%",
                    "height": "20px",
                    "background-color": "#e5e7eb",
                    "border-radius": "10px",
                    "overflow": "hidden",
                    "position": "relative"
                },
                "children": [
                    {
                        "elmType": "div",
                        "style": {
                            "width": "=@currentField + '%'",
                            "height": "100%",
                            "background-color": "=if(@currentField >= 80, '#10b981', if(@currentField >= 50, '#f59e0b', '#ef4444'))",
                            "border-radius": "10px",
                            "transition": "width 0.3s ease"
                        }
                    },
                    {
                        "elmType": "span",
                        "txtContent": "=@currentField + '%'",
                        "style": {
                            "position": "absolute",
                            "top": "0",
                            "left": "0",
                            "right": "0",
                            "text-align": "center",
                            "font-size": "11px",
                            "line-height": "20px",
                            "font-weight": "700",
                            "color": "#1e293b"
                        }
                    }
                ]
            }),
            &["25", "50", "75", "100"],
        ),
        template(
            "Due Date Highlight",
            "Highlight dates red when overdue, yellow when due soon, green when future",
            json!({
                "$schema": SCHEMA,
                "elmType": "div",
                "style": {
                    "padding": "4px 12px",
                    "border-radius": "12px",
                    "display": "inline-flex",
                    "align-items": "center",
                    "gap": "4px",
                    "background-color": "=if(@currentField <= @now, '#fef2f2', if(@currentField <= @now + 604800000, '#fffbeb', '#f0fdf4'))",
                    "color": "=if(@currentField <= @now, '#dc2626', if(@currentField <= @now + 604800000, '#d97706', '#16a34a'))",
                    "font-weight": "600",
                    "font-size": "13px"
                },
                "children": [
                    {
                        "elmType": "span",
                        "txtContent": "=if(@currentField <= @now, '⚠️', if(@currentField <= @now + 604800000, '⏳', '✅'))"
                    },
                    {"elmType": "span", "txtContent": "@currentField"}
                ]
            }),
            &["2024-01-01", "2026-03-05", "2026-12-31", "2025-06-15"],
        ),
        template(
            "Yes / No Badge",
            "Render a styled pill badge for boolean Yes/No fields",
            json!({
                "$schema": SCHEMA,
                "elmType": "div",
                "style": {
                    "display": "inline-flex",
                    "align-items": "center",
                    "gap": "4px",
                    "padding": "2px 10px",
                    "border-radius": "12px",
                    "font-weight": "600",
                    "font-size": "13px",
                    "background-color": "=if(@currentField == 'Yes', '#dcfce7', '#fee2e2')",
                    "color": "=if(@currentField == 'Yes', '#166534', '#991b1b')"
                },
                "children": [
                    {
                        "elmType": "span",
                        "txtContent": "=if(@currentField == 'Yes', '✓', '✕')",
                        "style": {"font-weight": "700"}
                    },
                    {"elmType": "span", "txtContent": "@currentField"}
                ]
            }),
            &["Yes", "No", "Yes", "No"],
        ),
        template(
            "Conditional Background",
            "Color the entire cell background based on priority (High, Medium, Low)",
            json!({
                "$schema": SCHEMA,
                "elmType": "div",
                "style": {
                    "padding": "6px 14px",
                    "border-radius": "6px",
                    "font-weight": "600",
                    "font-size": "13px",
                    "text-align": "center",
                    "background-color": "=if(@currentField == 'High', '#fef2f2', if(@currentField == 'Medium', '#fffbeb', '#f0fdf4'))",
                    "color": "=if(@currentField == 'High', '#dc2626', if(@currentField == 'Medium', '#d97706', '#16a34a'))",
                    "border": "=if(@currentField == 'High', '1px solid #fecaca', if(@currentField == 'Medium', '1px solid #fde68a', '1px solid #bbf7d0'))"
                },
                "txtContent": "@currentField"
            }),
            &["High", "Medium", "Low", "Medium"],
        ),
        template(
            "Trending Arrows",
            "Show up/down/flat trend arrows based on text (Up, Down, Flat)",
            json!({
                "$schema": SCHEMA,
                "elmType": "div",
                "style": {"display": "flex", "align-items": "center", "gap": "6px"},
                "children": [
                    {
                        "elmType": "span",
                        "txtContent": "=if(@currentField == 'Up', '▲', if(@currentField == 'Down', '▼', '▶'))",
                        "style": {
                            "color": "=if(@currentField == 'Up', '#10b981', if(@currentField == 'Down', '#ef4444', '#94a3b8'))",
                            "font-size": "14px",
                            "font-weight": "700"
                        }
                    },
                    {
                        "elmType": "span",
                        "txtContent": "@currentField",
                        "style": {
                            "color": "=if(@currentField == 'Up', '#10b981', if(@currentField == 'Down', '#ef4444', '#94a3b8'))",
                            "font-weight": "600"
                        }
                    }
                ]
            }),
            &["Up", "Down", "Flat", "Up"],
        ),
    ]
}
