//! Editor session: the text being edited, the selected profile and the last
//! tree that parsed.

use crate::definition::FormatDefinition;
use crate::error::{FormatError, SyntaxError};
use crate::json_validate::{beautify, minify, parse_document};
use crate::render::render;
use crate::rendered::RenderedNode;
use crate::templates::Template;
use column_format_expression::EvalCtx;
use log::{debug, warn};
use serde::Serialize;

/// Sample used when the selected profile has none.
const DEFAULT_SAMPLE: &str = "Sample";

/// Destination for the "copy" action.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), FormatError>;
}

/// In-process clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), FormatError> {
        self.contents = Some(text.to_owned());
        Ok(())
    }
}

/// One row of the preview table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRow {
    pub title: String,
    pub sample: String,
    pub cell: PreviewCell,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum PreviewCell {
    /// The document rendered for this sample.
    Rendered(RenderedNode),
    /// The document's root has no `elmType`.
    Blank,
    /// No document to render; the raw sample is shown.
    Raw(String),
}

/// State behind the formatter page.
///
/// The tree is replaced wholesale whenever the text parses, and kept as is
/// when it does not, so the preview never goes blank mid-edit.
#[derive(Debug, Clone)]
pub struct FormatterSession {
    templates: Vec<Template>,
    selected: usize,
    text: String,
    tree: Option<FormatDefinition>,
    error: Option<SyntaxError>,
}

impl FormatterSession {
    /// Starts on the first profile.
    pub fn new(templates: Vec<Template>) -> Self {
        let text = templates.first().map(Template::editor_text).unwrap_or_default();
        let mut session = FormatterSession {
            templates,
            selected: 0,
            text: String::new(),
            tree: None,
            error: None,
        };
        session.set_text(text);
        session
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn selected_template(&self) -> Option<&Template> {
        self.templates.get(self.selected)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The tree currently previewed.
    pub fn tree(&self) -> Option<&FormatDefinition> {
        self.tree.as_ref()
    }

    /// Message for the error banner.
    pub fn error(&self) -> Option<&SyntaxError> {
        self.error.as_ref()
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Replaces the editor text and re-validates it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        match parse_document(&self.text) {
            Ok(doc) => {
                self.tree = doc.map(FormatDefinition::from);
                self.error = None;
            }
            Err(e) => {
                warn!("keeping last good preview: {e}");
                self.error = Some(e);
            }
        }
    }

    /// Selects a profile and loads its document into the editor.
    pub fn apply_template(&mut self, index: usize) -> Result<(), FormatError> {
        let text = self
            .templates
            .get(index)
            .map(Template::editor_text)
            .ok_or_else(|| FormatError::UnknownTemplate(index.to_string()))?;
        debug!("applying template {index}");
        self.selected = index;
        self.set_text(text);
        Ok(())
    }

    /// Reloads the selected profile's document.
    pub fn reset(&mut self) {
        let text = self
            .selected_template()
            .map(Template::editor_text)
            .unwrap_or_default();
        self.set_text(text);
    }

    pub fn beautify(&mut self) {
        let text = beautify(&self.text);
        self.set_text(text);
    }

    pub fn minify(&mut self) {
        let text = minify(&self.text);
        self.set_text(text);
    }

    /// Copies the editor text verbatim.
    pub fn copy_to(&self, clipboard: &mut impl Clipboard) -> Result<(), FormatError> {
        clipboard.write_text(&self.text)
    }

    /// One row per sample value of the selected profile.
    pub fn rows(&self, now_millis: i64) -> Vec<PreviewRow> {
        let samples: Vec<String> = match self.selected_template() {
            Some(t) if !t.sample_values.is_empty() => t.sample_values.clone(),
            _ => vec![DEFAULT_SAMPLE.to_owned()],
        };
        self.render_samples(&samples, now_millis)
    }

    /// One row per given sample value, all evaluated at the same instant.
    pub fn render_samples(&self, samples: &[String], now_millis: i64) -> Vec<PreviewRow> {
        samples
            .iter()
            .enumerate()
            .map(|(i, sample)| {
                let cell = match &self.tree {
                    Some(tree) => render(tree, &EvalCtx::new(sample.as_str(), now_millis))
                        .map(PreviewCell::Rendered)
                        .unwrap_or(PreviewCell::Blank),
                    None => PreviewCell::Raw(sample.clone()),
                };
                PreviewRow {
                    title: format!("Item {}", i + 1),
                    sample: sample.clone(),
                    cell,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::builtin_templates;

    #[test]
    fn starts_on_first_template() {
        let session = FormatterSession::new(builtin_templates());
        assert_eq!(session.selected_template().map(|t| t.name.as_str()), Some("Status Icons"));
        assert!(session.tree().is_some());
        assert!(session.error().is_none());
        assert!(session.line_count() > 10);
    }

    #[test]
    fn no_templates() {
        let session = FormatterSession::new(Vec::new());
        assert_eq!(session.text(), "");
        let rows = session.rows(0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cell, PreviewCell::Raw("Sample".into()));
    }

    #[test]
    fn copy_writes_text() {
        let session = FormatterSession::new(builtin_templates());
        let mut clipboard = MemoryClipboard::default();
        session.copy_to(&mut clipboard).unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some(session.text()));
    }
}
