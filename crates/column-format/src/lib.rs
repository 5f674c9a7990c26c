//! column-format editor support and live preview for SharePoint JSON
//! column formatting documents.
//!
//! The preview pipeline runs on every edit:
//!
//! 1. [`json_validate`] checks the editor text and reports the first syntax
//!    error.
//! 2. [`definition`] turns the parsed JSON into a [`FormatDefinition`] tree.
//! 3. [`render`] walks the tree once per sample value, evaluating every
//!    formula through [`column_format_expression`] and resolving styles with
//!    [`style`].
//!
//! [`session::FormatterSession`] ties this together with the template
//! profiles and keeps the last good tree on screen while the text is broken.
//!
//! # Example
//!
//! ```
//! use column_format::{render, EvalCtx, FormatDefinition};
//!
//! let doc = FormatDefinition::parse(r#"{"elmType": "span", "txtContent": "=@currentField + '%'"}"#)
//!     .unwrap()
//!     .unwrap();
//! let node = render(&doc, &EvalCtx::new("42", 0)).unwrap();
//! assert_eq!(node.text_content(), "42%");
//! ```

// Template documents are large `json!` literals.
#![recursion_limit = "256"]

pub mod cli;
pub mod config;
pub mod definition;
pub mod error;
pub mod json_validate;
pub mod render;
pub mod rendered;
pub mod session;
pub mod style;
pub mod templates;

pub use column_format_expression::{evaluate, EvalCtx};
pub use definition::FormatDefinition;
pub use error::{FormatError, SyntaxError};
pub use json_validate::{beautify, minify, validate};
pub use render::render;
pub use rendered::{RenderedElement, RenderedNode};
pub use session::{Clipboard, FormatterSession, PreviewCell, PreviewRow};
pub use style::resolve_style;
pub use templates::{builtin_templates, Template};
