//! `cf-preview` command-line front end for the formatter.
//!
//! Provides the logic behind the binary entry point:
//! - `validate`: check a document, print `ok` or the syntax error
//! - `format`: beautify or minify a document
//! - `render`: preview a document for a set of sample values
//! - `templates`: list the profiles
//! - `template`: print a profile's document

use crate::config::{OutputFormat, PreviewConfig};
use crate::error::FormatError;
use crate::json_validate::{beautify, minify, validate};
use crate::rendered::to_html;
use crate::session::{FormatterSession, PreviewCell};
use crate::templates::find;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "cf-preview", version, about = "Validate, format and preview SharePoint column formatting JSON")]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that a document is well-formed JSON
    Validate {
        /// Document path, `-` for stdin
        input: PathBuf,
    },
    /// Beautify (default) or minify a document
    Format {
        input: PathBuf,
        #[arg(long)]
        minify: bool,
    },
    /// Render a document once per sample value
    Render {
        input: PathBuf,
        /// Profile whose sample values are used
        #[arg(short, long)]
        template: Option<String>,
        /// Sample value; repeat for several rows. Overrides the profile's samples.
        #[arg(short, long)]
        sample: Vec<String>,
        /// `@now` in epoch milliseconds
        #[arg(long)]
        now: Option<i64>,
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },
    /// List the available profiles
    Templates,
    /// Print a profile's document
    Template { name: String },
}

impl Cli {
    /// Log filter matching `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

fn read_input(path: &Path) -> Result<String, FormatError> {
    let io_err = |source| FormatError::Io {
        path: path.to_owned(),
        source,
    };
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(io_err)
}

fn load_config(cli: &Cli) -> Result<PreviewConfig, FormatError> {
    match &cli.config {
        Some(path) => PreviewConfig::load(path),
        None => Ok(PreviewConfig::default()),
    }
}

/// Runs one command, writing its output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    match &cli.command {
        Command::Validate { input } => {
            let text = read_input(input)?;
            if let Err(err) = validate(&text) {
                bail!("{}:{}:{}: {}", input.display(), err.line, err.column, err);
            }
            writeln!(out, "ok")?;
        }
        Command::Format { input, minify: compact } => {
            let text = read_input(input)?;
            validate(&text).with_context(|| format!("cannot format {}", input.display()))?;
            let formatted = if *compact { minify(&text) } else { beautify(&text) };
            writeln!(out, "{formatted}")?;
        }
        Command::Render {
            input,
            template,
            sample,
            now,
            output,
        } => {
            let text = read_input(input)?;
            let templates = config.templates()?;
            let name = template.as_ref().or(config.template.as_ref());
            let mut session = FormatterSession::new(templates);
            if let Some(name) = name {
                let (index, _) = find(session.templates(), name)
                    .ok_or_else(|| FormatError::UnknownTemplate(name.clone()))?;
                session.apply_template(index)?;
            }
            session.set_text(text);
            if let Some(err) = session.error() {
                bail!("{}:{}:{}: {}", input.display(), err.line, err.column, err);
            }
            let now = now.unwrap_or_else(|| config.now_millis());
            let rows = if sample.is_empty() {
                session.rows(now)
            } else {
                session.render_samples(sample, now)
            };
            match output.unwrap_or(config.output) {
                OutputFormat::Json => {
                    serde_json::to_writer_pretty(&mut *out, &rows)?;
                    writeln!(out)?;
                }
                OutputFormat::Html => {
                    for row in &rows {
                        writeln!(out, "<!-- {}: {} -->", row.title, row.sample)?;
                        match &row.cell {
                            PreviewCell::Rendered(node) => {
                                writeln!(out, "{}", to_html(node, &config.indent, ""))?
                            }
                            PreviewCell::Blank => writeln!(out)?,
                            PreviewCell::Raw(value) => writeln!(out, "{value}")?,
                        }
                    }
                }
            }
        }
        Command::Templates => {
            for t in config.templates()? {
                writeln!(out, "{}\t{}", t.name, t.description)?;
            }
        }
        Command::Template { name } => {
            let templates = config.templates()?;
            let (_, t) = find(&templates, name)
                .ok_or_else(|| FormatError::UnknownTemplate(name.clone()))?;
            writeln!(out, "{}", t.editor_text())?;
        }
    }
    Ok(())
}
