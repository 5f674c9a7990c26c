//! `cf-preview` validate, format and preview column formatting JSON.
//!
//! Usage:
//!   cf-preview render doc.json --template "Progress Bar"
//!   cf-preview format - --minify < doc.json
//!
//! Logging goes to stderr; `RUST_LOG` overrides `-v`.

use clap::Parser;
use column_format::cli::{run, Cli};
use std::io::{self, Write};

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level())).init();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&cli, &mut out) {
        let _ = out.flush();
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}
