//! `weave-render` — render a JsonML page template with a content file.
//!
//! Usage:
//!   weave-render <template.json> <content.json>
//!
//! Prints the rendered HTML to stdout.

use json_weave::cli::render_page;
use std::fs;
use std::io::{self, Write};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let (template_path, content_path) = match (args.get(1), args.get(2)) {
        (Some(t), Some(c)) => (t.clone(), c.clone()),
        _ => {
            eprintln!("Usage: weave-render <template.json> <content.json>");
            std::process::exit(1);
        }
    };

    let template = match fs::read_to_string(&template_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{template_path}: {e}");
            std::process::exit(1);
        }
    };
    let content = match fs::read_to_string(&content_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{content_path}: {e}");
            std::process::exit(1);
        }
    };

    match render_page(&template, &content, &content_path) {
        Ok(html) => {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(html.as_bytes());
            let _ = stdout.write_all(b"\n");
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
