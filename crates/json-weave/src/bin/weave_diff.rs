//! `weave-diff` — diff an edited working value against a content file.
//!
//! Usage:
//!   weave-diff <content.json>
//!
//! The edited working data is read from stdin as JSON; the changelist is
//! printed to stdout as a JSON array.

use json_weave::cli::diff_against_content;
use std::fs;
use std::io::{self, Read, Write};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let content_path = match args.get(1) {
        Some(p) => p.clone(),
        None => {
            eprintln!("Usage: weave-diff <content.json>  (working data on stdin)");
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

    let mut working = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut working) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match diff_against_content(&content, working.trim(), &content_path) {
        Ok(out) => {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(out.as_bytes());
            let _ = stdout.write_all(b"\n");
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
