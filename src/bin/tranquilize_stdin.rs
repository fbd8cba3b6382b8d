//! Simple CLI that reads HTML from stdin and outputs the reading view as JSON.
//!
//! Usage: `tranquilize_stdin <page-url> [charset]`

use std::io::{self, Read};

use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tranquil_reader::{tranquilize_bytes, ImageRecord, LinkRecord};

#[derive(Serialize)]
struct Output {
    title: Option<String>,
    html: String,
    content_text: String,
    more_links: Vec<LinkRecord>,
    nav_links: Vec<LinkRecord>,
    images: Vec<ImageRecord>,
    warnings: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(url) = args.next() else {
        eprintln!("usage: tranquilize_stdin <page-url> [charset]");
        std::process::exit(1);
    };
    let charset = args.next();

    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let result = match tranquilize_bytes(&html, &url, charset.as_deref()) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Extraction failed: {e}");
            std::process::exit(1);
        }
    };

    let output = Output {
        title: result.title,
        html: result.html,
        content_text: result.content_text,
        more_links: result.more_links,
        nav_links: result.nav_links,
        images: result.images,
        warnings: result.warnings,
    };
    println!("{}", serde_json::to_string(&output).unwrap_or_default());
}
