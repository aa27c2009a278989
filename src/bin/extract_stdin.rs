//! Simple CLI that reads HTML from stdin and outputs JSON to stdout.
//!
//! Usage: `extract_stdin [--digests] [--indexes] [--plain-text] [--no-scoring] [--readability]`
//!
//! Prints the extracted article as JSON, or `null` when the page holds no
//! article. Logs go to stderr; set `RUST_LOG=debug` to follow the pipeline.

use simple_article::{extract_bytes, Extraction, Options};
use std::env;
use std::io::{self, Read};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut options = Options::default();
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--digests" => options.content_digests = true,
            "--indexes" => options.node_indexes = true,
            "--plain-text" => options.plain_text = true,
            "--no-scoring" => options.use_scoring = false,
            "--readability" => options.use_readability = true,
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Usage: extract_stdin [--digests] [--indexes] [--plain-text] [--no-scoring] [--readability]");
                std::process::exit(2);
            }
        }
    }

    // Read HTML from stdin
    let mut html = Vec::new();
    if io::stdin().read_to_end(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        std::process::exit(1);
    }

    let output = match extract_bytes(&html, &options) {
        Ok(Extraction::Article(article)) => article.to_json(),
        Ok(Extraction::NotAnArticle) => Ok("null".to_string()),
        Err(err) => {
            eprintln!("Extraction failed: {err}");
            std::process::exit(1);
        }
    };

    match output {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Failed to encode article: {err}");
            std::process::exit(1);
        }
    }
}
