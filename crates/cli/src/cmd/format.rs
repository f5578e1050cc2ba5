//! Re-encode a document's front matter in place of the original block.

use std::fs;

use fencepost_core::config::ResolvedConfig;
use fencepost_core::{ParseOptions, StringifyOptions, parse_with, split, stringify_with};

use super::input::{read_input, resolve_timezone};
use crate::FormatArgs;

pub fn run(rc: &ResolvedConfig, args: &FormatArgs) {
    let timezone = resolve_timezone(rc, args.timezone.as_deref());
    let text = read_input(args.file.as_deref());

    let framing = split(&text);
    let out = if framing.has_data() {
        let doc = parse_with(&text, &ParseOptions::with_timezone(timezone));
        let options = StringifyOptions::matching(&framing).with_timezone(timezone);
        match stringify_with(&doc, &options) {
            Ok(out) => out,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        tracing::debug!("no front matter found, leaving document unchanged");
        text.clone()
    };

    let Some(path) = args.file.as_deref().filter(|_| args.write) else {
        print!("{out}");
        return;
    };

    if out == text {
        println!("unchanged: {}", path.display());
        return;
    }
    if let Err(e) = fs::write(path, &out) {
        eprintln!("Error writing {}: {e}", path.display());
        std::process::exit(1);
    }
    println!("formatted: {}", path.display());
}
