use fencepost_core::config::ResolvedConfig;
use fencepost_core::{ParseOptions, parse_with};

use super::input::{read_input, resolve_timezone};
use super::output::{print_json, record_to_json};
use crate::ParseArgs;

pub fn run(rc: &ResolvedConfig, args: &ParseArgs) {
    let timezone = resolve_timezone(rc, args.timezone.as_deref());
    let text = read_input(args.file.as_deref());

    let doc = parse_with(&text, &ParseOptions::with_timezone(timezone));
    tracing::debug!(fields = doc.len(), "parsed front matter");

    print_json(&record_to_json(doc, timezone));
}
