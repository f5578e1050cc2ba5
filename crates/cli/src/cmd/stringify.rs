use fencepost_core::config::ResolvedConfig;
use fencepost_core::stringify_with;

use super::input::{read_input, resolve_timezone};
use super::output::record_from_json;
use crate::StringifyArgs;

pub fn run(rc: &ResolvedConfig, args: &StringifyArgs) {
    let timezone = resolve_timezone(rc, args.timezone.as_deref());
    let text = read_input(args.file.as_deref());

    let doc = match record_from_json(&text, timezone) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut options = rc.stringify_options().with_timezone(timezone);
    if let Some(mode) = args.mode {
        // A configured fence belongs to the configured mode.
        options.mode = mode.into();
        options.separator = None;
    }
    if let Some(ref sep) = args.separator {
        options.separator = Some(sep.clone());
    }
    if args.prefix_separator {
        options.prefix_separator = true;
    }

    match stringify_with(&doc, &options) {
        Ok(out) => print!("{out}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
