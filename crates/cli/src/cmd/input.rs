//! Reading command input and per-command overrides.

use std::io::Read;
use std::path::Path;
use std::{fs, io};

use chrono::FixedOffset;
use fencepost_core::config::ResolvedConfig;
use fencepost_core::frontmatter::parse_offset;

/// Read the whole input file, or stdin when no file is given.
pub fn read_input(file: Option<&Path>) -> String {
    let result = match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).map(|_| buf)
        }
    };

    match result {
        Ok(text) => text,
        Err(e) => {
            let source = file.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());
            eprintln!("Error reading {source}: {e}");
            std::process::exit(1);
        }
    }
}

/// The `--timezone` flag if given, otherwise the configured timezone.
pub fn resolve_timezone(rc: &ResolvedConfig, flag: Option<&str>) -> FixedOffset {
    let Some(flag) = flag else {
        return rc.timezone;
    };
    match parse_offset(flag) {
        Ok(tz) => tz,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    }
}
