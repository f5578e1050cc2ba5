use fencepost_core::config::{ConfigLoader, default_config_path};
use std::path::Path;

pub fn run(config: Option<&Path>) {
    match ConfigLoader::load(config) {
        Ok(rc) => {
            let options = rc.stringify_options();
            println!("OK   fencepost doctor");
            println!(
                "path: {}",
                rc.source.as_ref().map_or_else(
                    || format!("{} (not found, using defaults)", default_config_path().display()),
                    |p| p.display().to_string()
                )
            );
            println!("timezone: {}", rc.timezone);
            println!("stringify.mode: {}", options.mode.as_str());
            println!("stringify.separator: {}", options.separator());
            println!("stringify.prefix_separator: {}", options.prefix_separator);
            println!("logging.level: {}", rc.logging.level);
            if let Some(ref file) = rc.logging.file {
                println!("logging.file: {}", file.display());
            }
        }
        Err(e) => {
            println!("FAIL fencepost doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
