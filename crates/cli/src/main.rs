mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fencepost_core::Mode;
use fencepost_core::config::{ConfigLoader, ResolvedConfig};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Debug, Parser)]
#[command(name = "fencepost", version, about = "Split, parse and rewrite document front matter")]
struct Cli {
    /// Path to config.toml (defaults to $XDG_CONFIG_HOME/fencepost/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the raw metadata block, body and fence as JSON
    Split(InputArgs),

    /// Parse front matter and print the record as JSON
    Parse(ParseArgs),

    /// Build a document from a JSON record
    Stringify(StringifyArgs),

    /// Re-encode a document's front matter, keeping its fence style
    Format(FormatArgs),

    /// Validate configuration and print resolved settings
    Doctor,
}

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input file (reads stdin when omitted)
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Input file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Timezone for dates: "local", "utc" or an offset like "+08:00"
    #[arg(long)]
    pub timezone: Option<String>,
}

#[derive(Debug, Args)]
pub struct StringifyArgs {
    /// JSON record file, body under "_content" (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Metadata encoding
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Fence line (defaults to "---" for yaml, ";;;" for json)
    #[arg(long)]
    pub separator: Option<String>,

    /// Write a fence before the metadata as well as after it
    #[arg(long)]
    pub prefix_separator: bool,

    /// Timezone for dates: "local", "utc" or an offset like "+08:00"
    #[arg(long)]
    pub timezone: Option<String>,
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Input file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Rewrite the file in place instead of printing
    #[arg(long, requires = "file")]
    pub write: bool,

    /// Timezone for dates: "local", "utc" or an offset like "+08:00"
    #[arg(long)]
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Yaml,
    Json,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Yaml => Mode::Yaml,
            ModeArg::Json => Mode::Json,
        }
    }
}

/// Load configuration and start logging; the guard must outlive the command.
fn load_config(config: Option<&Path>) -> (ResolvedConfig, Option<WorkerGuard>) {
    let rc = match ConfigLoader::load(config) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    };
    let guard = logging::init(&rc.logging);
    (rc, guard)
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Doctor => cmd::doctor::run(cli.config.as_deref()),
        Commands::Split(args) => {
            let (_rc, _guard) = load_config(cli.config.as_deref());
            cmd::split::run(&args);
        }
        Commands::Parse(args) => {
            let (rc, _guard) = load_config(cli.config.as_deref());
            cmd::parse::run(&rc, &args);
        }
        Commands::Stringify(args) => {
            let (rc, _guard) = load_config(cli.config.as_deref());
            cmd::stringify::run(&rc, &args);
        }
        Commands::Format(args) => {
            let (rc, _guard) = load_config(cli.config.as_deref());
            cmd::format::run(&rc, &args);
        }
    }
}
