use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the importmend binary.
#[derive(Parser, Debug)]
#[command(
    name = "importmend",
    version,
    about = "Repair import specifiers broken by naming-convention renames"
)]
pub struct CliArgs {
    /// Directories to scan, relative to the project root (default: src scripts).
    pub roots: Vec<PathBuf>,

    /// Project root. Defaults to the current directory.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Directory the alias prefix maps to (default: <project>/src).
    #[arg(long = "source-root", alias = "sourceRoot")]
    pub source_root: Option<PathBuf>,

    /// Alias prefix that maps onto the source root.
    #[arg(long)]
    pub alias: Option<String>,

    /// JSON file overriding or extending the naming conventions.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Report what would change without writing any file.
    #[arg(long = "dry-run", alias = "dryRun")]
    pub dry_run: bool,

    /// Print every corrected, ambiguous or unresolved specifier.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Rename log (`old new` per line) applied before smart repair.
    #[arg(long = "rename-log", alias = "renameLog")]
    pub rename_log: Option<PathBuf>,

    /// Force colored output on.
    #[arg(long, overrides_with = "no_pretty")]
    pub pretty: bool,

    /// Force colored output off.
    #[arg(long = "no-pretty", overrides_with = "pretty")]
    pub no_pretty: bool,
}

impl CliArgs {
    /// Explicit `--pretty` / `--no-pretty`, or `None` to auto-detect.
    pub fn color_choice(&self) -> Option<bool> {
        if self.pretty {
            Some(true)
        } else if self.no_pretty {
            Some(false)
        } else {
            None
        }
    }
}
