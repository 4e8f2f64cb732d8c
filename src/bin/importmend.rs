#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use importmend::cli::args::CliArgs;
use importmend::cli::reporter::Reporter;
use importmend::cli::{config, driver};

fn main() -> Result<()> {
    // Initialize tracing if IMPORTMEND_LOG or RUST_LOG is set.
    importmend::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let settings = config::resolve_settings(&args, &cwd)?;

    let summary = driver::run_with_settings(&settings)?;

    let color = args
        .color_choice()
        .unwrap_or_else(|| std::io::stdout().is_terminal());
    colored::control::set_override(color);
    let reporter = Reporter::new(color, args.verbose).with_project_root(&settings.project_root);

    for outcome in &summary.outcomes {
        if let Some(text) = reporter.render_outcome(outcome, summary.dry_run) {
            println!("{text}");
        }
    }
    for failure in &summary.failures {
        eprintln!("{}", reporter.render_failure(failure));
    }
    println!("{}", reporter.render_summary(&summary));

    Ok(())
}
