use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::cli::driver::{FileFailure, RunSummary};
use crate::module_resolver::relative_path;
use crate::rewrite::{FileOutcome, SpecifierReport, SpecifierStatus};

pub struct Reporter {
    color: bool,
    verbose: bool,
    project_root: Option<PathBuf>,
}

impl Reporter {
    pub fn new(color: bool, verbose: bool) -> Self {
        Reporter {
            color,
            verbose,
            project_root: None,
        }
    }

    /// Show file paths relative to `root`.
    pub fn with_project_root(mut self, root: &Path) -> Self {
        self.project_root = Some(root.to_path_buf());
        self
    }

    /// Lines for one processed file, or `None` when there is nothing to say.
    pub fn render_outcome(&self, outcome: &FileOutcome, dry_run: bool) -> Option<String> {
        let details: Vec<String> = if self.verbose {
            outcome
                .specifiers
                .iter()
                .filter_map(|report| self.format_specifier(report))
                .collect()
        } else {
            Vec::new()
        };

        let header = if outcome.changed {
            let verb = if dry_run {
                "Would fix imports in"
            } else {
                "Fixed imports in"
            };
            format!("{} {}", self.paint_ok(verb), self.display_path(&outcome.path))
        } else if !details.is_empty() {
            format!(
                "{} {}",
                self.paint_warn("Unresolved imports in"),
                self.display_path(&outcome.path)
            )
        } else {
            return None;
        };

        let mut out = header;
        for line in details {
            out.push('\n');
            out.push_str(&line);
        }
        Some(out)
    }

    fn format_specifier(&self, report: &SpecifierReport) -> Option<String> {
        let quote = report.specifier.quote;
        let original = format!("{quote}{}{quote}", report.specifier.text);
        match &report.status {
            SpecifierStatus::Bare | SpecifierStatus::Valid => None,
            SpecifierStatus::Corrected {
                replacement,
                strategy,
            } => Some(format!(
                "  {} -> {quote}{replacement}{quote} ({strategy})",
                original
            )),
            SpecifierStatus::Unresolved => Some(format!(
                "  {} {}",
                original,
                self.paint_warn("unresolved")
            )),
            SpecifierStatus::Ambiguous(names) => Some(format!(
                "  {} {}: {}",
                original,
                self.paint_warn("ambiguous"),
                names.join(", ")
            )),
        }
    }

    pub fn render_failure(&self, failure: &FileFailure) -> String {
        format!(
            "{} {}: {}",
            self.paint_error("Failed to process"),
            self.display_path(&failure.path),
            failure.error
        )
    }

    pub fn render_summary(&self, summary: &RunSummary) -> String {
        let mut out = if summary.dry_run {
            format!("Finished (dry run). Files to fix: {}", summary.fixed_count())
        } else {
            format!("Finished. Fixed files: {}", summary.fixed_count())
        };
        if !summary.failures.is_empty() {
            out.push_str(&format!(
                " ({} {})",
                summary.failures.len(),
                self.paint_error("failed")
            ));
        }
        out
    }

    fn display_path(&self, path: &Path) -> String {
        match &self.project_root {
            Some(root) if path.starts_with(root) => relative_path(root, path),
            _ => path.display().to_string(),
        }
    }

    fn paint_ok(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_warn(&self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_error(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }
}
