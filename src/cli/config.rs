use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::args::CliArgs;
use crate::conventions::{Conventions, DEFAULT_SCAN_ROOTS, RoleVocabulary};
use crate::module_resolver::normalize_path;

/// Picked up from the project root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "importmend.json";

/// On-disk convention overrides. Every field is optional and layered over the
/// built-in tables.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConventionsFile {
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub source_root: Option<String>,
    #[serde(default)]
    pub module_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub index_files: Option<Vec<String>>,
    /// Replaces the role vocabulary.
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    /// Appended to the (possibly replaced) role vocabulary.
    #[serde(default)]
    pub extra_roles: Option<Vec<String>>,
    #[serde(default)]
    pub excluded_dirs: Option<Vec<String>>,
    #[serde(default)]
    pub source_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub scan_roots: Option<Vec<String>>,
}

impl ConventionsFile {
    pub fn apply_to(&self, conventions: &mut Conventions, project_root: &Path) {
        if let Some(alias) = &self.alias {
            conventions.alias_prefix = alias.clone();
        }
        if let Some(source_root) = &self.source_root {
            conventions.source_root = normalize_path(&project_root.join(source_root));
        }
        if let Some(extensions) = &self.module_extensions {
            conventions.module_extensions = extensions.iter().map(|e| normalize_extension(e)).collect();
        }
        if let Some(index_files) = &self.index_files {
            conventions.index_files = index_files.clone();
        }
        if let Some(roles) = &self.roles {
            conventions.roles = RoleVocabulary::new(roles.iter().cloned());
        }
        if let Some(extra_roles) = &self.extra_roles {
            conventions.roles.extend(extra_roles.iter().cloned());
        }
        if let Some(excluded) = &self.excluded_dirs {
            conventions.excluded_dirs = excluded.iter().cloned().collect();
        }
        if let Some(extensions) = &self.source_extensions {
            conventions.source_extensions = extensions.iter().map(|e| normalize_extension(e)).collect();
        }
    }
}

/// `ts` and `.ts` both mean `.ts`.
fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim();
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

pub fn parse_conventions_file(text: &str) -> Result<ConventionsFile> {
    serde_json::from_str(text).context("failed to parse conventions file")
}

pub fn load_conventions_file(path: &Path) -> Result<ConventionsFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read conventions file {}", path.display()))?;
    parse_conventions_file(&text).with_context(|| format!("in {}", path.display()))
}

/// Everything a run needs, with all paths absolute.
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub project_root: PathBuf,
    pub conventions: Conventions,
    pub scan_roots: Vec<PathBuf>,
    pub rename_log: Option<PathBuf>,
    pub dry_run: bool,
}

pub fn resolve_settings(args: &CliArgs, cwd: &Path) -> Result<ResolvedSettings> {
    let project_root = match &args.project {
        Some(project) => normalize_path(&cwd.join(project)),
        None => normalize_path(cwd),
    };
    if !project_root.is_dir() {
        bail!("project root {} is not a directory", project_root.display());
    }

    let config_path = match &args.config {
        Some(path) => Some(cwd.join(path)),
        None => {
            let default = project_root.join(CONFIG_FILE_NAME);
            default.is_file().then_some(default)
        }
    };
    let file = match &config_path {
        Some(path) => load_conventions_file(path)?,
        None => ConventionsFile::default(),
    };

    let mut conventions = Conventions::for_project(&project_root);
    file.apply_to(&mut conventions, &project_root);
    if let Some(alias) = &args.alias {
        conventions.alias_prefix = alias.clone();
    }
    if let Some(source_root) = &args.source_root {
        conventions.source_root = normalize_path(&cwd.join(source_root));
    }

    if !conventions.source_root.is_dir() {
        bail!(
            "source root {} does not exist; run from the project root or pass --source-root",
            conventions.source_root.display()
        );
    }

    let scan_roots: Vec<PathBuf> = if !args.roots.is_empty() {
        args.roots.iter().map(|root| normalize_path(&project_root.join(root))).collect()
    } else if let Some(roots) = &file.scan_roots {
        roots.iter().map(|root| normalize_path(&project_root.join(root))).collect()
    } else {
        DEFAULT_SCAN_ROOTS
            .iter()
            .map(|root| project_root.join(root))
            .collect()
    };

    Ok(ResolvedSettings {
        project_root,
        conventions,
        scan_roots,
        rename_log: args.rename_log.as_ref().map(|log| cwd.join(log)),
        dry_run: args.dry_run,
    })
}
