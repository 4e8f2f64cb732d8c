//! Convention tables for the layered naming scheme.
//!
//! Everything the repair engine treats as "fixed configuration" lives here:
//! the alias prefix and the source root it maps to, the ordered module
//! extension and index-file lists, the closed role vocabulary, and the
//! directory names skipped during traversal.

use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};

use crate::naming::to_kebab;

/// Architectural role words, in tie-break order.
pub const DEFAULT_ROLES: [&str; 27] = [
    "Repository",
    "UseCase",
    "Dto",
    "Service",
    "Controller",
    "Presenter",
    "Adapter",
    "Mapper",
    "Display",
    "Control",
    "Constants",
    "Client",
    "Parser",
    "Renderer",
    "DataSource",
    "Provider",
    "Factory",
    "Strategy",
    "Observer",
    "Metadata",
    "Context",
    "Content",
    "Engagement",
    "Status",
    "Source",
    "Segment",
    "Shared",
];

pub const DEFAULT_ALIAS_PREFIX: &str = "@/";
pub const DEFAULT_SOURCE_ROOT: &str = "src";
pub const DEFAULT_SCAN_ROOTS: [&str; 2] = ["src", "scripts"];

/// Extensions tried, in order, when resolving an extensionless specifier.
pub const MODULE_EXTENSIONS: [&str; 5] = [".ts", ".tsx", ".js", ".jsx", ".d.ts"];
/// Index files that make a directory importable.
pub const INDEX_FILES: [&str; 2] = ["index.ts", "index.tsx"];
/// Files whose text is scanned for import statements.
pub const SOURCE_EXTENSIONS: [&str; 4] = [".ts", ".tsx", ".js", ".jsx"];
pub const EXCLUDED_DIRS: [&str; 6] = ["node_modules", ".git", ".next", "dist", "build", "coverage"];

/// A single role word together with its kebab-case spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    name: String,
    kebab: String,
}

impl Role {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kebab = to_kebab(&name);
        Role { name, kebab }
    }

    /// The compound (PascalCase) spelling, e.g. `UseCase`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kebab spelling, e.g. `use-case`.
    pub fn kebab(&self) -> &str {
        &self.kebab
    }
}

/// Closed, ordered list of role words.
///
/// Order only matters as a deterministic tie-break; the default words do not
/// overlap as suffixes of each other in practice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleVocabulary {
    roles: Vec<Role>,
}

impl RoleVocabulary {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary = RoleVocabulary { roles: Vec::new() };
        vocabulary.extend(names);
        vocabulary
    }

    /// Append roles after the existing ones. Duplicates are ignored.
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let role = Role::new(name);
            if role.name.is_empty() || self.roles.iter().any(|r| r.name == role.name) {
                continue;
            }
            self.roles.push(role);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    /// Look a role up by its kebab spelling (the suffix of a `base.role` name).
    pub fn find_by_kebab(&self, kebab: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.kebab == kebab)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl Default for RoleVocabulary {
    fn default() -> Self {
        RoleVocabulary::new(DEFAULT_ROLES)
    }
}

/// Resolved convention settings for one project.
#[derive(Debug, Clone)]
pub struct Conventions {
    /// Specifier prefix that maps onto `source_root` (e.g. `@/`).
    pub alias_prefix: String,
    /// Directory the alias prefix stands for.
    pub source_root: PathBuf,
    pub module_extensions: Vec<String>,
    pub index_files: Vec<String>,
    pub roles: RoleVocabulary,
    pub excluded_dirs: FxHashSet<String>,
    pub source_extensions: Vec<String>,
}

impl Conventions {
    /// Default tables with the alias mapped to `<project_root>/src`.
    pub fn for_project(project_root: &Path) -> Self {
        Conventions {
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
            source_root: project_root.join(DEFAULT_SOURCE_ROOT),
            module_extensions: to_strings(&MODULE_EXTENSIONS),
            index_files: to_strings(&INDEX_FILES),
            roles: RoleVocabulary::default(),
            excluded_dirs: EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
            source_extensions: to_strings(&SOURCE_EXTENSIONS),
        }
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.contains(name)
    }

    /// Whether `path` names a file that should be scanned for imports.
    pub fn is_source_file(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.source_extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_str()))
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}
