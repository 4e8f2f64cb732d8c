//! importmend: repair module import specifiers broken by naming-convention renames.
//!
//! A source tree following the layered convention names logic files
//! `base.role.ts` and UI files `PascalCase.tsx`. After files are renamed,
//! importers still point at the old names; on a case-sensitive filesystem those
//! imports fail. This crate finds each import that no longer resolves (with
//! byte-exact casing), guesses the renamed target with a fixed set of naming
//! strategies, and rewrites only specifiers it can prove resolve.
//!
//! Pipeline per file: [`rewrite`] extracts specifiers, [`module_resolver`] and
//! [`fs_probe`] check them strictly, [`candidates`] proposes replacements.

pub use importmend_common::{conventions, naming};

pub mod candidates;
pub mod cli;
pub mod fs_probe;
pub mod module_resolver;
pub mod rename_map;
pub mod rewrite;
pub mod tracing_config;

pub use candidates::{Candidate, CandidateStrategy, Repair};
pub use conventions::Conventions;
pub use fs_probe::{ResolutionKind, ResolvedTarget};
pub use module_resolver::{ModuleResolver, SpecifierKind};
pub use rewrite::{FileOutcome, ImportRewriter, SpecifierStatus};
