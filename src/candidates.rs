//! Candidate generation for broken specifiers.
//!
//! When a local specifier fails strict resolution, the basename it names is
//! run through an ordered list of naming strategies. Each strategy is a pure
//! function proposing replacement basenames; a single reducer validates every
//! proposal against the filesystem with the same strict rules used for the
//! original check. Strategy order is the ranking.

use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tracing::trace;

use crate::conventions::Conventions;
use crate::fs_probe::{self, ResolvedTarget};
use crate::naming;

/// Which naming strategy produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateStrategy {
    /// Same name, casing taken from a directory entry.
    CaseCorrection,
    /// `ArticleRepository` -> `article.repository`.
    RoleRename,
    /// `score-viewer` -> `ScoreViewer`.
    UiRename,
    /// `work-part` -> `work.part`.
    HyphenToDot,
    /// `work.part.repository` -> `work-part.repository` / `work-part-repository`.
    DotToHyphen,
}

impl CandidateStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            CandidateStrategy::CaseCorrection => "case-correction",
            CandidateStrategy::RoleRename => "role-rename",
            CandidateStrategy::UiRename => "ui-rename",
            CandidateStrategy::HyphenToDot => "hyphen-to-dot",
            CandidateStrategy::DotToHyphen => "dot-to-hyphen",
        }
    }
}

impl std::fmt::Display for CandidateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A proposed replacement basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub strategy: CandidateStrategy,
}

/// A candidate that passed strict resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCandidate {
    pub candidate: Candidate,
    /// Extensionless path of the candidate (broken path's directory + name).
    pub path: PathBuf,
    pub target: ResolvedTarget,
}

/// Outcome of repairing one broken path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    Found(ValidatedCandidate),
    /// Several differently-named directory entries match case-insensitively.
    Ambiguous(Vec<String>),
    NotFound,
}

struct StrategyInput<'a> {
    dir: &'a Path,
    basename: &'a str,
    conventions: &'a Conventions,
}

type StrategyFn = fn(&StrategyInput<'_>) -> Vec<String>;

const STRATEGIES: [(CandidateStrategy, StrategyFn); 5] = [
    (CandidateStrategy::CaseCorrection, case_correction),
    (CandidateStrategy::RoleRename, role_rename),
    (CandidateStrategy::UiRename, ui_rename),
    (CandidateStrategy::HyphenToDot, hyphen_to_dot),
    (CandidateStrategy::DotToHyphen, dot_to_hyphen),
];

fn case_correction(input: &StrategyInput<'_>) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(input.dir) else {
        return Vec::new();
    };
    let wanted = input.basename.to_lowercase();
    entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let path = PathBuf::from(entry.file_name());
            let stem = path.file_stem()?.to_str()?.to_string();
            (stem.to_lowercase() == wanted).then_some(stem)
        })
        .collect()
}

fn role_rename(input: &StrategyInput<'_>) -> Vec<String> {
    vec![naming::predict_logic_name(
        input.basename,
        &input.conventions.roles,
    )]
}

fn ui_rename(input: &StrategyInput<'_>) -> Vec<String> {
    vec![naming::compose_ui_name(input.basename)]
}

fn hyphen_to_dot(input: &StrategyInput<'_>) -> Vec<String> {
    if input.basename.contains('-') {
        vec![input.basename.replace('-', ".")]
    } else {
        Vec::new()
    }
}

fn dot_to_hyphen(input: &StrategyInput<'_>) -> Vec<String> {
    if input.basename.contains('.') {
        vec![
            input.basename.replacen('.', "-", 1),
            input.basename.replace('.', "-"),
        ]
    } else {
        Vec::new()
    }
}

/// Every proposal for `broken`, unvalidated, in strategy order.
///
/// Only the case-correction strategy reads the filesystem (a listing of the
/// containing directory).
pub fn propose(broken: &Path, conventions: &Conventions) -> Vec<Candidate> {
    let Some(dir) = broken.parent() else {
        return Vec::new();
    };
    let Some(basename) = broken.file_name().and_then(|name| name.to_str()) else {
        return Vec::new();
    };
    let input = StrategyInput {
        dir,
        basename,
        conventions,
    };

    STRATEGIES
        .iter()
        .flat_map(|&(strategy, strategy_fn)| {
            strategy_fn(&input)
                .into_iter()
                .map(move |name| Candidate { name, strategy })
        })
        .filter(|candidate| !candidate.name.is_empty())
        .collect()
}

/// Proposals for `broken` that resolve strictly, in strategy order.
///
/// A name proposed by more than one strategy is kept only once, under the
/// first strategy that produced it.
pub fn generate(broken: &Path, conventions: &Conventions) -> Vec<ValidatedCandidate> {
    let Some(dir) = broken.parent() else {
        return Vec::new();
    };
    let mut seen = FxHashSet::default();
    let mut validated = Vec::new();

    for candidate in propose(broken, conventions) {
        if !seen.insert(candidate.name.clone()) {
            continue;
        }
        let path = dir.join(&candidate.name);
        match fs_probe::resolve_module(&path, conventions) {
            Some(target) => {
                trace!(name = %candidate.name, strategy = %candidate.strategy, "candidate resolves");
                validated.push(ValidatedCandidate {
                    candidate,
                    path,
                    target,
                });
            }
            None => {
                trace!(name = %candidate.name, strategy = %candidate.strategy, "candidate rejected");
            }
        }
    }

    validated
}

/// Pick the repair from validated candidates.
///
/// Two or more distinct case-corrected names are ambiguous (directory order
/// is not stable across platforms); otherwise the first candidate wins.
pub fn select(validated: Vec<ValidatedCandidate>) -> Repair {
    let case_matches: Vec<String> = validated
        .iter()
        .filter(|v| v.candidate.strategy == CandidateStrategy::CaseCorrection)
        .map(|v| v.candidate.name.clone())
        .collect();
    if case_matches.len() > 1 {
        let mut names = case_matches;
        names.sort();
        return Repair::Ambiguous(names);
    }

    match validated.into_iter().next() {
        Some(first) => Repair::Found(first),
        None => Repair::NotFound,
    }
}

/// Generate, validate and select a repair for `broken`.
pub fn find_repair(broken: &Path, conventions: &Conventions) -> Repair {
    select(generate(broken, conventions))
}
