use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::args::CliArgs;
use super::config::resolve_settings;
use super::driver::{collect_source_files, run, run_with_settings};
use crate::conventions::Conventions;

fn write_file(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["importmend"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).unwrap()
}

/// A small layered project: logic files already renamed, importers stale.
fn layered_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "src/domain/article/article.repository.ts", "export interface ArticleRepository {}\n");
    write_file(root, "src/components/ScoreViewer.tsx", "export function ScoreViewer() {}\n");
    write_file(
        root,
        "src/application/get-article.use-case.ts",
        "import { ArticleRepository } from '@/domain/article/ArticleRepository';\n",
    );
    write_file(
        root,
        "src/app/page.tsx",
        "import React from 'react';\nimport { ScoreViewer } from \"../components/score-viewer\";\n",
    );
    write_file(root, "src/lib/ok.ts", "import { x } from './ok-helper';\n");
    write_file(root, "src/lib/ok-helper.ts", "export const x = 1;\n");
    dir
}

#[test]
fn collect_source_files_skips_excluded_and_foreign_files() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "src/b.ts", "");
    write_file(root, "src/a.tsx", "");
    write_file(root, "src/styles.css", "");
    write_file(root, "src/node_modules/pkg/index.js", "");
    write_file(root, "src/nested/.git/hooks.js", "");
    write_file(root, "scripts/migrate.js", "");

    let conventions = Conventions::for_project(root);
    let files = collect_source_files(
        &[root.join("src"), root.join("scripts"), root.join("src"), root.join("missing")],
        &conventions,
    );

    assert_eq!(
        files,
        vec![
            root.join("src/a.tsx"),
            root.join("src/b.ts"),
            root.join("scripts/migrate.js"),
        ]
    );
}

#[test]
fn run_fixes_stale_imports() {
    let project = layered_project();
    let root = project.path();

    let summary = run(&args(&[]), root).unwrap();

    assert_eq!(summary.files_scanned, 6);
    assert_eq!(summary.fixed_count(), 2);
    assert!(summary.failures.is_empty());
    assert_eq!(
        fs::read_to_string(root.join("src/application/get-article.use-case.ts")).unwrap(),
        "import { ArticleRepository } from '@/domain/article/article.repository';\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("src/app/page.tsx")).unwrap(),
        "import React from 'react';\nimport { ScoreViewer } from \"../components/ScoreViewer\";\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("src/lib/ok.ts")).unwrap(),
        "import { x } from './ok-helper';\n"
    );
}

#[test]
fn second_run_is_a_no_op() {
    let project = layered_project();
    let root = project.path();

    run(&args(&[]), root).unwrap();
    let summary = run(&args(&[]), root).unwrap();
    assert_eq!(summary.fixed_count(), 0);
}

#[test]
fn dry_run_leaves_files_untouched() {
    let project = layered_project();
    let root = project.path();
    let page = root.join("src/app/page.tsx");
    let before = fs::read_to_string(&page).unwrap();

    let summary = run(&args(&["--dry-run"]), root).unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.fixed_count(), 2);
    assert!(summary.outcomes.iter().all(|outcome| !outcome.written));
    assert_eq!(fs::read_to_string(&page).unwrap(), before);
}

#[test]
fn unreadable_file_does_not_abort_the_run() {
    let project = layered_project();
    let root = project.path();
    let broken = root.join("src/aaa-binary.ts");
    fs::write(&broken, [0xff, 0xfe, 0x00, 0x80]).unwrap();

    let summary = run(&args(&[]), root).unwrap();

    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].path, broken);
    assert_eq!(summary.fixed_count(), 2);
}

#[test]
fn rename_log_applies_before_smart_repair() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "src/domain/work-part.entity.ts", "");
    write_file(root, "src/app/index.ts", "import { WorkPart } from '../domain/WorkPartModel';\n");
    write_file(root, "renames.log", "src/domain/WorkPartModel.ts src/domain/work-part.entity.ts\n");

    let settings = resolve_settings(&args(&["--rename-log", "renames.log"]), root).unwrap();
    let summary = run_with_settings(&settings).unwrap();

    assert_eq!(summary.fixed_count(), 1);
    assert!(summary.outcomes.iter().any(|outcome| outcome.renamed));
    assert_eq!(
        fs::read_to_string(root.join("src/app/index.ts")).unwrap(),
        "import { WorkPart } from '../domain/work-part.entity';\n"
    );
}

#[test]
fn missing_rename_log_is_a_setup_error() {
    let project = layered_project();
    let err = run(&args(&["--rename-log", "missing.log"]), project.path()).unwrap_err();
    assert!(format!("{err:#}").contains("missing.log"));
}
