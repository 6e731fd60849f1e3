mod common;

use std::fs;
use std::path::Path;

use common::*;
use egg_runner::overlay::{OverlaySync, RemoteSpec};

fn overlay(upstream: &Path, staging: &Path, workdir: &Path) -> OverlaySync {
    let remote = RemoteSpec::new(&file_url(upstream), Some("main"), None).expect("remote spec");
    OverlaySync::new(remote, staging, workdir)
}

#[test]
fn upstream_removed_file_leaves_a_dangling_link_that_is_deleted() {
    if !have_git() {
        eprintln!("skipping: git not found in PATH");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let upstream = td.path().join("upstream");
    init_repo(&upstream);
    write_file(&upstream.join("a.txt"), "a\n");
    write_file(&upstream.join("dir/b.txt"), "b\n");
    commit_all(&upstream, "c1");

    let staging = td.path().join("staging");
    let workdir = td.path().join("work");
    fs::create_dir_all(&workdir).expect("workdir");
    let sync = overlay(&upstream, &staging, &workdir);
    sync.run().expect("first sync");

    git_ok(&upstream, &["rm", "-q", "dir/b.txt"]);
    commit_all(&upstream, "remove b");
    let report = sync.run().expect("second sync");

    assert!(
        workdir.join("dir/b.txt").symlink_metadata().is_err(),
        "removed upstream file must disappear from the overlay"
    );
    assert!(workdir.join("a.txt").symlink_metadata().is_ok());
    assert_eq!(report.dangling_removed, 1);
}

#[test]
fn user_created_files_and_links_survive_reconciliation() {
    if !have_git() {
        eprintln!("skipping: git not found in PATH");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let upstream = td.path().join("upstream");
    init_repo(&upstream);
    write_file(&upstream.join("a.txt"), "a\n");
    write_file(&upstream.join("dir/b.txt"), "b\n");
    commit_all(&upstream, "c1");

    let staging = td.path().join("staging");
    let workdir = td.path().join("work");
    fs::create_dir_all(&workdir).expect("workdir");
    let sync = overlay(&upstream, &staging, &workdir);
    sync.run().expect("first sync");

    // The child process writes its own state: a regular file and a symlink
    // at paths that were never part of the repository.
    write_file(&workdir.join("dir/c.txt"), "user data\n");
    let user_target = td.path().join("user-target.txt");
    write_file(&user_target, "keep me\n");
    std::os::unix::fs::symlink(&user_target, workdir.join("user-link.txt")).expect("symlink");

    let report = sync.run().expect("second sync");

    assert_eq!(
        fs::read_to_string(workdir.join("dir/c.txt")).expect("read"),
        "user data\n"
    );
    assert!(
        workdir.join("user-link.txt").symlink_metadata().is_ok(),
        "a user symlink with no repository history must never be deleted"
    );
    assert_eq!(report.orphans_removed, 0);
    assert_eq!(report.dangling_removed, 0);
}

#[test]
fn orphan_with_repository_history_is_deleted() {
    if !have_git() {
        eprintln!("skipping: git not found in PATH");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let upstream = td.path().join("upstream");
    init_repo(&upstream);
    // legacy.txt existed once and was removed before the first sync here, so
    // it is in history but not in the current tree.
    write_file(&upstream.join("legacy.txt"), "old\n");
    commit_all(&upstream, "c1");
    git_ok(&upstream, &["rm", "-q", "legacy.txt"]);
    commit_all(&upstream, "drop legacy");
    write_file(&upstream.join("a.txt"), "a\n");
    commit_all(&upstream, "c3");

    let staging = td.path().join("staging");
    let workdir = td.path().join("work");
    fs::create_dir_all(&workdir).expect("workdir");
    let sync = overlay(&upstream, &staging, &workdir);
    sync.run().expect("first sync");

    // A leftover overlay link from an earlier deployment: the path is proven
    // repository history, and its target still resolves.
    std::os::unix::fs::symlink(staging.join("a.txt"), workdir.join("legacy.txt"))
        .expect("symlink");

    let report = sync.run().expect("second sync");

    assert!(
        workdir.join("legacy.txt").symlink_metadata().is_err(),
        "history-proven orphan must be deleted"
    );
    assert_eq!(report.orphans_removed, 1);
    assert!(workdir.join("a.txt").symlink_metadata().is_ok());
}

#[test]
fn dangling_user_link_is_cleaned_up() {
    if !have_git() {
        eprintln!("skipping: git not found in PATH");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let upstream = td.path().join("upstream");
    init_repo(&upstream);
    write_file(&upstream.join("a.txt"), "a\n");
    commit_all(&upstream, "c1");

    let staging = td.path().join("staging");
    let workdir = td.path().join("work");
    fs::create_dir_all(&workdir).expect("workdir");
    let sync = overlay(&upstream, &staging, &workdir);
    sync.run().expect("first sync");

    // Any dangling link is leftover by definition, wherever it came from.
    std::os::unix::fs::symlink(td.path().join("nowhere"), workdir.join("ghost.txt"))
        .expect("symlink");

    let report = sync.run().expect("second sync");
    assert!(workdir.join("ghost.txt").symlink_metadata().is_err());
    assert_eq!(report.dangling_removed, 1);
}
