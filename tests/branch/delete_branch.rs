use crate::common::command::{branch_path, init_repository_dir, run_kit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn delete_branch_successfully(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();
    assert!(branch_path(repository_dir.path(), "feature").is_file());

    run_kit_command(repository_dir.path(), &["rm-branch", "feature"])
        .assert()
        .success();

    assert!(!branch_path(repository_dir.path(), "feature").exists());

    Ok(())
}

#[rstest]
fn delete_nonexistent_branch_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["rm-branch", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name does not exist.",
        ));

    Ok(())
}

#[rstest]
fn delete_current_branch_fails_and_leaves_it_intact(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["rm-branch", "master"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot remove the current branch."));

    assert!(branch_path(repository_dir.path(), "master").is_file());

    Ok(())
}

#[rstest]
fn deleting_a_branch_keeps_its_commits(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    use crate::common::command::get_head_commit_sha;

    let repository_dir = init_repository_dir;
    let head_oid = get_head_commit_sha(repository_dir.path())?;

    run_kit_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();
    run_kit_command(repository_dir.path(), &["rm-branch", "feature"])
        .assert()
        .success();

    // only the pointer is gone; the commit it referenced is still stored
    run_kit_command(repository_dir.path(), &["cat-file", "-p", &head_oid])
        .assert()
        .success();

    Ok(())
}
