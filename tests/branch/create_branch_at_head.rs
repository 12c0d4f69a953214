use crate::common::command::{
    branch_path, get_branch_oid, get_head_commit_sha, init_repository_dir, run_kit_command,
};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn new_branch_points_at_the_current_head_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    assert!(branch_path(repository_dir.path(), "feature").is_file());
    assert_eq!(
        get_branch_oid(repository_dir.path(), "feature")?,
        get_head_commit_sha(repository_dir.path())?
    );

    Ok(())
}

#[rstest]
fn creating_a_branch_does_not_switch_to_it(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*master"))
        .stdout(predicate::str::contains("feature"));

    Ok(())
}

#[rstest]
fn branch_with_invalid_name_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["branch", "feature..bad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid branch name"));

    Ok(())
}
