use crate::common::command::{init_repository_dir, kit_commit, run_kit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn removing_a_tracked_file_deletes_it_and_stages_the_removal(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["rm", "1.txt"])
        .assert()
        .success();

    assert!(!repository_dir.path().join("1.txt").exists());

    run_kit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Removed Files ==="))
        .stdout(predicate::str::contains("1.txt"));

    Ok(())
}

#[rstest]
fn removing_an_already_deleted_tracked_file_still_stages_the_removal(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    std::fs::remove_file(repository_dir.path().join("1.txt"))?;

    run_kit_command(repository_dir.path(), &["rm", "1.txt"])
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.txt"));

    Ok(())
}

#[rstest]
fn a_committed_removal_drops_the_path_from_the_snapshot(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["rm", "1.txt"])
        .assert()
        .success();
    kit_commit(repository_dir.path(), "drop 1.txt")
        .assert()
        .success();

    // the file is no longer part of the head snapshot
    run_kit_command(repository_dir.path(), &["checkout", "--", "1.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist in that commit."));

    Ok(())
}
