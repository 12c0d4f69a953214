use crate::common::command::{init_repository_dir, run_kit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn adding_a_missing_file_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["add", "no-such-file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist."));

    Ok(())
}

#[rstest]
fn a_failed_add_stages_nothing(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["add", "no-such-file.txt"])
        .assert()
        .failure();

    run_kit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no-such-file").not());

    Ok(())
}
