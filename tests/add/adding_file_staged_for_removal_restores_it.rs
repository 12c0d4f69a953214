use crate::common::command::{init_repository_dir, run_kit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn adding_a_file_staged_for_removal_cancels_the_removal(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["rm", "1.txt"])
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.txt"));

    // re-create the file with its committed content and add it back
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "one".to_string(),
    ));
    run_kit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    // neither staged nor marked for removal afterwards
    run_kit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.txt").not());

    Ok(())
}
