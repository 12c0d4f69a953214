use crate::common::command::{init_repository_dir, run_kit_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn restore_overwrites_the_working_copy_with_the_committed_version(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "dirty".to_string(),
    ));

    run_kit_command(repository_dir.path(), &["checkout", "--", "1.txt"])
        .assert()
        .success();

    assert_eq!(read_file(&repository_dir.path().join("1.txt")), "one");

    Ok(())
}

#[rstest]
fn restore_does_not_touch_the_index(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "dirty".to_string(),
    ));
    run_kit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["checkout", "--", "1.txt"])
        .assert()
        .success();

    // restored content is not re-staged, and the staged entry survives
    assert_eq!(read_file(&repository_dir.path().join("1.txt")), "one");
    run_kit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1.txt"));

    Ok(())
}

#[rstest]
fn restoring_a_file_absent_from_the_head_snapshot_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["checkout", "--", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist in that commit."));

    Ok(())
}

#[rstest]
fn restore_works_for_nested_paths(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    std::fs::remove_file(repository_dir.path().join("a").join("2.txt"))?;

    run_kit_command(repository_dir.path(), &["checkout", "--", "a/2.txt"])
        .assert()
        .success();

    assert_eq!(
        read_file(&repository_dir.path().join("a").join("2.txt")),
        "two"
    );

    Ok(())
}
