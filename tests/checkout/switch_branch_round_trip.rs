use crate::common::command::{init_repository_dir, kit_commit, run_kit_command};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

// Switching A -> B -> A restores a content-identical working directory,
// provided no untracked conflicts existed.

#[rstest]
fn switching_back_and_forth_restores_the_working_directory(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["branch", "side"])
        .assert()
        .success();
    run_kit_command(repository_dir.path(), &["checkout", "side"])
        .assert()
        .success();

    // diverge on the side branch
    write_file(FileSpec::new(
        repository_dir.path().join("1.txt"),
        "uno".to_string(),
    ));
    run_kit_command(repository_dir.path(), &["add", "1.txt"])
        .assert()
        .success();
    kit_commit(repository_dir.path(), "side edit")
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();

    assert_eq!(read_file(&repository_dir.path().join("1.txt")), "one");
    assert_eq!(
        read_file(&repository_dir.path().join("a").join("2.txt")),
        "two"
    );
    assert_eq!(
        read_file(&repository_dir.path().join("a").join("b").join("3.txt")),
        "three"
    );

    run_kit_command(repository_dir.path(), &["checkout", "side"])
        .assert()
        .success();

    assert_eq!(read_file(&repository_dir.path().join("1.txt")), "uno");

    Ok(())
}

#[rstest]
fn switching_deletes_files_the_target_does_not_track(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    // freeze the initial state on a side branch, then drop 1.txt on master
    run_kit_command(repository_dir.path(), &["branch", "side"])
        .assert()
        .success();
    run_kit_command(repository_dir.path(), &["rm", "1.txt"])
        .assert()
        .success();
    kit_commit(repository_dir.path(), "drop 1.txt")
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["checkout", "side"])
        .assert()
        .success();
    assert_eq!(read_file(&repository_dir.path().join("1.txt")), "one");

    run_kit_command(repository_dir.path(), &["checkout", "master"])
        .assert()
        .success();
    assert!(!repository_dir.path().join("1.txt").exists());

    Ok(())
}

#[rstest]
fn switching_clears_the_index(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["branch", "side"])
        .assert()
        .success();

    // a pending removal is commit-relative state and dies with the switch
    run_kit_command(repository_dir.path(), &["rm", "1.txt"])
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["checkout", "side"])
        .assert()
        .success();

    run_kit_command(repository_dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*side"))
        .stdout(predicate::str::contains("1.txt").not());

    // the removal was never committed, so the file came back with the switch
    assert_eq!(read_file(&repository_dir.path().join("1.txt")), "one");

    Ok(())
}
