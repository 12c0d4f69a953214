use crate::common::command::{get_branch_oid, init_repository_dir, run_kit_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn creating_a_branch_that_already_exists_fails(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = init_repository_dir;

    run_kit_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .success();
    let oid_before = get_branch_oid(repository_dir.path(), "feature")?;

    run_kit_command(repository_dir.path(), &["branch", "feature"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "A branch with that name already exists.",
        ));

    // the existing pointer is untouched
    assert_eq!(
        get_branch_oid(repository_dir.path(), "feature")?,
        oid_before
    );

    Ok(())
}
