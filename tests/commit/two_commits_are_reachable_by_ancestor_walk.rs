use crate::common::command::{
    count_objects, get_head_commit_sha, kit_commit, repository_dir, run_kit_command,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use bytes::Bytes;
use kit::artifacts::objects::blob::Blob;
use kit::artifacts::objects::object::Object;
use predicates::prelude::*;
use rstest::rstest;

// init -> commit f="v1" -> commit f="v2": the walk from the branch head
// reaches both commits plus the root, each snapshot maps f to the right
// blob, and exactly two distinct blob objects exist.

#[rstest]
fn history_records_one_snapshot_per_commit(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_kit_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(dir.path().join("f.txt"), "v1".to_string()));
    run_kit_command(dir.path(), &["add", "f.txt"])
        .assert()
        .success();
    kit_commit(dir.path(), "first").assert().success();
    let first_oid = get_head_commit_sha(dir.path())?;

    write_file(FileSpec::new(dir.path().join("f.txt"), "v2".to_string()));
    run_kit_command(dir.path(), &["add", "f.txt"])
        .assert()
        .success();
    kit_commit(dir.path(), "second").assert().success();
    let second_oid = get_head_commit_sha(dir.path())?;

    assert_ne!(first_oid, second_oid);

    // both commits and the root are reachable from the branch head
    run_kit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("commit {}", second_oid)))
        .stdout(predicate::str::contains(format!("commit {}", first_oid)))
        .stdout(predicate::str::contains("first"))
        .stdout(predicate::str::contains("second"))
        .stdout(predicate::str::contains("initial commit"));

    // each snapshot maps f.txt to the fingerprint of its own version
    let v1_oid = Blob::new(Bytes::from_static(b"v1")).object_id()?;
    let v2_oid = Blob::new(Bytes::from_static(b"v2")).object_id()?;

    run_kit_command(dir.path(), &["cat-file", "-p", &first_oid])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "track {} f.txt",
            v1_oid.as_ref()
        )));
    run_kit_command(dir.path(), &["cat-file", "-p", &second_oid])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "track {} f.txt",
            v2_oid.as_ref()
        )));

    // stored objects: root commit + two commits + two distinct blobs
    assert_eq!(count_objects(dir.path()), 5);

    Ok(())
}
