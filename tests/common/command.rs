use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// An initialized repository with three committed files, one of them nested.
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_kit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    for path in ["1.txt", "a/2.txt", "a/b/3.txt"] {
        run_kit_command(repository_dir.path(), &["add", path])
            .assert()
            .success();
    }

    kit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_kit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("kit").expect("Failed to find kit binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn kit_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_kit_command(dir, &["commit", message]);
    cmd.envs(vec![("KIT_AUTHOR_NAME", "fake_user")]);
    cmd
}

pub fn branch_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(".kit").join("refs").join("branches").join(name)
}

/// Read the fingerprint a branch points at.
pub fn get_branch_oid(dir: &Path, name: &str) -> Result<String, Box<dyn std::error::Error>> {
    Ok(std::fs::read_to_string(branch_path(dir, name))?
        .trim()
        .to_string())
}

/// Resolve HEAD through its branch-name indirection to a commit fingerprint.
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_content = std::fs::read_to_string(dir.join(".kit").join("HEAD"))?;
    get_branch_oid(dir, head_content.trim())
}

/// Count the object files stored under `.kit/objects`.
pub fn count_objects(dir: &Path) -> usize {
    walkdir::WalkDir::new(dir.join(".kit").join("objects"))
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .count()
}
