use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn scrawl(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scrawl").unwrap();
    cmd.env("SCRAWL_DIR", dir)
        .env_remove("SCRAWL_DATE_FORMAT")
        .env_remove("SCRAWL_EDITOR")
        .env_remove("SCRAWL_GPG_KEY")
        .env_remove("SCRAWL_LOG");
    cmd
}

fn add(dir: &Path, id: u64, tags: &[&str], body: &str) {
    scrawl(dir)
        .arg("add")
        .args(tags)
        .args(["--id", &id.to_string()])
        .write_stdin(body)
        .assert()
        .success();
}

fn paths(dir: &Path, names: &[&str]) -> String {
    names
        .iter()
        .map(|n| format!("{}\n", dir.join(n).display()))
        .collect()
}

#[test]
fn add_prints_path_and_stores_body() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("store");

    scrawl(&dir)
        .args(["add", "Work", "todo", "--id", "100"])
        .write_stdin("buy milk\n")
        .assert()
        .success()
        .stdout(paths(&dir, &["100_work_todo"]));

    assert_eq!(
        fs::read_to_string(dir.join("100_work_todo")).unwrap(),
        "buy milk\n"
    );
}

#[test]
fn add_rejects_empty_body() {
    let temp = TempDir::new().unwrap();

    scrawl(temp.path())
        .args(["add", "--id", "100"])
        .write_stdin("  \n")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No content"));

    assert!(!temp.path().join("100").exists());
}

#[test]
fn add_rejects_bad_tag() {
    let temp = TempDir::new().unwrap();

    scrawl(temp.path())
        .args(["add", "foo-bar", "--id", "1"])
        .write_stdin("x")
        .assert()
        .code(2);
    assert!(fs::read_dir(temp.path()).unwrap().next().is_none());
}

#[test]
fn add_with_repeated_id_replaces_entry() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 1, &["a"], "first");

    scrawl(temp.path())
        .args(["add", "a", "--id", "1"])
        .write_stdin("second")
        .assert()
        .success()
        .stdout(paths(temp.path(), &["1_a"]));
    assert_eq!(fs::read_to_string(temp.path().join("1_a")).unwrap(), "second");
}

#[test]
fn list_is_newest_first_and_reversible() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &[], "a");
    add(temp.path(), 200, &["x"], "b");
    add(temp.path(), 300, &[], "c");

    scrawl(temp.path())
        .args(["list", "-s"])
        .assert()
        .success()
        .stdout(paths(temp.path(), &["300", "200_x", "100"]));

    scrawl(temp.path())
        .args(["ls", "-s", "-r"])
        .assert()
        .success()
        .stdout(paths(temp.path(), &["100", "200_x", "300"]));
}

#[test]
fn list_filters_by_tag_and_bounds() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &["work"], "a");
    add(temp.path(), 200, &["home"], "b");
    add(temp.path(), 300, &["WORK", "home"], "c");

    scrawl(temp.path())
        .args(["list", "-s", "Work"])
        .assert()
        .success()
        .stdout(paths(temp.path(), &["300_work_home", "100_work"]));

    scrawl(temp.path())
        .args(["list", "-s", "-a", "150", "-b", "250"])
        .assert()
        .success()
        .stdout(paths(temp.path(), &["200_home"]));

    scrawl(temp.path())
        .args(["list", "-s", "-i", "100"])
        .assert()
        .success()
        .stdout(paths(temp.path(), &["100_work"]));
}

#[test]
fn blank_time_bound_is_an_argument_error() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &[], "a");

    for args in [["list", "-s", "-b", ""], ["list", "-s", "-a", "  "]] {
        scrawl(temp.path())
            .args(args)
            .assert()
            .code(2)
            .stdout("")
            .stderr(predicate::str::contains("Invalid argument"));
    }
}

#[test]
fn list_ignores_non_conforming_files() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &[], "a");
    fs::write(temp.path().join(".hidden"), "x").unwrap();
    fs::write(temp.path().join("notes.txt"), "x").unwrap();
    fs::write(temp.path().join("12ab"), "x").unwrap();
    fs::write(temp.path().join("config.json"), "{}").unwrap();

    scrawl(temp.path())
        .args(["list", "-s"])
        .assert()
        .success()
        .stdout(paths(temp.path(), &["100"]));
}

#[test]
fn empty_selection_exits_two() {
    let temp = TempDir::new().unwrap();

    scrawl(temp.path())
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No entries"));

    add(temp.path(), 100, &["a"], "x");
    scrawl(temp.path())
        .args(["get", "zzz"])
        .assert()
        .code(2);
}

#[test]
fn no_subcommand_lists() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &["idea"], "x");

    scrawl(temp.path())
        .env("SCRAWL_DATE_FORMAT", "%s")
        .assert()
        .success()
        .stdout(predicate::str::contains("100").and(predicate::str::contains("idea")));
}

#[test]
fn list_shows_ids_beyond_the_calendar() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &[], "a");
    add(temp.path(), 99_999_999_999_999, &["far"], "b");

    scrawl(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("99999999999999").and(predicate::str::contains("far")));

    scrawl(temp.path()).assert().success();
}

#[test]
fn get_by_signed_index() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &["a"], "oldest");
    add(temp.path(), 200, &["b"], "middle");
    add(temp.path(), 300, &["a"], "newest");

    scrawl(temp.path())
        .arg("get")
        .assert()
        .success()
        .stdout("newest");

    scrawl(temp.path())
        .args(["get", "-1"])
        .assert()
        .success()
        .stdout("oldest");

    scrawl(temp.path())
        .args(["get", "a", "1"])
        .assert()
        .success()
        .stdout("oldest");

    scrawl(temp.path())
        .args(["get", "b", "-s"])
        .assert()
        .success()
        .stdout(paths(temp.path(), &["200_b"]));
}

#[test]
fn get_out_of_range_exits_two() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &[], "x");

    scrawl(temp.path())
        .args(["get", "5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("out of range"));

    scrawl(temp.path())
        .args(["get", "-2"])
        .assert()
        .code(2);
}

#[test]
fn edit_runs_configured_editor() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &["a"], "old text\n");

    scrawl(temp.path())
        .env("SCRAWL_EDITOR", "sed -i s/old/new/")
        .args(["edit", "a"])
        .assert()
        .success()
        .stdout(paths(temp.path(), &["100_a"]));

    assert_eq!(
        fs::read_to_string(temp.path().join("100_a")).unwrap(),
        "new text\n"
    );
}

#[test]
fn edit_failure_leaves_entry_untouched() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &[], "keep\n");

    scrawl(temp.path())
        .env("SCRAWL_EDITOR", "false")
        .arg("edit")
        .assert()
        .code(3);

    assert_eq!(fs::read_to_string(temp.path().join("100")).unwrap(), "keep\n");
}

#[test]
fn delete_requires_confirmation() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &[], "a");
    add(temp.path(), 200, &[], "b");

    scrawl(temp.path())
        .arg("delete")
        .write_stdin("n\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Operation cancelled."));
    assert!(temp.path().join("200").exists());

    scrawl(temp.path())
        .arg("rm")
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(paths(temp.path(), &["200"]));
    assert!(!temp.path().join("200").exists());

    scrawl(temp.path())
        .args(["delete", "-y", "-1"])
        .assert()
        .success();
    assert!(!temp.path().join("100").exists());
}

#[test]
fn tags_are_distinct_and_sorted() {
    let temp = TempDir::new().unwrap();
    add(temp.path(), 100, &["work", "todo"], "a");
    add(temp.path(), 200, &["ideas", "work"], "b");
    add(temp.path(), 300, &[], "c");

    scrawl(temp.path())
        .arg("tags")
        .assert()
        .success()
        .stdout("ideas\ntodo\nwork\n");

    scrawl(temp.path())
        .args(["tags", "ideas"])
        .assert()
        .success()
        .stdout("ideas\nwork\n");
}

#[test]
fn interval_conversions() {
    let temp = TempDir::new().unwrap();

    scrawl(temp.path())
        .args(["interval", "parse", "1d2h"])
        .assert()
        .success()
        .stdout("93600\n");

    scrawl(temp.path())
        .args(["interval", "format", "90"])
        .assert()
        .success()
        .stdout("1m30s\n");

    scrawl(temp.path())
        .args(["interval", "before", "1d", "--base", "100000", "-f", "%s"])
        .assert()
        .success()
        .stdout("13600\n");

    scrawl(temp.path())
        .args(["interval", "after", "1m", "--base", "0", "-f", "%s"])
        .assert()
        .success()
        .stdout("60\n");

    scrawl(temp.path())
        .args(["interval", "parse", "3q"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn setup_errors_exit_one() {
    let temp = TempDir::new().unwrap();

    scrawl(temp.path())
        .args(["list", "--bogus"])
        .assert()
        .code(1);

    scrawl(temp.path())
        .env("SCRAWL_DATE_FORMAT", "%Q")
        .arg("list")
        .assert()
        .code(1);

    let file = temp.path().join("plain-file");
    fs::write(&file, "x").unwrap();
    scrawl(&file).arg("tags").assert().code(1);
}
