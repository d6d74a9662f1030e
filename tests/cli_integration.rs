/*!
 * Integration tests driving the dirclone binary
 */

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dirclone"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut file = File::create(path).unwrap();
    write!(file, "{}", content).unwrap();
}

#[test]
fn test_clones_current_directory() {
    let temp_dir = tempdir().unwrap();
    let project = temp_dir.path().join("foo");
    write_file(&project.join("index.js"), "console.log(1);\n");
    write_file(&project.join("node_modules/left-pad/index.js"), "pad\n");
    write_file(&project.join("lib/node_modules/x.js"), "x\n");

    let output = run_in(&project, &[]);
    assert!(output.status.success(), "{:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["Finished copying files to /foo-clone directory."]
    );

    let dest = temp_dir.path().join("foo-clone");
    assert_eq!(
        fs::read_to_string(dest.join("index.js")).unwrap(),
        "console.log(1);\n"
    );
    assert!(dest.join("lib").is_dir());
    assert!(!dest.join("node_modules").exists());
    assert!(!dest.join("lib/node_modules").exists());
    assert!(!project.join("foo-clone").exists());
}

#[test]
fn test_second_run_fails_without_touching_clone() {
    let temp_dir = tempdir().unwrap();
    let project = temp_dir.path().join("bar");
    write_file(&project.join("a.txt"), "first\n");

    assert!(run_in(&project, &[]).status.success());

    write_file(&project.join("b.txt"), "second\n");
    let output = run_in(&project, &[]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already exists"), "{}", stderr);

    let dest = temp_dir.path().join("bar-clone");
    assert!(dest.join("a.txt").is_file());
    assert!(!dest.join("b.txt").exists());
}

#[test]
fn test_exclude_flag_adds_names() {
    let temp_dir = tempdir().unwrap();
    let project = temp_dir.path().join("baz");
    write_file(&project.join("a"), "skip\n");
    write_file(&project.join("abc"), "keep\n");
    write_file(&project.join("deep/a/file.txt"), "skip\n");
    write_file(&project.join("nodeX_modules/keep.txt"), "keep\n");

    let output = run_in(&project, &["--exclude", "a"]);
    assert!(output.status.success(), "{:?}", output);

    let dest = temp_dir.path().join("baz-clone");
    assert!(!dest.join("a").exists());
    assert!(!dest.join("deep/a").exists());
    assert!(dest.join("deep").is_dir());
    assert!(dest.join("abc").is_file());
    assert!(dest.join("nodeX_modules/keep.txt").is_file());
}

#[test]
fn test_explicit_source_argument() {
    let temp_dir = tempdir().unwrap();
    let project = temp_dir.path().join("qux");
    write_file(&project.join("main.rs"), "fn main() {}\n");

    let output = run_in(temp_dir.path(), &["qux"]);
    assert!(output.status.success(), "{:?}", output);
    assert!(temp_dir.path().join("qux-clone/main.rs").is_file());
}
