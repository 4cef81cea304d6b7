#![deny(rust_2018_idioms)]

use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn blkcsv() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_blkcsv"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let p = std::env::temp_dir().join(format!("blkcsv_cli_{name}_{nanos}"));
    fs::create_dir_all(&p).unwrap();
    p
}

#[test]
fn converts_under_base_dir() {
    let dir = tmp_dir("ok");
    fs::write(
        dir.join("sda.txt"),
        "259,0 0 1 2.123456789 1234 Q R 0 + 8 [process]\n",
    )
    .unwrap();

    let out = blkcsv()
        .args(["--base-dir"])
        .arg(&dir)
        .args(["sda.txt", "sda.csv"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fs::read_to_string(dir.join("sda.csv")).unwrap(),
        "259,0,1,2.123456789,1234,R,0,8\n"
    );

    fs::remove_dir_all(dir).ok();
}

#[test]
fn relative_names_resolve_against_working_dir() {
    let dir = tmp_dir("cwd");
    fs::write(dir.join("in"), "8,0 0 9 1.5 42 D R 100 + 16\n").unwrap();

    // the environment has no say in where files go
    let status = blkcsv()
        .current_dir(&dir)
        .env("BLKCSV_BASE_DIR", "/nonexistent")
        .args(["--flush-trailing", "in", "out"])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(
        fs::read_to_string(dir.join("out")).unwrap(),
        "8,0,9,1.5,42,R,100,16\n"
    );

    fs::remove_dir_all(dir).ok();
}

#[test]
fn wrong_argument_count_exits_2_without_io() {
    let dir = tmp_dir("args");
    let out = blkcsv()
        .current_dir(&dir)
        .args(["a", "b", "c"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("got 3 argument(s)"));
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn missing_input_exits_1() {
    let dir = tmp_dir("missing");
    let status = blkcsv()
        .current_dir(&dir)
        .args(["nope.txt", "out.csv"])
        .status()
        .unwrap();
    assert_eq!(status.code(), Some(1));
    assert!(!dir.join("out.csv").exists());

    fs::remove_dir_all(dir).ok();
}
