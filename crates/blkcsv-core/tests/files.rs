#![deny(rust_2018_idioms)]

use std::fs;
use std::path::{Path, PathBuf};

use blkcsv_core::{convert_files, ConvertConfig, ConvertError, ConvertOptions, TrailingToken};

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let p = std::env::temp_dir().join(format!("blkcsv_core_{name}_{nanos}"));
    fs::create_dir_all(&p).unwrap();
    p
}

fn config(dir: &Path, opts: ConvertOptions) -> ConvertConfig {
    ConvertConfig::from_args(dir, &["trace.blkparse", "trace.csv"], opts).unwrap()
}

const TRACE: &str = "\
  8,0    3        1     0.000000000   697  A   W 223490 + 8 <- (8,2) 221442
  8,0    3        2     0.000001200   697  Q   W 223490 + 8 [kworker/u8:2]
  8,0    3        3     0.000004870   697  G   W 223490 + 8 [kworker/u8:2]

CPU3 (8,0):
  8,0    1        4     0.000551919     0  C   W 223490 + 8 [0]
";

#[test]
fn converts_a_trace_file() {
    let dir = tmp_dir("convert");
    fs::write(dir.join("trace.blkparse"), TRACE).unwrap();

    let stats = convert_files(&config(&dir, ConvertOptions::default())).unwrap();
    let csv = fs::read_to_string(dir.join("trace.csv")).unwrap();

    assert_eq!(
        csv,
        "8,0,1,0.000000000,697,W,223490,8\n\
         8,0,2,0.000001200,697,W,223490,8\n\
         8,0,3,0.000004870,697,W,223490,8\n\
         \n\
         CPU3,\n\
         8,0,4,0.000551919,0,W,223490,8\n"
    );
    assert_eq!(stats.lines, 6);
    assert_eq!(stats.full_records, 4);
    assert_eq!(stats.short_records, 2);
    assert_eq!(stats.bytes_written, csv.len() as u64);

    fs::remove_dir_all(dir).ok();
}

#[test]
fn existing_output_is_truncated() {
    let dir = tmp_dir("truncate");
    fs::write(dir.join("trace.blkparse"), "a b c \n").unwrap();
    fs::write(dir.join("trace.csv"), "stale contents that are longer\n").unwrap();

    convert_files(&config(&dir, ConvertOptions::default())).unwrap();
    assert_eq!(fs::read_to_string(dir.join("trace.csv")).unwrap(), "a,c,\n");

    fs::remove_dir_all(dir).ok();
}

#[test]
fn missing_input_leaves_output_alone() {
    let dir = tmp_dir("missing");
    let err = convert_files(&config(&dir, ConvertOptions::default())).unwrap_err();

    assert!(matches!(err, ConvertError::Open { ref path, .. } if path.ends_with("trace.blkparse")));
    assert!(!dir.join("trace.csv").exists());

    fs::remove_dir_all(dir).ok();
}

#[test]
fn unwritable_output_is_a_create_error() {
    let dir = tmp_dir("unwritable");
    fs::write(dir.join("in.txt"), "x y \n").unwrap();
    let cfg = ConvertConfig::from_args(
        &dir,
        &["in.txt", "no/such/dir/out.csv"],
        ConvertOptions::default(),
    )
    .unwrap();

    let err = convert_files(&cfg).unwrap_err();
    assert!(matches!(err, ConvertError::Create { .. }));

    fs::remove_dir_all(dir).ok();
}

#[test]
fn flush_trailing_over_files() {
    let dir = tmp_dir("flush");
    fs::write(dir.join("trace.blkparse"), "8,0 0 9 1.5 42 D R 100 + 16\n").unwrap();

    convert_files(&config(&dir, ConvertOptions::with_trailing(TrailingToken::Flush))).unwrap();
    assert_eq!(
        fs::read_to_string(dir.join("trace.csv")).unwrap(),
        "8,0,9,1.5,42,R,100,16\n"
    );

    fs::remove_dir_all(dir).ok();
}
