//! Lines far larger than any reader or scratch buffer.

use std::io::BufReader;

use blkcsv_core::{convert, ConvertOptions};

#[test]
fn huge_tokens_survive_a_tiny_reader_buffer() {
    let big = "x".repeat(100_000);
    let line = format!("{big} 0 1 2 3 4 5 6 7 {big} \n");
    let reader = BufReader::with_capacity(16, line.as_bytes());

    let mut out = Vec::new();
    let stats = convert(reader, &mut out, &ConvertOptions::default()).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), format!("{big},1,2,3,5,6,{big}\n"));
    assert_eq!(stats.lines, 1);
    assert_eq!(stats.full_records, 1);
}

#[test]
fn many_long_lines_stay_separate() {
    let wide = "y".repeat(20_000);
    let input = format!("{wide} a b c d e f g h i \n").repeat(5);
    let reader = BufReader::with_capacity(64, input.as_bytes());

    let mut out = Vec::new();
    let stats = convert(reader, &mut out, &ConvertOptions::default()).unwrap();

    assert_eq!(stats.lines, 5);
    assert_eq!(String::from_utf8(out).unwrap(), format!("{wide},b,c,d,f,g,i\n").repeat(5));
}
