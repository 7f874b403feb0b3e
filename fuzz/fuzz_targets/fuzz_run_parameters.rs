#![no_main]

use libfuzzer_sys::fuzz_target;
use runlog::run_parameters::{parse_reader, ElementPaths};
use std::io::Cursor;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let _ = parse_reader(Cursor::new(data), Path::new("fuzz.xml"), &ElementPaths::default());
});
