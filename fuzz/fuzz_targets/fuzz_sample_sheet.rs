#![no_main]

use libfuzzer_sys::fuzz_target;
use runlog::sample_sheet::{SampleSheet, SampleSheetOptions};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must parse or fail with an error, never panic
    if let Ok(sheet) = SampleSheet::from_reader(data) {
        let _ = sheet.extract(&SampleSheetOptions::default());
        let _ = sheet.data().column_values("Sample_ID");
    }
});
