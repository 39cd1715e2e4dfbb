#![no_main]

use libfuzzer_sys::fuzz_target;
use strata_io::detect::RVTOOLS_MARKER_SHEETS;
use strata_model::FileType;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let _ = strata_io::validate_file_name(&input);

    // One sheet name per line.
    let sheets: Vec<&str> = input.split('\n').collect();
    let detected = strata_io::detect_file_type(sheets.iter().copied());
    let has_marker = sheets.iter().any(|s| RVTOOLS_MARKER_SHEETS.contains(s));
    let has_azmigrate = sheets.iter().any(|s| strata_io::is_azmigrate_sheet(s));

    let expected = if has_marker {
        FileType::RvTools
    } else if has_azmigrate {
        FileType::AzMigrate
    } else {
        FileType::Unknown
    };
    assert_eq!(detected, expected);
});
