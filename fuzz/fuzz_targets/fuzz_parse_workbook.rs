#![no_main]

use libfuzzer_sys::fuzz_target;
use strata_io::ParseOptions;

/// Large enough for a small zipped workbook, small enough to keep iterations fast.
const MAX_INPUT_BYTES: usize = 1 << 20;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > MAX_INPUT_BYTES {
        return;
    }

    // Malformed workbooks must come back as errors, never panics.
    let parsed =
        strata_io::parse_workbook_bytes(data.to_vec(), "fuzz.xlsx", ParseOptions::default());
    if let Ok(parsed) = parsed {
        assert_eq!(parsed.vm_count, parsed.vms.len());
        for vm in &parsed.vms {
            assert!(!vm.name.trim().is_empty());
        }
    }
});
