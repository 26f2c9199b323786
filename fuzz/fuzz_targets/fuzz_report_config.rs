//! Fuzz target for report.json configuration parsing.
//!
//! Tests that JSON report configuration parsing and validation handle
//! arbitrary input without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pc_report::ReportConfig;

fuzz_target!(|data: &[u8]| {
    // Try to parse as JSON - should never panic, only return an error
    if let Ok(config) = serde_json::from_slice::<ReportConfig>(data) {
        let _ = config.validate();
    }
});
