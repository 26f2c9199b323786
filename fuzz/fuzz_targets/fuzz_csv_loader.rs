//! Fuzz target for CSV table loading.
//!
//! Tests that table parsing handles arbitrary bytes without panicking,
//! including invalid UTF-8, unbalanced quotes and ragged rows.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pc_core::loader::Table;

fuzz_target!(|data: &[u8]| {
    for delimiter in [b',', b'\t'] {
        if let Ok(table) = Table::from_reader(data, delimiter) {
            // Every row must be addressable by every header
            for row in table.rows() {
                for header in table.headers() {
                    assert!(row.get(header).is_some());
                }
            }
        }
    }
});
