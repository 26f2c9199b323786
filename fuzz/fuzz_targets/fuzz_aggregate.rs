//! Fuzz target for pass percentage aggregation.
//!
//! Builds a two-column table from structured input and checks the counting
//! invariants hold for every grouping.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pc_core::aggregate::{aggregate, KeyOrder};
use pc_core::loader::Table;

#[derive(Debug, Arbitrary)]
struct Input {
    rows: Vec<(String, String)>,
    lexical: bool,
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fuzz_target!(|input: Input| {
    let mut csv = String::from("key,value\n");
    for (key, value) in &input.rows {
        csv.push_str(&quote(key));
        csv.push(',');
        csv.push_str(&quote(value));
        csv.push('\n');
    }

    let table = match Table::from_reader(csv.as_bytes(), b',') {
        Ok(table) => table,
        Err(_) => return,
    };
    let order = if input.lexical {
        KeyOrder::Lexical
    } else {
        KeyOrder::FirstSeen
    };

    let ds = aggregate(&table, "key", "value", order).expect("validated columns");
    let total: u64 = ds.groups.iter().map(|g| g.total).sum();
    assert!(total as usize <= table.len());
    for group in &ds.groups {
        assert!(group.total > 0);
        assert!(group.passes <= group.total);
        let pct = group.percentage();
        assert!((0.0..=100.0).contains(&pct));
    }
});
