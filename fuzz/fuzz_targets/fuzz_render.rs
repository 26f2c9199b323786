//! Fuzz target for HTML rendering.
//!
//! Arbitrary column names and key values must never produce markup that
//! closes the script element early.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pc_common::{ChartDataset, GroupSummary};
use pc_report::{ReportConfig, ReportData, ReportGenerator};

#[derive(Debug, Arbitrary)]
struct Input {
    key_column: String,
    columns: Vec<(String, Vec<(String, u8, u8)>)>,
}

fuzz_target!(|input: Input| {
    let datasets: Vec<ChartDataset> = input
        .columns
        .into_iter()
        .map(|(column, groups)| {
            let groups = groups
                .into_iter()
                .map(|(key, total, passes)| GroupSummary {
                    key,
                    total: u64::from(total),
                    passes: u64::from(passes.min(total)),
                })
                .collect();
            ChartDataset::new(column, input.key_column.clone(), groups)
        })
        .collect();

    // Colliding identifiers are a reported error, not a crash
    let data = match ReportData::new(input.key_column.clone(), datasets) {
        Ok(data) => data,
        Err(_) => return,
    };

    let generator = ReportGenerator::new(ReportConfig::default().with_generated_at(false));
    if let Ok(html) = generator.generate(&data) {
        assert_eq!(html.matches("</script>").count(), 2);
    }
});
