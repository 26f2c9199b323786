//! Per-group pass percentage aggregation.

use crate::loader::Table;
use clap::ValueEnum;
use pc_common::{ChartDataset, Error, GroupSummary, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// Value that marks a passing row, compared ASCII case-insensitively.
pub const PASS_TOKEN: &str = "pass";

/// Ordering of groups within a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyOrder {
    /// Order in which each key first appears in the file.
    #[default]
    FirstSeen,
    /// Byte-wise lexical order of the key strings.
    Lexical,
}

impl std::fmt::Display for KeyOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyOrder::FirstSeen => write!(f, "first-seen"),
            KeyOrder::Lexical => write!(f, "lexical"),
        }
    }
}

/// Whether a data value counts as a pass.
pub fn is_pass(value: &str) -> bool {
    value.eq_ignore_ascii_case(PASS_TOKEN)
}

/// Whether a data value is absent. Whitespace is a value, not a blank.
pub fn is_blank(value: &str) -> bool {
    value.is_empty()
}

/// Group the rows of `table` by `key_column` and compute the pass percentage
/// of `data_column` for each group.
///
/// Every row counts toward its group's total, including rows whose data value
/// is blank. A key only yields a group when at least one of its rows has a
/// non-blank value in `data_column`. Both columns must already have been
/// validated against the table headers; a missing column here is an internal
/// error.
pub fn aggregate(
    table: &Table,
    key_column: &str,
    data_column: &str,
    order: KeyOrder,
) -> Result<ChartDataset> {
    let key_idx = resolve(table, key_column)?;
    let data_idx = resolve(table, data_column)?;

    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<GroupSummary> = Vec::new();
    let mut observed: Vec<bool> = Vec::new();

    for (row_no, row) in table.rows().enumerate() {
        let (key, value) = match (row.get_index(key_idx), row.get_index(data_idx)) {
            (Some(key), Some(value)) => (key, value),
            _ => {
                return Err(Error::Internal(format!(
                    "row {} is shorter than the header row",
                    row_no + 1
                )))
            }
        };

        let slot = *slots.entry(key).or_insert_with(|| {
            groups.push(GroupSummary::new(key));
            observed.push(false);
            groups.len() - 1
        });
        groups[slot].record(is_pass(value));
        observed[slot] |= !is_blank(value);
    }

    let mut groups: Vec<GroupSummary> = groups
        .into_iter()
        .zip(observed)
        .filter_map(|(group, seen)| seen.then_some(group))
        .collect();

    if order == KeyOrder::Lexical {
        groups.sort_by(|a, b| a.key.cmp(&b.key));
    }

    trace!(column = data_column, groups = groups.len(), "Aggregated column");
    Ok(ChartDataset::new(data_column, key_column, groups))
}

/// Aggregate each of `data_columns` against the same key column, preserving
/// request order.
pub fn aggregate_all(
    table: &Table,
    key_column: &str,
    data_columns: &[String],
    order: KeyOrder,
) -> Result<Vec<ChartDataset>> {
    data_columns
        .iter()
        .map(|column| aggregate(table, key_column, column, order))
        .collect()
}

fn resolve(table: &Table, column: &str) -> Result<usize> {
    table.column_index(column).ok_or_else(|| {
        Error::Internal(format!(
            "column '{}' was not validated before aggregation",
            column
        ))
    })
}
