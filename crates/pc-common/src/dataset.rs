//! Aggregation results shared between the aggregator and the renderer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header label of the value column in every chart dataset.
pub const PASS_PERCENTAGE_LABEL: &str = "Pass Percentage";

/// Pass counters for one key value of one data column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    /// Key column value this group was partitioned on.
    pub key: String,
    /// Rows in the group, blank data values included.
    pub total: u64,
    /// Rows whose data value is the pass token.
    pub passes: u64,
}

impl GroupSummary {
    /// Create an empty group for a key value.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            total: 0,
            passes: 0,
        }
    }

    /// Count one row, passing or not.
    pub fn record(&mut self, passed: bool) {
        self.total += 1;
        if passed {
            self.passes += 1;
        }
    }

    /// Pass percentage in `[0, 100]`; zero for an empty group.
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            100.0 * self.passes as f64 / self.total as f64
        } else {
            0.0
        }
    }
}

/// Pass percentages of one data column, grouped by the key column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDataset {
    /// Data column the groups were counted from.
    pub column: String,
    /// Key column the rows were grouped by.
    pub key_column: String,
    /// Groups in emission order.
    pub groups: Vec<GroupSummary>,
}

impl ChartDataset {
    pub fn new(
        column: impl Into<String>,
        key_column: impl Into<String>,
        groups: Vec<GroupSummary>,
    ) -> Self {
        Self {
            column: column.into(),
            key_column: key_column.into(),
            groups,
        }
    }

    /// Number of data rows (one per distinct key value).
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up a group by key value.
    pub fn group(&self, key: &str) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| g.key == key)
    }

    /// `(key, percentage)` pairs in emission order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.groups.iter().map(|g| (g.key.as_str(), g.percentage()))
    }

    /// Literal table form consumed by the charting library:
    /// `[[key_column, "Pass Percentage"], [key, pct], ...]`.
    pub fn to_array(&self) -> Value {
        let mut table = Vec::with_capacity(self.groups.len() + 1);
        table.push(Value::from(vec![
            Value::from(self.key_column.as_str()),
            Value::from(PASS_PERCENTAGE_LABEL),
        ]));
        for (key, pct) in self.rows() {
            table.push(Value::from(vec![Value::from(key), Value::from(pct)]));
        }
        Value::Array(table)
    }
}
