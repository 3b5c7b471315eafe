use serde::Serialize;

/// Descriptive statistics over the graded values of one gradebook column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub mean: f64,
    pub median: f64,
    pub mode: f64,
    pub root_mean_squared: f64,
    pub standard_deviation: f64,
    pub sum: f64,
}

impl ColumnSummary {
    /// All-zero summary, reported for columns without entries.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::empty();
        }

        let count = values.len() as f64;
        let sum: f64 = values.iter().sum();
        let mean = sum / count;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        // sorted ascending, so the first run to reach the max count wins ties
        let mut mode = sorted[0];
        let mut best_run = 0;
        let mut run = 0;
        for (i, value) in sorted.iter().enumerate() {
            if i > 0 && sorted[i - 1] == *value {
                run += 1;
            } else {
                run = 1;
            }
            if run > best_run {
                best_run = run;
                mode = *value;
            }
        }

        let root_mean_squared = (values.iter().map(|v| v * v).sum::<f64>() / count).sqrt();
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;

        Self {
            mean,
            median,
            mode,
            root_mean_squared,
            standard_deviation: variance.sqrt(),
            sum,
        }
    }
}
