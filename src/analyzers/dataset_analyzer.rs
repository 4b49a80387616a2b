use crate::error::{ProcessingError, Result};
use crate::models::Dataset;
use serde::Serialize;

/// Per-column descriptive statistics.
///
/// `count` is the number of cells that parsed as numbers; everything else
/// in the column counts as `missing`.
#[derive(Debug, Clone, Serialize)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetSummary {
    pub rows: usize,
    pub columns: usize,
    pub column_stats: Vec<ColumnStats>,
}

impl DatasetSummary {
    pub fn detailed_summary(&self) -> String {
        let mut out = format!("Dataset: {} rows x {} columns\n", self.rows, self.columns);
        for stats in &self.column_stats {
            match (stats.min, stats.max, stats.mean) {
                (Some(min), Some(max), Some(mean)) => {
                    out.push_str(&format!(
                        "  {:<14} count={:<7} missing={:<7} min={:<12.4} max={:<12.4} mean={:.4}\n",
                        stats.name, stats.count, stats.missing, min, max, mean
                    ));
                }
                _ => {
                    out.push_str(&format!(
                        "  {:<14} no numeric values ({} missing)\n",
                        stats.name, stats.missing
                    ));
                }
            }
        }
        out
    }
}

pub struct DatasetAnalyzer;

impl Default for DatasetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Summarize the named columns, or every numeric-looking column when
    /// none are named.
    ///
    /// Explicitly named columns must exist; auto-detection probes the first
    /// rows of each column for parseable numbers.
    pub fn summarize(&self, dataset: &Dataset, columns: &[String]) -> Result<DatasetSummary> {
        let targets: Vec<String> = if columns.is_empty() {
            dataset
                .headers
                .iter()
                .filter(|name| self.looks_numeric(dataset, name))
                .cloned()
                .collect()
        } else {
            columns.to_vec()
        };

        let column_stats = targets
            .iter()
            .map(|name| self.column_stats(dataset, name))
            .collect::<Result<Vec<_>>>()?;

        Ok(DatasetSummary {
            rows: dataset.row_count(),
            columns: dataset.column_count(),
            column_stats,
        })
    }

    fn looks_numeric(&self, dataset: &Dataset, name: &str) -> bool {
        let Some(idx) = dataset.column_index(name) else {
            return false;
        };
        dataset
            .rows
            .iter()
            .take(20)
            .any(|row| row[idx].trim().parse::<f64>().is_ok())
    }

    fn column_stats(&self, dataset: &Dataset, name: &str) -> Result<ColumnStats> {
        let idx = dataset
            .column_index(name)
            .ok_or_else(|| ProcessingError::MissingColumn {
                name: name.to_string(),
            })?;

        let mut count = 0usize;
        let mut missing = 0usize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0f64;

        for row in &dataset.rows {
            match row[idx].trim().parse::<f64>() {
                Ok(v) => {
                    count += 1;
                    min = min.min(v);
                    max = max.max(v);
                    sum += v;
                }
                Err(_) => missing += 1,
            }
        }

        let (min, max, mean) = if count > 0 {
            (Some(min), Some(max), Some(sum / count as f64))
        } else {
            (None, None, None)
        };

        Ok(ColumnStats {
            name: name.to_string(),
            count,
            missing,
            min,
            max,
            mean,
        })
    }
}
