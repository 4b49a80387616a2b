use crate::error::{ProcessingError, Result};
use crate::models::Dataset;
use tracing::warn;

/// Policy for columns whose observed minimum equals their maximum, where
/// the min-max transform divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantColumnPolicy {
    /// Leave the column unchanged and record it in the report
    Skip,
    /// Map every present value to 0.5
    Midpoint,
    /// Return a typed error naming the column
    Fail,
}

impl ConstantColumnPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "skip" => Some(ConstantColumnPolicy::Skip),
            "midpoint" => Some(ConstantColumnPolicy::Midpoint),
            "fail" => Some(ConstantColumnPolicy::Fail),
            _ => None,
        }
    }
}

/// Rescales selected columns to [0, 1] in place using each column's
/// observed minimum and maximum.
///
/// Columns named but absent from the dataset are skipped, not errors.
/// Empty cells do not participate in the minimum/maximum and stay empty.
pub struct Normalizer {
    columns: Vec<String>,
    policy: ConstantColumnPolicy,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizeReport {
    pub normalized: Vec<String>,
    pub absent: Vec<String>,
    pub constant: Vec<String>,
}

impl NormalizeReport {
    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} column(s) normalized", self.normalized.len())];
        if !self.absent.is_empty() {
            parts.push(format!("{} absent ({})", self.absent.len(), self.absent.join(", ")));
        }
        if !self.constant.is_empty() {
            parts.push(format!(
                "{} constant ({})",
                self.constant.len(),
                self.constant.join(", ")
            ));
        }
        parts.join(", ")
    }
}

impl Normalizer {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            policy: ConstantColumnPolicy::Skip,
        }
    }

    pub fn with_policy(mut self, policy: ConstantColumnPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Normalize every configured column present in the dataset.
    pub fn normalize(&self, dataset: &mut Dataset) -> Result<NormalizeReport> {
        let mut report = NormalizeReport::default();

        for name in &self.columns {
            let Some(idx) = dataset.column_index(name) else {
                warn!(column = %name, "column not present in dataset, skipping");
                report.absent.push(name.clone());
                continue;
            };

            let values = dataset.numeric_column(name)?;
            let range = values.iter().flatten().fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            });

            let Some((min, max)) = range else {
                warn!(column = %name, "column has no numeric values, skipping");
                report.constant.push(name.clone());
                continue;
            };

            if min == max {
                match self.policy {
                    ConstantColumnPolicy::Fail => {
                        return Err(ProcessingError::ConstantColumn { name: name.clone() });
                    }
                    ConstantColumnPolicy::Skip => {
                        warn!(column = %name, value = min, "column is constant, skipping");
                        report.constant.push(name.clone());
                        continue;
                    }
                    ConstantColumnPolicy::Midpoint => {
                        self.rewrite_column(dataset, idx, &values, |_| 0.5);
                        report.normalized.push(name.clone());
                        continue;
                    }
                }
            }

            let span = max - min;
            self.rewrite_column(dataset, idx, &values, |v| (v - min) / span);
            report.normalized.push(name.clone());
        }

        Ok(report)
    }

    fn rewrite_column<F>(&self, dataset: &mut Dataset, idx: usize, values: &[Option<f64>], f: F)
    where
        F: Fn(f64) -> f64,
    {
        for (row, value) in dataset.rows.iter_mut().zip(values) {
            if let Some(v) = value {
                row[idx] = format_value(f(*v));
            }
        }
    }
}

fn format_value(value: f64) -> String {
    // f64 Display is the shortest representation that round-trips
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dataset_with_column(name: &str, values: &[&str]) -> Dataset {
        let mut dataset = Dataset::new(vec!["id".to_string(), name.to_string()]);
        for (i, v) in values.iter().enumerate() {
            dataset
                .push_row(vec![i.to_string(), v.to_string()])
                .unwrap();
        }
        dataset
    }

    fn column_values(dataset: &Dataset, idx: usize) -> Vec<String> {
        dataset.rows.iter().map(|row| row[idx].clone()).collect()
    }

    #[test]
    fn test_normalize_maps_range_to_unit_interval() {
        let mut dataset = dataset_with_column("PM10", &["10", "20", "30"]);
        let report = Normalizer::new(vec!["PM10".to_string()])
            .normalize(&mut dataset)
            .unwrap();

        assert_eq!(column_values(&dataset, 1), vec!["0", "0.5", "1"]);
        assert_eq!(report.normalized, vec!["PM10"]);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut dataset = dataset_with_column("PM10", &["10", "20", "30"]);
        let normalizer = Normalizer::new(vec!["PM10".to_string()]);
        normalizer.normalize(&mut dataset).unwrap();
        let first = column_values(&dataset, 1);
        normalizer.normalize(&mut dataset).unwrap();
        assert_eq!(column_values(&dataset, 1), first);
    }

    #[test]
    fn test_normalize_leaves_other_columns_untouched() {
        let mut dataset = Dataset::new(vec![
            "stationId".to_string(),
            "PM2_5".to_string(),
            "note".to_string(),
        ]);
        dataset
            .push_row(vec![
                "aoti".to_string(),
                "5".to_string(),
                "00.10".to_string(),
            ])
            .unwrap();
        dataset
            .push_row(vec![
                "dongsi".to_string(),
                "15".to_string(),
                "ok".to_string(),
            ])
            .unwrap();

        Normalizer::new(vec!["PM2_5".to_string()])
            .normalize(&mut dataset)
            .unwrap();

        assert_eq!(column_values(&dataset, 0), vec!["aoti", "dongsi"]);
        // Untouched cells keep their exact original text
        assert_eq!(column_values(&dataset, 2), vec!["00.10", "ok"]);
    }

    #[test]
    fn test_normalize_skips_absent_columns() {
        let mut dataset = dataset_with_column("PM10", &["1", "2"]);
        let report = Normalizer::new(vec!["PM10".to_string(), "SO2".to_string()])
            .normalize(&mut dataset)
            .unwrap();

        assert_eq!(report.normalized, vec!["PM10"]);
        assert_eq!(report.absent, vec!["SO2"]);
    }

    #[test]
    fn test_normalize_preserves_missing_cells() {
        let mut dataset = dataset_with_column("PM10", &["10", "", "30"]);
        Normalizer::new(vec!["PM10".to_string()])
            .normalize(&mut dataset)
            .unwrap();

        assert_eq!(column_values(&dataset, 1), vec!["0", "", "1"]);
    }

    #[test]
    fn test_constant_column_skip_policy() {
        let mut dataset = dataset_with_column("CO", &["7", "7", "7"]);
        let report = Normalizer::new(vec!["CO".to_string()])
            .normalize(&mut dataset)
            .unwrap();

        assert_eq!(column_values(&dataset, 1), vec!["7", "7", "7"]);
        assert_eq!(report.constant, vec!["CO"]);
    }

    #[test]
    fn test_constant_column_midpoint_policy() {
        let mut dataset = dataset_with_column("CO", &["7", "7"]);
        Normalizer::new(vec!["CO".to_string()])
            .with_policy(ConstantColumnPolicy::Midpoint)
            .normalize(&mut dataset)
            .unwrap();

        assert_eq!(column_values(&dataset, 1), vec!["0.5", "0.5"]);
    }

    #[test]
    fn test_constant_column_fail_policy() {
        let mut dataset = dataset_with_column("CO", &["7", "7"]);
        let result = Normalizer::new(vec!["CO".to_string()])
            .with_policy(ConstantColumnPolicy::Fail)
            .normalize(&mut dataset);

        assert!(matches!(
            result,
            Err(ProcessingError::ConstantColumn { .. })
        ));
    }

    #[test]
    fn test_policy_from_name() {
        assert_eq!(
            ConstantColumnPolicy::from_name("skip"),
            Some(ConstantColumnPolicy::Skip)
        );
        assert_eq!(
            ConstantColumnPolicy::from_name("MIDPOINT"),
            Some(ConstantColumnPolicy::Midpoint)
        );
        assert_eq!(ConstantColumnPolicy::from_name("panic"), None);
    }
}
