use crate::error::{ProcessingError, Result};
use crate::models::Dataset;

/// Pearson correlation coefficient over the rows where both series have a
/// value.
///
/// Returns a value in [-1, 1], or 0.0 when either series has no variance
/// or no complete pairs exist.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some((*a, *b)),
            _ => None,
        })
        .collect();

    if pairs.is_empty() {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let (covariance, var_x, var_y) =
        pairs
            .iter()
            .fold((0.0, 0.0, 0.0), |(cov, vx, vy), (a, b)| {
                let dx = a - mean_x;
                let dy = b - mean_y;
                (cov + dx * dy, vx + dx * dx, vy + dy * dy)
            });

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    covariance / (var_x.sqrt() * var_y.sqrt())
}

/// Square symmetric matrix of pairwise Pearson correlations.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Compute pairwise correlations for the named columns.
    ///
    /// Named columns missing from the dataset are dropped; fewer than two
    /// remaining columns is an error.
    pub fn from_dataset(dataset: &Dataset, columns: &[String]) -> Result<Self> {
        let present: Vec<String> = columns
            .iter()
            .filter(|name| dataset.column_index(name).is_some())
            .cloned()
            .collect();

        if present.len() < 2 {
            return Err(ProcessingError::InsufficientColumns {
                count: present.len(),
            });
        }

        let series: Vec<Vec<Option<f64>>> = present
            .iter()
            .map(|name| dataset.numeric_column(name))
            .collect::<Result<_>>()?;

        let n = present.len();
        let mut values = vec![vec![0.0; n]; n];
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let r = pearson(&series[i], &series[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(Self {
            labels: present,
            values,
        })
    }

    /// Convert to a dissimilarity matrix as 1 - r.
    pub fn to_distance(&self) -> DistanceMatrix {
        let values = self
            .values
            .iter()
            .map(|row| row.iter().map(|r| 1.0 - r).collect())
            .collect();
        DistanceMatrix {
            labels: self.labels.clone(),
            values,
        }
    }
}

/// Square symmetric dissimilarity matrix consumed by clustering.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    pub labels: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}
