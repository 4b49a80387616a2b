use crate::error::{ProcessingError, Result};
use crate::utils::constants::{
    AQ_FIELD_COUNT, AQ_POLLUTANT_COLUMNS, MEO_FIELD_COUNT, MEO_MEASUREMENT_COLUMNS,
};

/// The two dataset shapes produced by the monitoring feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    AirQuality,
    Meteorology,
}

impl DatasetKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "aq" | "air-quality" | "airquality" => Some(DatasetKind::AirQuality),
            "meo" | "meteorology" | "weather" => Some(DatasetKind::Meteorology),
            _ => None,
        }
    }

    /// Fields per well-formed row, header included.
    pub fn expected_field_count(&self) -> usize {
        match self {
            DatasetKind::AirQuality => AQ_FIELD_COUNT,
            DatasetKind::Meteorology => MEO_FIELD_COUNT,
        }
    }

    /// Columns normalized and clustered by default for this kind.
    pub fn default_columns(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::AirQuality => AQ_POLLUTANT_COLUMNS,
            DatasetKind::Meteorology => MEO_MEASUREMENT_COLUMNS,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DatasetKind::AirQuality => "Air quality",
            DatasetKind::Meteorology => "Meteorology",
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// In-memory tabular dataset.
///
/// Cells stay as raw strings so columns a transform never touches
/// round-trip unchanged.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Row has {} fields, expected {}",
                row.len(),
                self.headers.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Parse a column into numeric values.
    ///
    /// Empty cells and `NA` markers are missing and map to `None`; any other
    /// unparseable cell is an error.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| ProcessingError::MissingColumn {
                name: name.to_string(),
            })?;
        self.rows
            .iter()
            .map(|row| parse_cell(&row[idx], name))
            .collect()
    }
}

fn parse_cell(cell: &str, column: &str) -> Result<Option<f64>> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == "NA" {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ProcessingError::InvalidNumeric {
            column: column.to_string(),
            value: cell.to_string(),
        })
}
