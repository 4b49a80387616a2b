use crate::error::Result;
use crate::models::Dataset;
use crate::utils::constants::DEFAULT_DELIMITER;
use csv::WriterBuilder;
use std::path::Path;

/// Writes a [`Dataset`] back out as delimited text.
pub struct DatasetWriter {
    delimiter: u8,
}

impl Default for DatasetWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetWriter {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write the header row and all records to `path`, creating parent
    /// directories as needed.
    pub fn write_dataset(&self, dataset: &Dataset, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(path)?;
        writer.write_record(&dataset.headers)?;
        for row in &dataset.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;

        Ok(())
    }
}
