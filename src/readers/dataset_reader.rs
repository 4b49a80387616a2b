use crate::error::Result;
use crate::models::Dataset;
use crate::utils::constants::DEFAULT_DELIMITER;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// Loads a delimited text file into an in-memory [`Dataset`].
pub struct DatasetReader {
    delimiter: u8,
}

impl Default for DatasetReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetReader {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Read the header row and all records into memory.
    pub fn read_dataset(&self, path: &Path) -> Result<Dataset> {
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        let mut dataset = Dataset::new(headers);

        for record in reader.records() {
            let record = record?;
            dataset.push_row(record.iter().map(|cell| cell.to_string()).collect())?;
        }

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_dataset() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "stationId,PM2_5,PM10\naoti,35,70\ndongsi,,80\n").unwrap();

        let dataset = DatasetReader::new().read_dataset(file.path()).unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.headers, vec!["stationId", "PM2_5", "PM10"]);
        assert_eq!(dataset.rows[1][1], "");
    }

    #[test]
    fn test_read_dataset_custom_delimiter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a;b\n1;2\n").unwrap();

        let dataset = DatasetReader::new()
            .with_delimiter(b';')
            .read_dataset(file.path())
            .unwrap();
        assert_eq!(dataset.headers, vec!["a", "b"]);
        assert_eq!(dataset.rows[0], vec!["1", "2"]);
    }

    #[test]
    fn test_read_dataset_missing_file() {
        let result = DatasetReader::new().read_dataset(Path::new("no/such/file.csv"));
        assert!(result.is_err());
    }
}
