use crate::error::Result;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, DEFAULT_DELIMITER};
use crate::utils::progress::ProgressReporter;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Copies only the lines whose field count matches the expected shape.
///
/// A line with N fields carries N-1 delimiters; everything else is dropped.
/// Kept lines are written byte-for-byte, line endings included, in their
/// original order. The input file is never mutated.
pub struct LineFilter {
    delimiter: u8,
    use_mmap: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FilterReport {
    pub total_lines: usize,
    pub kept_lines: usize,
    pub dropped_lines: usize,
}

impl FilterReport {
    pub fn summary(&self) -> String {
        format!(
            "{} lines read, {} kept, {} dropped",
            self.total_lines, self.kept_lines, self.dropped_lines
        )
    }
}

impl Default for LineFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineFilter {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            use_mmap: false,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Filter `input` into `output`, keeping lines with exactly
    /// `expected_fields` fields.
    pub fn filter_file(
        &self,
        input: &Path,
        output: &Path,
        expected_fields: usize,
        progress: Option<&ProgressReporter>,
    ) -> Result<FilterReport> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        if self.use_mmap {
            self.filter_mmap(input, output, expected_fields, progress)
        } else {
            self.filter_buffered(input, output, expected_fields, progress)
        }
    }

    /// Filter using buffered I/O
    fn filter_buffered(
        &self,
        input: &Path,
        output: &Path,
        expected_fields: usize,
        progress: Option<&ProgressReporter>,
    ) -> Result<FilterReport> {
        let file = File::open(input)?;
        let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let out = File::create(output)?;
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, out);

        let mut report = FilterReport::default();
        let mut line = Vec::new();

        loop {
            line.clear();
            let read = reader.read_until(b'\n', &mut line)?;
            if read == 0 {
                break;
            }
            self.process_line(&line, expected_fields, &mut writer, &mut report)?;
            if let Some(p) = progress {
                p.increment(1);
            }
        }

        writer.flush()?;
        Ok(report)
    }

    /// Filter using memory-mapped I/O for large files
    fn filter_mmap(
        &self,
        input: &Path,
        output: &Path,
        expected_fields: usize,
        progress: Option<&ProgressReporter>,
    ) -> Result<FilterReport> {
        let file = File::open(input)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let out = File::create(output)?;
        let mut writer = BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, out);

        let mut report = FilterReport::default();

        for line in mmap.split_inclusive(|&b| b == b'\n') {
            self.process_line(line, expected_fields, &mut writer, &mut report)?;
            if let Some(p) = progress {
                p.increment(1);
            }
        }

        writer.flush()?;
        Ok(report)
    }

    fn process_line(
        &self,
        line: &[u8],
        expected_fields: usize,
        writer: &mut impl Write,
        report: &mut FilterReport,
    ) -> Result<()> {
        report.total_lines += 1;

        let delimiters = line.iter().filter(|&&b| b == self.delimiter).count();
        if delimiters + 1 == expected_fields {
            writer.write_all(line)?;
            report.kept_lines += 1;
        } else {
            report.dropped_lines += 1;
        }

        Ok(())
    }
}
