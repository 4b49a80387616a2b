use crate::analyzers::DatasetAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::models::{Dataset, DatasetKind};
use crate::plots::{DendrogramPlotter, SeriesPlotter};
use crate::processors::{average_linkage, ConstantColumnPolicy, CorrelationMatrix, Normalizer};
use crate::readers::{DatasetReader, LineFilter};
use crate::utils::filename::{
    derive_cleaned_path, derive_normalized_path, generate_default_plot_filename,
};
use crate::utils::progress::ProgressReporter;
use crate::writers::DatasetWriter;
use std::path::Path;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Clean {
            input,
            output,
            dataset,
            expected_fields,
            delimiter,
            mmap,
        } => {
            let expected = resolve_expected_fields(dataset.as_deref(), expected_fields)?;
            let output = output.unwrap_or_else(|| derive_cleaned_path(&input));
            let delimiter = parse_delimiter(delimiter)?;

            println!("Cleaning {}", input.display());
            println!("Expected fields per row: {}", expected);

            clean_file(&input, &output, expected, delimiter, mmap)?;

            println!("Cleaned file written to {}", output.display());
        }

        Commands::Normalize {
            input,
            output,
            dataset,
            columns,
            on_constant,
        } => {
            let columns = resolve_columns(dataset.as_deref(), columns)?;
            let policy = parse_policy(&on_constant)?;
            let output = output.unwrap_or_else(|| derive_normalized_path(&input));

            println!("Normalizing {}", input.display());

            let mut data = DatasetReader::new().read_dataset(&input)?;
            normalize_dataset(&mut data, columns, policy, &output)?;
        }

        Commands::Process {
            input,
            dataset,
            cleaned_output,
            output,
            on_constant,
            mmap,
        } => {
            let kind = parse_dataset(&dataset)?;
            let policy = parse_policy(&on_constant)?;
            let cleaned = cleaned_output.unwrap_or_else(|| derive_cleaned_path(&input));
            let output = output.unwrap_or_else(|| derive_normalized_path(&cleaned));

            println!("Processing {} data from {}", kind, input.display());

            clean_file(
                &input,
                &cleaned,
                kind.expected_field_count(),
                b',',
                mmap,
            )?;
            println!("Cleaned file written to {}", cleaned.display());

            let mut data = DatasetReader::new().read_dataset(&cleaned)?;
            let columns: Vec<String> = kind
                .default_columns()
                .iter()
                .map(|name| name.to_string())
                .collect();
            normalize_dataset(&mut data, columns, policy, &output)?;

            println!("Processing complete!");
        }

        Commands::PlotSeries {
            input,
            date_column,
            left,
            right,
            output,
            width,
            height,
        } => {
            let output = output.unwrap_or_else(|| generate_default_plot_filename("series"));

            println!(
                "Rendering {} and {} against {}",
                left, right, date_column
            );

            let data = DatasetReader::new().read_dataset(&input)?;
            SeriesPlotter::new()
                .with_dimensions(width, height)
                .render(&data, &date_column, &left, &right, &output)?;

            println!("Chart written to {}", output.display());
        }

        Commands::PlotDendrogram {
            input,
            dataset,
            columns,
            output,
            width,
            height,
        } => {
            let columns = resolve_columns(dataset.as_deref(), columns)?;
            let output = output.unwrap_or_else(|| generate_default_plot_filename("dendrogram"));

            let data = DatasetReader::new().read_dataset(&input)?;
            let correlation = CorrelationMatrix::from_dataset(&data, &columns)?;
            let dendrogram = average_linkage(&correlation.to_distance());

            println!(
                "Clustered {} columns through {} merges",
                dendrogram.leaf_count(),
                dendrogram.merges.len()
            );

            DendrogramPlotter::new()
                .with_dimensions(width, height)
                .render(&dendrogram, &output)?;

            println!("Dendrogram written to {}", output.display());
        }

        Commands::Info {
            file,
            columns,
            sample,
            json,
        } => {
            let data = DatasetReader::new().read_dataset(&file)?;
            let summary = DatasetAnalyzer::new().summarize(&data, &columns)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("Analyzing {}", file.display());
                println!("\n{}", summary.detailed_summary());

                if sample > 0 {
                    println!("Sample rows (showing up to {}):", sample);
                    println!("  {}", data.headers.join(","));
                    for row in data.rows.iter().take(sample) {
                        println!("  {}", row.join(","));
                    }
                }
            }
        }
    }

    Ok(())
}

fn clean_file(
    input: &Path,
    output: &Path,
    expected_fields: usize,
    delimiter: u8,
    mmap: bool,
) -> Result<()> {
    let progress = ProgressReporter::new_spinner("Filtering rows...", false);
    let filter = LineFilter::new()
        .with_delimiter(delimiter)
        .with_mmap(mmap);
    let report = filter.filter_file(input, output, expected_fields, Some(&progress))?;
    progress.finish_with_message(&report.summary());
    Ok(())
}

fn normalize_dataset(
    data: &mut Dataset,
    columns: Vec<String>,
    policy: ConstantColumnPolicy,
    output: &Path,
) -> Result<()> {
    let normalizer = Normalizer::new(columns).with_policy(policy);
    let report = normalizer.normalize(data)?;
    DatasetWriter::new().write_dataset(data, output)?;

    println!("{}", report.summary());
    println!("Normalized file written to {}", output.display());
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

fn parse_dataset(name: &str) -> Result<DatasetKind> {
    DatasetKind::from_name(name)
        .ok_or_else(|| ProcessingError::Config(format!("Unknown dataset kind: '{}'", name)))
}

fn parse_policy(name: &str) -> Result<ConstantColumnPolicy> {
    ConstantColumnPolicy::from_name(name)
        .ok_or_else(|| ProcessingError::Config(format!("Unknown constant-column policy: '{}'", name)))
}

fn parse_delimiter(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(ProcessingError::Config(format!(
            "Delimiter must be a single ASCII character, got '{}'",
            delimiter
        )))
    }
}

fn resolve_expected_fields(dataset: Option<&str>, explicit: Option<usize>) -> Result<usize> {
    if let Some(count) = explicit {
        if count == 0 {
            return Err(ProcessingError::Config(
                "--expected-fields must be at least 1".to_string(),
            ));
        }
        return Ok(count);
    }
    match dataset {
        Some(name) => Ok(parse_dataset(name)?.expected_field_count()),
        None => Err(ProcessingError::Config(
            "Either --dataset or --expected-fields is required".to_string(),
        )),
    }
}

fn resolve_columns(dataset: Option<&str>, explicit: Vec<String>) -> Result<Vec<String>> {
    if !explicit.is_empty() {
        return Ok(explicit);
    }
    match dataset {
        Some(name) => Ok(parse_dataset(name)?
            .default_columns()
            .iter()
            .map(|name| name.to_string())
            .collect()),
        None => Err(ProcessingError::Config(
            "Either --dataset or --columns is required".to_string(),
        )),
    }
}
