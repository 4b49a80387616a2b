use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aqmet-processor")]
#[command(about = "Air-quality and meteorological CSV cleaning, normalization and plotting")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Drop malformed rows from a delimited text file
    Clean {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Output file path [default: <input>_clean.csv]")]
        output: Option<PathBuf>,

        #[arg(short, long, help = "Dataset kind: air-quality or meteorology")]
        dataset: Option<String>,

        #[arg(long, help = "Expected fields per row (overrides --dataset)")]
        expected_fields: Option<usize>,

        #[arg(long, default_value = ",", help = "Field delimiter")]
        delimiter: char,

        #[arg(long, default_value = "false", help = "Use memory-mapped I/O")]
        mmap: bool,
    },

    /// Min-max normalize selected columns of a CSV dataset
    Normalize {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Output file path [default: <input>_normal.csv]")]
        output: Option<PathBuf>,

        #[arg(short, long, help = "Dataset kind: air-quality or meteorology")]
        dataset: Option<String>,

        #[arg(
            short,
            long,
            value_delimiter = ',',
            help = "Columns to normalize (overrides --dataset)"
        )]
        columns: Vec<String>,

        #[arg(
            long,
            default_value = "skip",
            help = "Constant-column policy: skip, midpoint or fail"
        )]
        on_constant: String,
    },

    /// Clean a raw export and normalize it in one run
    Process {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Dataset kind: air-quality or meteorology")]
        dataset: String,

        #[arg(long, help = "Cleaned output path [default: <input>_clean.csv]")]
        cleaned_output: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Normalized output path [default: <cleaned>_normal.csv]"
        )]
        output: Option<PathBuf>,

        #[arg(
            long,
            default_value = "skip",
            help = "Constant-column policy: skip, midpoint or fail"
        )]
        on_constant: String,

        #[arg(long, default_value = "false", help = "Use memory-mapped I/O")]
        mmap: bool,
    },

    /// Render two measurements on a shared date axis with twin y-axes
    PlotSeries {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(long, default_value = "date", help = "Date column name")]
        date_column: String,

        #[arg(long, help = "Column drawn against the left axis")]
        left: String,

        #[arg(long, help = "Column drawn against the right axis")]
        right: String,

        #[arg(
            short,
            long,
            help = "Output PNG path [default: aqmet-series-{YYMMDD}.png]"
        )]
        output: Option<PathBuf>,

        #[arg(long, default_value = "1024")]
        width: u32,

        #[arg(long, default_value = "768")]
        height: u32,
    },

    /// Cluster attribute columns and render a severity-colored dendrogram
    PlotDendrogram {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, help = "Dataset kind: air-quality or meteorology")]
        dataset: Option<String>,

        #[arg(
            short,
            long,
            value_delimiter = ',',
            help = "Columns to cluster (overrides --dataset)"
        )]
        columns: Vec<String>,

        #[arg(
            short,
            long,
            help = "Output PNG path [default: aqmet-dendrogram-{YYMMDD}.png]"
        )]
        output: Option<PathBuf>,

        #[arg(long, default_value = "1024")]
        width: u32,

        #[arg(long, default_value = "768")]
        height: u32,
    },

    /// Display summary statistics for a CSV dataset
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(
            short,
            long,
            value_delimiter = ',',
            help = "Columns to summarize [default: auto-detected numeric columns]"
        )]
        columns: Vec<String>,

        #[arg(short, long, default_value = "0", help = "Rows of sample data to print")]
        sample: usize,

        #[arg(long, default_value = "false", help = "Emit the summary as JSON")]
        json: bool,
    },
}
