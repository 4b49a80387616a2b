use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};

/// Derive the cleaned-output path for an input: `<stem>_clean.<ext>`
pub fn derive_cleaned_path(input: &Path) -> PathBuf {
    derive_suffixed_path(input, "clean")
}

/// Derive the normalized-output path for an input: `<stem>_normal.<ext>`
pub fn derive_normalized_path(input: &Path) -> PathBuf {
    derive_suffixed_path(input, "normal")
}

fn derive_suffixed_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let ext = input.extension().and_then(|s| s.to_str()).unwrap_or("csv");
    input.with_file_name(format!("{}_{}.{}", stem, suffix, ext))
}

/// Generate default chart filename with format: aqmet-{kind}-{YYMMDD}.png
pub fn generate_default_plot_filename(kind: &str) -> PathBuf {
    let now = Local::now();
    let year = now.year() % 100; // Get last 2 digits of year
    let month = now.month();
    let day = now.day();

    PathBuf::from(format!("aqmet-{}-{:02}{:02}{:02}.png", kind, year, month, day))
}
