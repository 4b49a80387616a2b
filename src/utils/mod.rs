pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{derive_cleaned_path, derive_normalized_path, generate_default_plot_filename};
pub use progress::ProgressReporter;
