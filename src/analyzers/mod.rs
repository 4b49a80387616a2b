pub mod dataset_analyzer;

pub use dataset_analyzer::{ColumnStats, DatasetAnalyzer, DatasetSummary};
