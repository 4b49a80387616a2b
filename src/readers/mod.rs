pub mod dataset_reader;
pub mod line_filter;

pub use dataset_reader::DatasetReader;
pub use line_filter::{FilterReport, LineFilter};
