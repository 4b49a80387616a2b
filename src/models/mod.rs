pub mod dataset;
pub mod severity;

pub use dataset::{Dataset, DatasetKind};
pub use severity::Severity;
