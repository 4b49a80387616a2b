pub mod clustering;
pub mod correlation;
pub mod normalizer;

pub use clustering::{average_linkage, Dendrogram, Merge};
pub use correlation::{pearson, CorrelationMatrix, DistanceMatrix};
pub use normalizer::{ConstantColumnPolicy, NormalizeReport, Normalizer};
