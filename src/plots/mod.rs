pub mod dendrogram;
pub mod timeseries;

pub use dendrogram::DendrogramPlotter;
pub use timeseries::SeriesPlotter;
