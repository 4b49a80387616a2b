/// Dataset shapes
pub const AQ_FIELD_COUNT: usize = 12;
pub const MEO_FIELD_COUNT: usize = 8;

/// Columns normalized and clustered by default
pub const AQ_POLLUTANT_COLUMNS: &[&str] = &["PM2_5", "PM10", "NO2", "CO", "O3", "SO2"];
pub const MEO_MEASUREMENT_COLUMNS: &[&str] = &["temperature", "pressure", "humidity"];

/// Severity thresholds over merge distance
pub const SEVERE_DISTANCE: f64 = 0.75;
pub const HIGH_DISTANCE: f64 = 0.5;
pub const MODERATE_DISTANCE: f64 = 0.25;

/// Processing defaults
pub const DEFAULT_DELIMITER: u8 = b',';
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Chart defaults
pub const DEFAULT_PLOT_WIDTH: u32 = 1024;
pub const DEFAULT_PLOT_HEIGHT: u32 = 768;
