use crate::error::{ProcessingError, Result};
use crate::models::Dataset;
use crate::utils::constants::{DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use plotters::prelude::*;
use std::path::Path;

/// Renders two measurement series against a shared date axis with
/// independent left and right value axes.
///
/// The left series draws in blue, the right in red, each with a matching
/// axis description and a legend entry. Rows whose date or either value
/// fails to parse are skipped.
pub struct SeriesPlotter {
    width: u32,
    height: u32,
}

impl Default for SeriesPlotter {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesPlotter {
    pub fn new() -> Self {
        Self {
            width: DEFAULT_PLOT_WIDTH,
            height: DEFAULT_PLOT_HEIGHT,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn render(
        &self,
        dataset: &Dataset,
        date_column: &str,
        left_column: &str,
        right_column: &str,
        output: &Path,
    ) -> Result<()> {
        let points = self.collect_points(dataset, date_column, left_column, right_column)?;
        if points.is_empty() {
            return Err(ProcessingError::InvalidFormat(format!(
                "No plottable rows: every row is missing '{}', '{}' or '{}'",
                date_column, left_column, right_column
            )));
        }

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let root = BitMapBackend::new(output, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let x_range = date_range(&points);
        let left_range = padded_range(points.iter().map(|(_, l, _)| *l));
        let right_range = padded_range(points.iter().map(|(_, _, r)| *r));

        let caption = format!("{} / {}", left_column, right_column);
        let mut chart = ChartBuilder::on(&root)
            .caption(&caption, ("sans-serif", 30))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .right_y_label_area_size(50)
            .build_cartesian_2d(x_range.clone(), left_range)?
            .set_secondary_coord(x_range, right_range);

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(date_column)
            .y_desc(left_column)
            .draw()?;

        chart
            .configure_secondary_axes()
            .y_desc(right_column)
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                points.iter().map(|(date, left, _)| (*date, *left)),
                &BLUE,
            ))?
            .label(left_column)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

        chart
            .draw_secondary_series(LineSeries::new(
                points.iter().map(|(date, _, right)| (*date, *right)),
                &RED,
            ))?
            .label(right_column)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }

    fn collect_points(
        &self,
        dataset: &Dataset,
        date_column: &str,
        left_column: &str,
        right_column: &str,
    ) -> Result<Vec<(NaiveDate, f64, f64)>> {
        let date_idx = column_index(dataset, date_column)?;
        let left_idx = column_index(dataset, left_column)?;
        let right_idx = column_index(dataset, right_column)?;

        let mut points = Vec::new();
        for row in &dataset.rows {
            let Some(date) = parse_date(&row[date_idx]) else {
                continue;
            };
            let (Ok(left), Ok(right)) = (
                row[left_idx].trim().parse::<f64>(),
                row[right_idx].trim().parse::<f64>(),
            ) else {
                continue;
            };
            points.push((date, left, right));
        }

        points.sort_by_key(|(date, _, _)| *date);
        Ok(points)
    }
}

fn column_index(dataset: &Dataset, name: &str) -> Result<usize> {
    dataset
        .column_index(name)
        .ok_or_else(|| ProcessingError::MissingColumn {
            name: name.to_string(),
        })
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if let Ok(date) = NaiveDate::parse_from_str(cell, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .ok()
}

fn date_range(points: &[(NaiveDate, f64, f64)]) -> std::ops::Range<NaiveDate> {
    let min = points[0].0;
    let max = points[points.len() - 1].0;
    if min == max {
        // A single day collapses the axis; pad it out
        min - Duration::days(1)..max + Duration::days(1)
    } else {
        min..max
    }
}

fn padded_range(values: impl Iterator<Item = f64>) -> std::ops::Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min == max {
        min - 0.5..max + 0.5
    } else {
        let pad = (max - min) * 0.05;
        min - pad..max + pad
    }
}
