use crate::error::Result;
use crate::models::Severity;
use crate::processors::Dendrogram;
use crate::utils::constants::{DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH};
use plotters::prelude::*;
use std::path::Path;

/// Renders a clustering merge tree with severity-colored merge nodes.
///
/// Leaves sit on the x axis under their column labels; each merge draws a
/// U-shaped link at its linkage distance with a circle colored by the
/// severity tier of that distance, plus a four-tier legend.
pub struct DendrogramPlotter {
    width: u32,
    height: u32,
}

impl Default for DendrogramPlotter {
    fn default() -> Self {
        Self::new()
    }
}

impl DendrogramPlotter {
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

    pub fn render(&self, dendrogram: &Dendrogram, output: &Path) -> Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let n = dendrogram.leaf_count();
        let node_count = n + dendrogram.merges.len();

        // Leaves take their display slot; internal nodes center over their
        // children and sit at their merge height.
        let order = dendrogram.leaf_order();
        let mut x = vec![0.0f64; node_count];
        let mut y = vec![0.0f64; node_count];
        for (slot, &leaf) in order.iter().enumerate() {
            x[leaf] = slot as f64;
        }
        for (k, merge) in dendrogram.merges.iter().enumerate() {
            let id = n + k;
            x[id] = (x[merge.left] + x[merge.right]) / 2.0;
            y[id] = merge.distance;
        }

        let max_height = dendrogram
            .merges
            .iter()
            .map(|m| m.distance)
            .fold(0.0f64, f64::max)
            .max(0.1);

        let root = BitMapBackend::new(output, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let slot_labels: Vec<String> = order
            .iter()
            .map(|&leaf| dendrogram.labels[leaf].clone())
            .collect();

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Attribute clustering (average linkage, 1 - r)",
                ("sans-serif", 30),
            )
            .margin(10)
            .x_label_area_size(50)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..max_height * 1.1)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .y_desc("Merge distance")
            .x_labels(n)
            .x_label_formatter(&|value| {
                let slot = value.round();
                if (value - slot).abs() < 0.01 && slot >= 0.0 && (slot as usize) < slot_labels.len()
                {
                    slot_labels[slot as usize].clone()
                } else {
                    String::new()
                }
            })
            .draw()?;

        // U-shaped links
        for merge in &dendrogram.merges {
            let h = merge.distance;
            let path = vec![
                (x[merge.left], y[merge.left]),
                (x[merge.left], h),
                (x[merge.right], h),
                (x[merge.right], y[merge.right]),
            ];
            chart.draw_series(std::iter::once(PathElement::new(path, &BLACK)))?;
        }

        // Severity markers, one series per tier so every tier gets a
        // legend entry
        for severity in Severity::all() {
            let (r, g, b) = severity.rgb();
            let color = RGBColor(r, g, b);
            let marks: Vec<(f64, f64)> = dendrogram
                .merges
                .iter()
                .enumerate()
                .filter(|(_, merge)| Severity::from_distance(merge.distance) == severity)
                .map(|(k, merge)| (x[n + k], merge.distance))
                .collect();

            chart
                .draw_series(
                    marks
                        .iter()
                        .map(|&(mx, my)| Circle::new((mx, my), 5, color.filled())),
                )?
                .label(severity.label())
                .legend(move |(lx, ly)| Circle::new((lx + 10, ly), 5, color.filled()));
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::correlation::DistanceMatrix;
    use crate::processors::average_linkage;

    fn sample_dendrogram() -> Dendrogram {
        let distance = DistanceMatrix {
            labels: vec!["PM2_5".to_string(), "PM10".to_string(), "O3".to_string()],
            values: vec![
                vec![0.0, 0.1, 0.9],
                vec![0.1, 0.0, 0.7],
                vec![0.9, 0.7, 0.0],
            ],
        };
        average_linkage(&distance)
    }

    #[test]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dendrogram.png");

        DendrogramPlotter::new()
            .with_dimensions(640, 480)
            .render(&sample_dendrogram(), &path)
            .unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_render_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts/dendrogram.png");

        DendrogramPlotter::new()
            .with_dimensions(640, 480)
            .render(&sample_dendrogram(), &path)
            .unwrap();

        assert!(path.exists());
    }
}
