use aqmet_processor::models::DatasetKind;
use aqmet_processor::processors::{average_linkage, CorrelationMatrix, Normalizer};
use aqmet_processor::readers::{DatasetReader, LineFilter};
use aqmet_processor::writers::DatasetWriter;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_clean_drops_malformed_rows() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = temp_dir.path().join("raw.csv");
    let output = temp_dir.path().join("raw_clean.csv");

    fs::write(&input, "1,2,3\n1,2\n4,5,6\n").unwrap();

    let report = LineFilter::new()
        .filter_file(&input, &output, 3, None)
        .unwrap();

    assert_eq!(fs::read_to_string(&output).unwrap(), "1,2,3\n4,5,6\n");
    assert_eq!(report.kept_lines, 2);
    assert_eq!(report.dropped_lines, 1);

    // Input untouched
    assert_eq!(fs::read_to_string(&input).unwrap(), "1,2,3\n1,2\n4,5,6\n");
}

#[test]
fn test_clean_mmap_matches_buffered() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("raw.csv");
    let buffered_out = temp_dir.path().join("buffered.csv");
    let mmap_out = temp_dir.path().join("mmap.csv");

    let mut content = String::from("stationId,PM2_5,PM10\n");
    for i in 0..500 {
        content.push_str(&format!("aoti,{},{}\n", i, i * 2));
        if i % 50 == 0 {
            content.push_str("broken,row\n");
        }
    }
    fs::write(&input, &content).unwrap();

    LineFilter::new()
        .filter_file(&input, &buffered_out, 3, None)
        .unwrap();
    LineFilter::new()
        .with_mmap(true)
        .filter_file(&input, &mmap_out, 3, None)
        .unwrap();

    assert_eq!(
        fs::read(&buffered_out).unwrap(),
        fs::read(&mmap_out).unwrap()
    );
}

#[test]
fn test_clean_then_normalize_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let raw = temp_dir.path().join("station.csv");
    let cleaned = temp_dir.path().join("station_clean.csv");
    let normalized = temp_dir.path().join("station_normal.csv");

    fs::write(
        &raw,
        "stationId,PM10,note\n\
         aoti,10,first\n\
         aoti,20,second,extra\n\
         aoti,20,second\n\
         aoti,30,third\n",
    )
    .unwrap();

    LineFilter::new().filter_file(&raw, &cleaned, 3, None).unwrap();

    let mut dataset = DatasetReader::new().read_dataset(&cleaned).unwrap();
    assert_eq!(dataset.row_count(), 3);

    let report = Normalizer::new(vec!["PM10".to_string()])
        .normalize(&mut dataset)
        .unwrap();
    assert_eq!(report.normalized, vec!["PM10"]);

    DatasetWriter::new()
        .write_dataset(&dataset, &normalized)
        .unwrap();

    let written = fs::read_to_string(&normalized).unwrap();
    assert_eq!(
        written,
        "stationId,PM10,note\n\
         aoti,0,first\n\
         aoti,0.5,second\n\
         aoti,1,third\n"
    );
}

#[test]
fn test_normalized_columns_stay_in_unit_interval() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("aq.csv");

    let mut content = String::from("stationId,PM2_5,PM10\n");
    for i in 0..100 {
        content.push_str(&format!("aoti,{},{}\n", 17 + (i * 13) % 211, 40 + (i * 7) % 97));
    }
    fs::write(&path, &content).unwrap();

    let mut dataset = DatasetReader::new().read_dataset(&path).unwrap();
    Normalizer::new(vec!["PM2_5".to_string(), "PM10".to_string()])
        .normalize(&mut dataset)
        .unwrap();

    for column in ["PM2_5", "PM10"] {
        let values = dataset.numeric_column(column).unwrap();
        let values: Vec<f64> = values.into_iter().flatten().collect();
        assert!(values.iter().all(|&v| (0.0..=1.0).contains(&v)));
        assert!(values.iter().any(|&v| v == 0.0));
        assert!(values.iter().any(|&v| v == 1.0));
    }
}

#[test]
fn test_untouched_columns_round_trip_exactly() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in.csv");
    let output = temp_dir.path().join("out.csv");

    // Values with formatting a numeric round trip would destroy
    fs::write(
        &input,
        "stationId,PM10,pressure\naoti_aq,10,1012.50\ndongsi_aq,30,0990.00\n",
    )
    .unwrap();

    let mut dataset = DatasetReader::new().read_dataset(&input).unwrap();
    Normalizer::new(vec!["PM10".to_string()])
        .normalize(&mut dataset)
        .unwrap();
    DatasetWriter::new().write_dataset(&dataset, &output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(
        written,
        "stationId,PM10,pressure\naoti_aq,0,1012.50\ndongsi_aq,1,0990.00\n"
    );
}

#[test]
fn test_dendrogram_pipeline_renders_chart() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("aq.csv");
    let chart = temp_dir.path().join("dendrogram.png");

    let mut content = String::from("stationId,PM2_5,PM10,NO2,CO,O3,SO2\n");
    for i in 0..60 {
        let base = (i as f64) * 0.7;
        content.push_str(&format!(
            "aoti,{:.1},{:.1},{:.1},{:.1},{:.1},{:.1}\n",
            base * 2.0 + 5.0,
            base * 2.1 + 8.0,
            30.0 - base * 0.5,
            (base * 1.3) % 11.0 + 1.0,
            60.0 - (base * 1.7) % 23.0,
            (base * 3.1) % 17.0 + 2.0,
        ));
    }
    fs::write(&input, &content).unwrap();

    let dataset = DatasetReader::new().read_dataset(&input).unwrap();
    let columns: Vec<String> = DatasetKind::AirQuality
        .default_columns()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let correlation = CorrelationMatrix::from_dataset(&dataset, &columns).unwrap();
    let dendrogram = average_linkage(&correlation.to_distance());

    assert_eq!(dendrogram.leaf_count(), 6);
    assert_eq!(dendrogram.merges.len(), 5);
    // Merge heights only grow under average linkage on a valid matrix
    for pair in dendrogram.merges.windows(2) {
        assert!(pair[1].distance >= pair[0].distance - 1e-9);
    }

    aqmet_processor::plots::DendrogramPlotter::new()
        .with_dimensions(800, 600)
        .render(&dendrogram, &chart)
        .unwrap();
    assert!(chart.exists());
}

#[test]
fn test_series_chart_renders_from_csv() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("daily.csv");
    let chart = temp_dir.path().join("series.png");

    let mut content = String::from("date,PM10,temperature\n");
    for day in 1..=28 {
        content.push_str(&format!(
            "2017-02-{:02},{},{:.1}\n",
            day,
            50 + (day * 31) % 140,
            -2.0 + (day as f64) * 0.6
        ));
    }
    fs::write(&input, &content).unwrap();

    let dataset = DatasetReader::new().read_dataset(&input).unwrap();
    aqmet_processor::plots::SeriesPlotter::new()
        .with_dimensions(800, 600)
        .render(&dataset, "date", "PM10", "temperature", &chart)
        .unwrap();

    let metadata = fs::metadata(&chart).unwrap();
    assert!(metadata.len() > 0);
}
