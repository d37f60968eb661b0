//! End-to-end scenario tests for the detection pipeline.

use anofox_anomaly::prelude::*;

fn spiked_sine(n: usize, period: usize, spikes: &[(usize, f64)]) -> Vec<f64> {
    let mut series: Vec<f64> = (0..n)
        .map(|i| (2.0 * std::f64::consts::PI * i as f64 / period as f64).sin())
        .collect();
    for &(index, magnitude) in spikes {
        series[index] += magnitude;
    }
    series
}

#[test]
fn cpu_utilization_spike_is_isolated() {
    // baseline 50% utilization with a daily-like swing and one burst
    let mut series: Vec<f64> = (0..2000)
        .map(|i| 50.0 + 5.0 * (2.0 * std::f64::consts::PI * i as f64 / 20.0).sin())
        .collect();
    series[1000] += 60.0;

    let result = SeasonalEsdDetector::default().detect(&series).unwrap();

    assert_eq!(result.anomaly_count(), 1);
    let anomaly = &result.anomalies[0];
    assert_eq!(anomaly.index, 1000);
    assert_eq!(anomaly.value, series[1000]);
    assert!(anomaly.score > 0.5);

    // the trend sits at the baseline away from the boundaries
    for &t in &result.trend[200..1800] {
        assert!((t - 50.0).abs() < 1.0, "trend {t} strayed from baseline");
    }
    assert!(result.residual.iter().all(|v| v.is_finite()));
}

#[test]
fn detection_is_deterministic() {
    let series = spiked_sine(2000, 20, &[(400, 100.0), (1200, 5.5)]);
    let detector = SeasonalEsdDetector::default();

    let first = detector.detect(&series).unwrap();
    let second = detector.detect(&series).unwrap();

    assert_eq!(first.anomalies, second.anomalies);
    assert_eq!(first.trend, second.trend);
    assert_eq!(first.seasonal, second.seasonal);
    assert_eq!(first.residual, second.residual);
    assert_eq!(first.period, second.period);
}

#[test]
fn stricter_alpha_flags_a_subset() {
    // spikes span a range of magnitudes so the significance level
    // actually changes the cut
    let series = spiked_sine(
        2000,
        20,
        &[(400, 100.0), (900, -60.0), (1200, 5.5), (1520, 15.0)],
    );

    let loose = SeasonalEsdDetector::new(DetectorConfig::default().with_alpha(0.025))
        .detect(&series)
        .unwrap();
    let strict = SeasonalEsdDetector::new(DetectorConfig::default().with_alpha(1e-8))
        .detect(&series)
        .unwrap();

    assert_eq!(loose.anomaly_indices(), vec![400, 900, 1200, 1520]);
    assert_eq!(strict.anomaly_indices(), vec![400, 900, 1520]);
    for index in strict.anomaly_indices() {
        assert!(loose.is_anomaly(index));
    }
}

#[test]
fn anomaly_indices_respect_the_window() {
    let series = spiked_sine(2000, 20, &[(400, 100.0), (1520, 100.0)]);
    let detector =
        SeasonalEsdDetector::new(DetectorConfig::default().with_window(300, 1000));

    let result = detector.detect(&series).unwrap();

    assert!(!result.anomalies.is_empty());
    for candidate in &result.anomalies {
        assert!((300..=1000).contains(&candidate.index));
    }
    assert!(result.is_anomaly(400));
    assert!(!result.is_anomaly(1520));
}

#[test]
fn negative_spikes_are_detected() {
    let series = spiked_sine(2000, 20, &[(800, -80.0)]);
    let result = SeasonalEsdDetector::default().detect(&series).unwrap();

    assert_eq!(result.anomaly_indices(), vec![800]);
    assert!(result.anomalies[0].value < -70.0);
}

#[test]
fn constant_telemetry_is_reported_as_degenerate() {
    let series = vec![90.0; 200];
    assert_eq!(
        SeasonalEsdDetector::default().detect(&series).unwrap_err(),
        AnomalyError::DegenerateScale
    );
}

#[test]
fn short_series_is_reported_as_insufficient() {
    // period estimation falls back to 3, but two full cycles still do
    // not fit
    let series = vec![1.0, 2.0, 1.0, 2.0, 1.0];
    assert!(matches!(
        SeasonalEsdDetector::default().detect(&series).unwrap_err(),
        AnomalyError::InsufficientData { .. }
    ));
}

#[test]
fn timestamped_series_round_trips() {
    use chrono::{Duration, TimeZone, Utc};

    let values = spiked_sine(2000, 20, &[(1000, 100.0)]);
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let timestamps: Vec<_> = (0..values.len())
        .map(|i| base + Duration::minutes(5 * i as i64))
        .collect();
    let ts = TimeSeries::with_timestamps(timestamps, values).unwrap();

    let result = SeasonalEsdDetector::default().detect_series(&ts).unwrap();

    assert_eq!(result.anomaly_indices(), vec![1000]);
    // the flagged index maps back onto the timestamp rail
    assert!(ts.timestamp(result.anomalies[0].index).is_some());
}

#[test]
fn decomposition_components_reconstruct_the_series() {
    // away from imputed boundary entries the three components add back
    // up to the observation
    let series = spiked_sine(2000, 20, &[]);
    let result = SeasonalEsdDetector::default().detect(&series).unwrap();

    let period = result.period;
    let half = period / 2;
    for i in half..series.len() - half {
        let reconstructed = result.trend[i] + result.seasonal[i] + result.residual[i];
        assert!(
            (series[i] - reconstructed).abs() < 1e-9,
            "reconstruction failed at {i}: {} vs {}",
            series[i],
            reconstructed
        );
    }
}
