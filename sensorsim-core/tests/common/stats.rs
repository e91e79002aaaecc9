//! Sample statistics helpers

/// Arithmetic mean
pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation (n − 1 denominator)
pub fn std_dev(samples: &[f64]) -> f64 {
    let m = mean(samples);
    let ss: f64 = samples.iter().map(|s| (s - m) * (s - m)).sum();
    (ss / (samples.len() as f64 - 1.0)).sqrt()
}

/// Assert `actual` lies within `tolerance` of `expected`
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_dev_of_known_series() {
        let s = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&s), 5.0);
        assert_close(std_dev(&s), (32.0f64 / 7.0).sqrt(), 1e-12);
    }
}
