//! Custom assertions for testing

/// Assert that two floating point values agree within `tolerance`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{} differs from {} by more than {}",
        actual,
        expected,
        tolerance
    );
}

/// Assert that values never increase
pub fn assert_sorted_desc(values: &[f64]) {
    for pair in values.windows(2) {
        assert!(
            pair[0] >= pair[1],
            "values are not in descending order: {} before {}",
            pair[0],
            pair[1]
        );
    }
}
