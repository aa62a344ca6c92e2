/// Mean of the marks, or `None` when there are none to average.
pub fn mean(marks: &[f64]) -> Option<f64> {
    if marks.is_empty() {
        return None;
    }
    Some(marks.iter().sum::<f64>() / marks.len() as f64)
}

/// Population standard deviation of the marks around `mean`.
pub fn stddev(marks: &[f64], mean: f64) -> f64 {
    if marks.len() < 2 {
        return 0.0;
    }
    let variance = marks.iter().map(|m| (m - mean).powi(2)).sum::<f64>() / marks.len() as f64;
    variance.sqrt()
}
