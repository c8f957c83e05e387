/// X (attempt) and Y (WPM) upper bounds for the progress chart.
///
/// X never drops below 2 so a single attempt still gets a visible axis; Y is
/// rounded up to the next multiple of ten.
pub fn compute_chart_params(points: &[(f64, f64)]) -> (f64, f64) {
    let highest_wpm = points.iter().map(|&(_, wpm)| wpm).fold(0.0, f64::max);
    let last_attempt = points.last().map(|&(x, _)| x).unwrap_or(1.0);

    let y = ((highest_wpm / 10.0).ceil() * 10.0).max(10.0);
    (last_attempt.max(2.0), y)
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

/// Signed trend text such as `+4.2 wpm` or `-1.0 wpm`.
pub fn format_trend(trend: f64) -> String {
    if trend.abs() < 0.05 {
        "±0 wpm".to_string()
    } else {
        format!("{trend:+.1} wpm")
    }
}
