//! Trailing rolling averages over the odometer series.
//!
//! Smooths noisy single-point readings before charting. Windows shrink
//! near the start of the series (minimum period 1), so the first point's
//! rolling average equals its own odometer reading.

use super::timeline::TimelinePoint;

/// Short trailing window, in points.
pub const ROLLING_SHORT_WINDOW: usize = 7;

/// Long trailing window, in points.
pub const ROLLING_LONG_WINDOW: usize = 30;

/// Annotate each point with trailing 7- and 30-point odometer means.
///
/// Pure: returns a new timeline, input untouched. O(n) via sliding sums.
pub fn annotate_rolling(timeline: &[TimelinePoint]) -> Vec<TimelinePoint> {
    let mut annotated = timeline.to_vec();
    fill_trailing_mean(&mut annotated, ROLLING_SHORT_WINDOW, |point, mean| {
        point.rolling_avg_7 = Some(mean)
    });
    fill_trailing_mean(&mut annotated, ROLLING_LONG_WINDOW, |point, mean| {
        point.rolling_avg_30 = Some(mean)
    });
    annotated
}

/// Trailing mean of up to `window` odometer values ending at each index.
fn fill_trailing_mean(
    points: &mut [TimelinePoint],
    window: usize,
    mut set: impl FnMut(&mut TimelinePoint, f64),
) {
    let mut sum = 0.0;
    for i in 0..points.len() {
        sum += f64::from(points[i].odometer_km);
        if i >= window {
            sum -= f64::from(points[i - window].odometer_km);
        }
        let effective = (i + 1).min(window);
        set(&mut points[i], sum / effective as f64);
    }
}
