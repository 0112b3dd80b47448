use rand::Rng;
use std::time::Duration;

/// Random pause drawn uniformly from `[min_secs, max_secs]`
///
/// Bounds that do not fit in a `Duration` yield no pause rather than a panic.
pub fn jittered_delay(min_secs: f64, max_secs: f64) -> Duration {
    let secs = if max_secs <= min_secs {
        min_secs
    } else {
        rand::rng().random_range(min_secs..=max_secs)
    };
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::ZERO)
}

/// Name of the CSV export for a given target count
pub fn export_filename(target_count: usize) -> String {
    format!("zsu_daily_briefs_selenium_last_{}_days.csv", target_count)
}
