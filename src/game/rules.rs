use std::time::Duration;

pub const LINES_PER_LEVEL: u64 = 10;
/// Awarded for a lock that clears nothing.
pub const LOCK_BONUS: u64 = 10;
pub const SOFT_DROP_POINTS_PER_ROW: u64 = 1;
pub const HARD_DROP_POINTS_PER_ROW: u64 = 2;

pub const BASE_DROP_INTERVAL: Duration = Duration::from_millis(1000);
pub const DROP_INTERVAL_STEP: Duration = Duration::from_millis(100);
pub const MIN_DROP_INTERVAL: Duration = Duration::from_millis(100);

/// Points for clearing `rows` at once at `level`.
pub fn line_clear_points(rows: usize, level: u32) -> u64 {
    let base = match rows {
        0 => 0,
        1 => 100,
        2 => 300,
        3 => 500,
        4 => 800,
        n => 200 * n as u64,
    };
    base * (u64::from(level) + 1)
}

pub fn level_for(lines: u64, start_level: u32) -> u32 {
    let earned = u32::try_from(lines / LINES_PER_LEVEL).unwrap_or(u32::MAX);
    earned.max(start_level)
}

pub fn drop_interval(level: u32) -> Duration {
    BASE_DROP_INTERVAL
        .saturating_sub(DROP_INTERVAL_STEP.saturating_mul(level))
        .max(MIN_DROP_INTERVAL)
}
