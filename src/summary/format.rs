/// Render a value scaled by 100 as a decimal with two fraction digits.
pub(super) fn format_x100(value: u64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}

/// Render the failed-iteration fraction (scaled by 10,000) as a percentage
/// with two fraction digits.
pub(super) fn format_percent_x10000(value: u64) -> String {
    // fraction * 10,000 is exactly percent * 100.
    format_x100(value)
}
