/// Rounds half away from zero to `decimals` places.
#[inline(always)]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `part / total` as a percentage with one decimal, 0 when `total` is 0.
#[inline(always)]
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64 * 100.0, 1)
}

/// Sum that clamps at `u64::MAX` instead of overflowing.
#[inline(always)]
pub fn saturating_sum<I: IntoIterator<Item = u64>>(values: I) -> u64 {
    values.into_iter().fold(0u64, u64::saturating_add)
}
