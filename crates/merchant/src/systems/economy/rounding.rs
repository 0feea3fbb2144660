/// Rounds halves toward positive infinity, so `2.5 -> 3` and `-2.5 -> -2`.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// [`round_half_up`] for quantities that can never be negative.
pub fn round_half_up_u32(value: f64) -> u32 {
    let rounded = round_half_up(value);
    u32::try_from(rounded.max(0)).unwrap_or(u32::MAX)
}
