const PERCENT: u64 = 100;

fn len_u64(values: &[u64]) -> u64 {
    u64::try_from(values.len()).unwrap_or(u64::MAX)
}

/// Integer mean (truncated). Zero for an empty slice.
#[must_use]
pub fn average_ms(values: &[u64]) -> u64 {
    let sum = values
        .iter()
        .fold(0u64, |acc, value| acc.saturating_add(*value));
    sum.checked_div(len_u64(values)).unwrap_or(0)
}

/// Nearest-rank percentile: the value at index `ceil(p / 100 * n) - 1` of
/// the ascending order. Zero for an empty slice.
///
/// `values` does not need to be sorted.
#[must_use]
pub fn nearest_rank(values: &[u64], percentile: u64) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let rank = percentile
        .min(PERCENT)
        .saturating_mul(len_u64(&sorted))
        .saturating_add(PERCENT.saturating_sub(1))
        .checked_div(PERCENT)
        .unwrap_or(0);
    let index = usize::try_from(rank.saturating_sub(1)).unwrap_or(usize::MAX);
    sorted
        .get(index)
        .or_else(|| sorted.last())
        .copied()
        .unwrap_or(0)
}
