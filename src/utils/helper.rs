/// Returns the number of unordered pairs of n items
///
/// # Arguments
///
/// * `n` - The number of items
///
/// # Returns
///
/// * `u64` - n(n-1)/2, zero for n < 2
#[inline]
pub fn pair_count(n: u64) -> u64 {
    n * n.saturating_sub(1) / 2
}
