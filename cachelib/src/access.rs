/// Splits a memory operation into one lookup address per line it touches
///
/// Line crossings are judged with `line_size`, the line size of the innermost cache. The yielded
/// addresses step from the start address by whole lines and aren't re-aligned, so every cache
/// derives its own block from the same raw address.
///
/// A zero sized operation starting on a line boundary touches no lines. One starting part way
/// through a line still counts as touching it
///
/// # Arguments
///
/// * `address`: The first byte of the operation
/// * `size`: The size of the operation in bytes
/// * `line_size`: The reference line size, must be non-zero
///
/// returns: impl Iterator<Item = u64>
///
/// # Examples
///
/// ```
/// use cachelib::access::expand;
/// // Bytes 2..8 cover the lines at 0 and 4
/// assert_eq!(expand(2, 6, 4).collect::<Vec<_>>(), vec![2, 6]);
/// assert_eq!(expand(0, 4, 4).count(), 1);
/// ```
pub fn expand(address: u64, size: u64, line_size: u64) -> impl Iterator<Item = u64> {
    let lines = line_count(address, size, line_size);
    (0..lines).map(move |i| address.wrapping_add(i.wrapping_mul(line_size)))
}

/// The number of lines touched by a memory operation
///
/// Computed in 128 bits, so operations running off the end of the address space still give the
/// right count rather than overflowing
pub fn line_count(address: u64, size: u64, line_size: u64) -> u64 {
    let offset = (address % line_size) as u128;
    match (offset + size as u128).checked_sub(1) {
        // At most u64::MAX when the line size is 1, smaller otherwise
        Some(last_byte) => (last_byte / line_size as u128 + 1) as u64,
        None => 0,
    }
}
