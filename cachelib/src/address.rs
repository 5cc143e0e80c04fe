/// Splits an address into a tag and the index of the slot group that may hold it
///
/// The block id is the address divided by the line size. The group index is the block id modulo
/// the number of groups, and the tag is whatever remains of the block id once the index is removed.
///
/// A direct mapped cache has one group per line, a set associative cache one group per set, and a
/// fully associative cache a single group, in which case the tag is the block id itself.
///
/// Callers guarantee both `line_size` and `group_count` are non-zero; cache construction rejects
/// any geometry where they wouldn't be
///
/// # Arguments
///
/// * `address`: The raw byte address
/// * `line_size`: The line size of the cache in bytes
/// * `group_count`: The number of slot groups in the cache
///
/// returns: (u64, u64), the tag and the group index
///
/// # Examples
///
/// ```
/// use cachelib::address::decompose;
/// // 64 / 4 = block 16, which lands in group 0 of 4 with tag 4
/// assert_eq!(decompose(64, 4, 4), (4, 0));
/// assert_eq!(decompose(70, 4, 1), (17, 0));
/// ```
#[inline]
pub fn decompose(address: u64, line_size: u64, group_count: u64) -> (u64, u64) {
    let block = block_id(address, line_size);
    (block / group_count, block % group_count)
}

/// The block id of an address, i.e. which line sized chunk of memory it falls in
#[inline]
pub fn block_id(address: u64, line_size: u64) -> u64 {
    address / line_size
}
