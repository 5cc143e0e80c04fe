use crate::access::{expand, line_count};
use crate::cache::{CacheLevel, DirectMappedCache, GenericCache};
use crate::config::LayeredCacheConfig;
use crate::hierarchy::CacheHierarchy;

fn direct_level(name: &str, line_size: u64, line_count: u64) -> CacheLevel {
    CacheLevel::new(name, GenericCache::Direct(DirectMappedCache::new(line_size, line_count)))
}

fn layered(json: &str) -> CacheHierarchy {
    let config = LayeredCacheConfig::from_reader(json.as_bytes()).unwrap();
    CacheHierarchy::from_config(&config).unwrap()
}

#[test]
fn expansion_covers_straddled_lines() {
    assert_eq!(line_count(2, 6, 4), 2);
    let lines: Vec<u64> = expand(2, 6, 4).collect();
    assert_eq!(lines.len(), 2);
    // One lookup in each of the lines at 0 and 4
    assert_eq!(lines.iter().map(|a| a / 4).collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn expansion_edge_cases() {
    assert_eq!(line_count(0, 4, 4), 1);
    assert_eq!(line_count(0, 5, 4), 2);
    assert_eq!(line_count(3, 1, 4), 1);
    assert_eq!(line_count(3, 2, 4), 2);
    assert_eq!(line_count(1, 32, 16), 3);
    assert_eq!(line_count(0, 0, 4), 0);
    assert_eq!(line_count(3, 0, 4), 1);
}

#[test]
fn line_count_handles_the_whole_address_space() {
    assert_eq!(line_count(0, u64::MAX, 1), u64::MAX);
    assert_eq!(line_count(1, u64::MAX, 4), u64::MAX / 4 + 1);
    assert_eq!(line_count(u64::MAX, 1, 64), 1);
    assert_eq!(expand(u64::MAX, 1, 64).collect::<Vec<_>>(), vec![u64::MAX]);
}

#[test]
fn first_level_sets_reference_line_size() {
    let mut hierarchy = CacheHierarchy::new();
    assert_eq!(hierarchy.reference_line_size(), None);
    hierarchy.add_level(direct_level("L1", 4, 4));
    hierarchy.add_level(direct_level("L2", 16, 4));
    assert_eq!(hierarchy.reference_line_size(), Some(4));
    // 8 bytes from 2 touch 3 lines of the first level, even though they fit in one of the second
    assert_eq!(hierarchy.access(2, 8), 3);
    let result = hierarchy.result();
    assert_eq!(result.caches[0].misses, 3);
    assert_eq!(result.caches[1].misses, 1);
    assert_eq!(result.caches[1].hits, 2);
    assert_eq!(result.main_memory_accesses, 1);
}

#[test]
fn misses_fill_every_probed_level() {
    let mut hierarchy = CacheHierarchy::new();
    hierarchy.add_level(direct_level("L1", 4, 1));
    hierarchy.add_level(direct_level("L2", 4, 4));
    hierarchy.lookup(0);
    // 0 is now in both levels, 4 evicts it from the 1 line L1 only
    hierarchy.lookup(4);
    hierarchy.lookup(0);
    let result = hierarchy.result();
    assert_eq!((result.caches[0].hits, result.caches[0].misses), (0, 3));
    assert_eq!((result.caches[1].hits, result.caches[1].misses), (1, 2));
    assert_eq!(result.main_memory_accesses, 2);
    // L1 was refilled on the way to the L2 hit
    hierarchy.lookup(0);
    assert_eq!(hierarchy.result().caches[0].hits, 1);
}

#[test]
fn hits_stop_the_probe() {
    let mut hierarchy = layered(r#"{"caches": [
        {"name": "L1", "size": 16, "line_size": 4, "kind": "direct"},
        {"name": "L2", "size": 64, "line_size": 4, "kind": "full", "replacement_policy": "lru"}
    ]}"#);
    for address in [0, 0, 0, 4] {
        hierarchy.lookup(address);
    }
    let result = hierarchy.result();
    assert_eq!((result.caches[0].hits, result.caches[0].misses), (2, 2));
    assert_eq!((result.caches[1].hits, result.caches[1].misses), (0, 2));
    assert_eq!(result.main_memory_accesses, 2);
}

#[test]
fn main_memory_counts_full_misses() {
    let mut hierarchy = layered(r#"{"caches": [
        {"name": "L1", "size": 8, "line_size": 4, "kind": "2way"},
        {"name": "L2", "size": 32, "line_size": 8, "kind": "2way", "replacement_policy": "lfu"},
        {"name": "L3", "size": 128, "line_size": 16, "kind": "direct"}
    ]}"#);
    let addresses = [0, 8, 16, 0, 64, 8, 300, 16, 0, 1000, 300];
    let mut lookups = 0;
    for address in addresses {
        lookups += hierarchy.access(address, 1);
    }
    assert_eq!(lookups, addresses.len() as u64);
    let result = hierarchy.result();
    // Every lookup either hits somewhere or reaches main memory
    let hits: u64 = result.caches.iter().map(|c| c.hits).sum();
    assert_eq!(hits + result.main_memory_accesses, lookups);
    assert_eq!(result.caches[0].hits + result.caches[0].misses, lookups);
    for pair in result.caches.windows(2) {
        assert_eq!(pair[0].misses, pair[1].hits + pair[1].misses);
    }
    assert_eq!(result.main_memory_accesses, result.caches[2].misses);
    assert_eq!(result.caches.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["L1", "L2", "L3"]);
}

#[test]
fn empty_hierarchy_goes_to_main_memory() {
    let mut hierarchy = CacheHierarchy::new();
    assert_eq!(hierarchy.access(12, 64), 1);
    hierarchy.lookup(12);
    assert_eq!(hierarchy.main_memory_accesses(), 2);
    assert!(hierarchy.result().caches.is_empty());
}
