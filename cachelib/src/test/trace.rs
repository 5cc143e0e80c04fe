use std::io::Cursor;
use crate::config::LayeredCacheConfig;
use crate::error::{SimulationError, TraceError};
use crate::simulator::Simulator;
use crate::trace::{parse_record, TraceReader, TraceRecord};

const TWO_LEVELS: &str = r#"{"caches": [
    {"name": "L1", "size": 16, "line_size": 4, "kind": "direct"},
    {"name": "L2", "size": 64, "line_size": 8, "kind": "2way", "replacement_policy": "lru"}
]}"#;

#[test]
fn parses_fixed_width_records() {
    let record = parse_record("0000000000401a3c 00007ffd5b2a8f18 R 008", 1).unwrap();
    assert_eq!(record, TraceRecord {
        location: "0000000000401a3c".to_string(),
        address: 0x7ffd5b2a8f18,
        mode: "R".to_string(),
        size: 8,
    });
}

#[test]
fn accepts_loose_whitespace_and_prefixes() {
    let record = parse_record("  pc\t0x40   W    16 ", 3).unwrap();
    assert_eq!(record.address, 0x40);
    assert_eq!(record.size, 16);
}

#[test]
fn reports_malformed_records() {
    assert!(matches!(parse_record("a b c", 4), Err(TraceError::FieldCount { line: 4, found: 3 })));
    assert!(matches!(parse_record("a b c d e", 5), Err(TraceError::FieldCount { line: 5, found: 5 })));
    assert!(matches!(parse_record("pc 12zz R 4", 6), Err(TraceError::Address { line: 6, .. })));
    assert!(matches!(parse_record("pc 12 R 0x4", 7), Err(TraceError::Size { line: 7, .. })));
    assert!(matches!(parse_record("pc 12 R -4", 8), Err(TraceError::Size { line: 8, .. })));
}

#[test]
fn reader_skips_blank_lines_and_counts_them() {
    let trace = "pc 0 R 4\n\n   \npc 4 W 4\n";
    let mut reader = TraceReader::new(Cursor::new(trace));
    assert_eq!(reader.next().unwrap().unwrap().address, 0);
    assert_eq!(reader.next().unwrap().unwrap().address, 4);
    assert_eq!(reader.line_number(), 4);
    assert!(reader.next().is_none());
}

#[test]
fn reader_reports_line_numbers() {
    let trace = "pc 0 R 4\n\npc xyz R 4\n";
    let records: Vec<_> = TraceReader::new(Cursor::new(trace)).collect();
    assert_eq!(records.len(), 2);
    assert!(matches!(records[1], Err(TraceError::Address { line: 3, .. })));
}

#[test]
fn simulates_a_small_trace() {
    let config = LayeredCacheConfig::from_reader(TWO_LEVELS.as_bytes()).unwrap();
    let mut simulator = Simulator::new(&config).unwrap();
    // The first record straddles two 4 byte lines
    let trace = "\
0000000000401000 0000000000000002 R 006
0000000000401004 0000000000000000 R 004
0000000000401008 0000000000000040 W 004
000000000040100c 0000000000000000 R 001
";
    let result = simulator.simulate(Cursor::new(trace)).unwrap();
    let summary: Vec<_> = result.caches.iter().map(|c| (c.name.as_str(), c.hits, c.misses)).collect();
    assert_eq!(summary, vec![("L1", 1, 4), ("L2", 2, 2)]);
    assert_eq!(result.main_memory_accesses, 2);
    assert_eq!(simulator.get_uninitialised_line_counts(), vec![2, 6]);
}

#[test]
fn malformed_trace_aborts() {
    let config = LayeredCacheConfig::from_reader(TWO_LEVELS.as_bytes()).unwrap();
    let mut simulator = Simulator::new(&config).unwrap();
    let err = simulator.simulate(Cursor::new("pc 0 R 4\npc 4 R\n")).unwrap_err();
    assert!(matches!(err, SimulationError::Trace(TraceError::FieldCount { line: 2, found: 3 })));
    // Nothing is published from a partial run
    assert_eq!(simulator.result().caches[0].misses, 0);
    assert_eq!(simulator.get_uninitialised_line_counts(), vec![4, 8]);

    // The aborted record at 0 left no trace in the counters or the caches
    let result = simulator.simulate(Cursor::new("pc 100 R 4\n")).unwrap();
    let summary: Vec<_> = result.caches.iter().map(|c| (c.name.as_str(), c.hits, c.misses)).collect();
    assert_eq!(summary, vec![("L1", 0, 1), ("L2", 0, 1)]);
    assert_eq!(result.main_memory_accesses, 1);
    assert_eq!(simulator.get_uninitialised_line_counts(), vec![3, 7]);
}

#[test]
fn oversized_access_is_rejected() {
    let config = LayeredCacheConfig::from_reader(TWO_LEVELS.as_bytes()).unwrap();
    let mut simulator = Simulator::new(&config).unwrap();
    let err = simulator.simulate(Cursor::new("pc 1 R 18446744073709551615\n")).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Trace(TraceError::AccessOverflow { line: 1, address: 1, size: u64::MAX })
    ));
    assert_eq!(simulator.result().main_memory_accesses, 0);
}

#[test]
fn access_end_must_fit_in_64_bits() {
    assert!(parse_record("pc ffffffffffffffff R 0", 1).is_ok());
    assert!(parse_record("pc fffffffffffffffe R 1", 2).is_ok());
    assert!(parse_record("pc 0 R 18446744073709551615", 3).is_ok());
    assert!(matches!(
        parse_record("pc ffffffffffffffff R 1", 4),
        Err(TraceError::AccessOverflow { line: 4, address: u64::MAX, size: 1 })
    ));

    let config = LayeredCacheConfig::from_reader(TWO_LEVELS.as_bytes()).unwrap();
    let mut simulator = Simulator::new(&config).unwrap();
    let result = simulator.simulate(Cursor::new("pc fffffffffffffffc R 3\n")).unwrap();
    assert_eq!(result.caches[0].hits + result.caches[0].misses, 1);
}
