//! # CacheLib
//!
//! Cachelib is a library for simulating multi-level cache hierarchies
//!
//! It provides direct mapped, fully associative and set associative caches, the latter two
//! parameterised by a replacement policy, and a simulator which replays memory traces against an
//! ordered stack of them, counting hits, misses and main memory accesses
//!
//! Simulation is single threaded and deterministic, the same configuration and trace always
//! produce the same counts

/// Splits memory operations into the individual lines they touch
pub mod access;

/// Splits addresses into tags and slot group indices
pub mod address;

/// Contains the cache organisations, and the named, counted level wrapping one
pub mod cache;

/// Contains definitions for the JSON input format
pub mod config;

/// Error types for configuration, trace parsing and simulation
pub mod error;

/// The ordered stack of cache levels, and its serialisable results
pub mod hierarchy;

/// Opening trace files for fast sequential reads
pub mod io;

/// Contains the provided replacement policies, with a trait for implementing custom replacement
/// policies
pub mod replacement_policies;

/// Contains the simulator used to replay a trace against a cache configuration
pub mod simulator;

/// Parsing of memory trace records
pub mod trace;

#[cfg(test)]
mod test;

/// Contains utilities for running tests and benchmarks.
pub mod util;
