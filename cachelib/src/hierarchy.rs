use serde::{Deserialize, Serialize};
use crate::access::expand;
use crate::cache::{CacheLevel, CacheTrait};
use crate::config::LayeredCacheConfig;
use crate::error::ConfigError;

/// The result of a cache simulation. Can be serialised to the required output format
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct LayeredCacheResult {
    pub main_memory_accesses: u64,
    pub caches: Vec<CacheResult>,
}

/// The result for an individual cache. Can be serialised to the required output format
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct CacheResult {
    pub name: String,
    pub hits: u64,
    pub misses: u64,
}

/// An ordered stack of caches, closest to the requester first
///
/// A lookup probes each level in turn until one hits. Every level probed along the way records the
/// access and fills the line as if it were the one serving it
#[derive(Debug, Default, Clone)]
pub struct CacheHierarchy {
    levels: Vec<CacheLevel>,
    reference_line_size: Option<u64>,
    main_memory_accesses: u64,
}

impl CacheHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds every cache in the configuration, in order
    pub fn from_config(config: &LayeredCacheConfig) -> Result<Self, ConfigError> {
        if config.caches.is_empty() {
            return Err(ConfigError::NoCaches);
        }
        let mut hierarchy = Self::new();
        for cache in &config.caches {
            hierarchy.add_level(CacheLevel::from_config(cache)?);
        }
        Ok(hierarchy)
    }

    /// Appends a level below the existing ones. The first level's line size is used to split
    /// accesses into lines
    pub fn add_level(&mut self, level: CacheLevel) {
        if self.reference_line_size.is_none() {
            self.reference_line_size = Some(level.cache().get_line_size());
        }
        self.levels.push(level);
    }

    /// Looks up a single line, stopping at the first level that hits
    pub fn lookup(&mut self, address: u64) {
        for level in self.levels.iter_mut() {
            if level.lookup(address) {
                return;
            }
        }
        self.main_memory_accesses += 1;
    }

    /// Performs a memory operation of `size` bytes, looking up each line it touches
    ///
    /// returns: u64, the number of line lookups made
    pub fn access(&mut self, address: u64, size: u64) -> u64 {
        let Some(line_size) = self.reference_line_size else {
            // Nothing to split by, and nothing to hit in
            self.lookup(address);
            return 1;
        };
        let mut lookups = 0;
        for line_address in expand(address, size, line_size) {
            self.lookup(line_address);
            lookups += 1;
        }
        lookups
    }

    pub fn levels(&self) -> &[CacheLevel] {
        &self.levels
    }

    pub fn reference_line_size(&self) -> Option<u64> {
        self.reference_line_size
    }

    pub fn main_memory_accesses(&self) -> u64 {
        self.main_memory_accesses
    }

    /// Snapshots the counters in insertion order
    pub fn result(&self) -> LayeredCacheResult {
        LayeredCacheResult {
            main_memory_accesses: self.main_memory_accesses,
            caches: self.levels.iter().map(|level| {
                let stats = level.stats();
                CacheResult {
                    name: level.name().to_string(),
                    hits: stats.hits,
                    misses: stats.misses,
                }
            }).collect(),
        }
    }
}
