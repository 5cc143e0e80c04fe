use log::debug;
use crate::address::decompose;
use crate::config::{CacheConfig, CacheKindConfig, Geometry};
use crate::error::ConfigError;
use crate::replacement_policies::{GenericPolicy, ReplacementPolicy, SlotGroup};

/// A generic trait for caches
///
/// The trait assumes that ensuring reads spanning multiple cache lines are split properly is the
/// responsibility of the caller
pub trait CacheTrait {

    /// Converts an address into a tag and the index of the slot group it maps to
    ///
    /// # Arguments
    ///
    /// * `input`: The raw address
    ///
    /// returns: (u64, u64)
    fn address_to_tag_and_group(&self, input: u64) -> (u64, u64);

    /// Tries to read a cache line, returning true on a cache hit, and false otherwise
    ///
    /// On both hits and misses, the implementation must update its stored tags and replacement
    /// metadata
    ///
    /// # Arguments
    ///
    /// * `input`: The address of the read. Note this is for the line at that address, hence no size
    /// argument
    ///
    /// returns: bool
    fn read_and_update_line(&mut self, input: u64) -> bool;

    /// Gets the line size used by this cache
    fn get_line_size(&self) -> u64;

    /// Gets the number of uninitialised cache lines. Useful for analysing cache performance or
    /// debugging
    fn get_uninitialised_line_count(&self) -> usize;
}

/// A direct mapped cache. Each line is its own group, so a miss always overwrites the one slot the
/// address maps to
#[derive(Debug, Clone)]
pub struct DirectMappedCache {
    line_size: u64,
    lines: Vec<Option<u64>>,
}

impl DirectMappedCache {
    pub fn new(line_size: u64, line_count: u64) -> Self {
        Self {
            line_size,
            lines: vec![None; line_count as usize],
        }
    }

    pub fn lines(&self) -> &[Option<u64>] {
        &self.lines
    }
}

impl CacheTrait for DirectMappedCache {
    fn address_to_tag_and_group(&self, input: u64) -> (u64, u64) {
        decompose(input, self.line_size, self.lines.len() as u64)
    }

    fn read_and_update_line(&mut self, input: u64) -> bool {
        let (tag, index) = self.address_to_tag_and_group(input);
        let line = &mut self.lines[index as usize];
        if *line == Some(tag) {
            return true;
        }
        *line = Some(tag);
        false
    }

    fn get_line_size(&self) -> u64 {
        self.line_size
    }

    fn get_uninitialised_line_count(&self) -> usize {
        self.lines.iter().filter(|l| l.is_none()).count()
    }
}

/// An associative cache, parameterised by a replacement policy
///
/// A fully associative cache is the special case of a single group holding every line, in which
/// case the tag is the whole block id. Otherwise each group is one set, and only the set an address
/// maps to is searched or updated
#[derive(Debug, Clone)]
pub struct AssociativeCache<R: ReplacementPolicy> {
    line_size: u64,
    groups: Vec<SlotGroup>,
    replacement_policy: R,
}

impl<R: ReplacementPolicy> AssociativeCache<R> {
    pub fn new(line_size: u64, group_count: u64, group_size: u64, policy: R) -> Self {
        Self {
            line_size,
            groups: (0..group_count).map(|_| SlotGroup::new(group_size as usize)).collect(),
            replacement_policy: policy,
        }
    }

    pub fn groups(&self) -> &[SlotGroup] {
        &self.groups
    }
}

impl<R: ReplacementPolicy> CacheTrait for AssociativeCache<R> {
    fn address_to_tag_and_group(&self, input: u64) -> (u64, u64) {
        decompose(input, self.line_size, self.groups.len() as u64)
    }

    fn read_and_update_line(&mut self, input: u64) -> bool {
        let (tag, group) = self.address_to_tag_and_group(input);
        self.groups[group as usize].lookup(tag, &mut self.replacement_policy)
    }

    fn get_line_size(&self) -> u64 {
        self.line_size
    }

    fn get_uninitialised_line_count(&self) -> usize {
        self.groups.iter().map(SlotGroup::uninitialised_slot_count).sum()
    }
}

/// Enum for the 3 cache organisations provided by the library
///
/// Using trait objects in Rust reduces boilerplate, but the dereference for every lookup is opaque
/// to the compiler. Branching on the concrete types lets it inline instead
#[derive(Debug, Clone)]
pub enum GenericCache {
    Direct(DirectMappedCache),
    FullyAssociative(AssociativeCache<GenericPolicy>),
    SetAssociative(AssociativeCache<GenericPolicy>),
}

impl GenericCache {
    /// Creates a new cache from a cache configuration, validating its geometry
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        let Geometry { line_size, line_count, group_count } = config.geometry()?;
        let policy = GenericPolicy::from(config.replacement_policy);
        let cache = match config.kind {
            CacheKindConfig::Direct => {
                GenericCache::Direct(DirectMappedCache::new(line_size, line_count))
            }
            CacheKindConfig::Full => {
                GenericCache::FullyAssociative(AssociativeCache::new(line_size, 1, line_count, policy))
            }
            CacheKindConfig::SetAssociative(ways) => {
                GenericCache::SetAssociative(AssociativeCache::new(line_size, group_count, ways, policy))
            }
        };
        debug!(
            "built cache {}: {:?}, {} lines of {} bytes in {} groups, {:?}",
            config.name, config.kind, line_count, line_size, group_count, config.replacement_policy
        );
        Ok(cache)
    }
}

impl CacheTrait for GenericCache {
    fn address_to_tag_and_group(&self, input: u64) -> (u64, u64) {
        match self {
            GenericCache::Direct(c) => c.address_to_tag_and_group(input),
            GenericCache::FullyAssociative(c) => c.address_to_tag_and_group(input),
            GenericCache::SetAssociative(c) => c.address_to_tag_and_group(input),
        }
    }

    fn read_and_update_line(&mut self, input: u64) -> bool {
        match self {
            GenericCache::Direct(c) => c.read_and_update_line(input),
            GenericCache::FullyAssociative(c) => c.read_and_update_line(input),
            GenericCache::SetAssociative(c) => c.read_and_update_line(input),
        }
    }

    fn get_line_size(&self) -> u64 {
        match self {
            GenericCache::Direct(c) => c.get_line_size(),
            GenericCache::FullyAssociative(c) => c.get_line_size(),
            GenericCache::SetAssociative(c) => c.get_line_size(),
        }
    }

    fn get_uninitialised_line_count(&self) -> usize {
        match self {
            GenericCache::Direct(c) => c.get_uninitialised_line_count(),
            GenericCache::FullyAssociative(c) => c.get_uninitialised_line_count(),
            GenericCache::SetAssociative(c) => c.get_uninitialised_line_count(),
        }
    }
}

/// Hit and miss counts for one cache. Only ever increase during a run
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// One named level of a hierarchy: a cache plus the counters for every lookup made against it
#[derive(Debug, Clone)]
pub struct CacheLevel {
    name: String,
    cache: GenericCache,
    stats: CacheStats,
}

impl CacheLevel {
    pub fn new(name: impl Into<String>, cache: GenericCache) -> Self {
        Self {
            name: name.into(),
            cache,
            stats: CacheStats::default(),
        }
    }

    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.name.clone(), GenericCache::from_config(config)?))
    }

    /// Looks up the line holding an address, counting the hit or miss
    pub fn lookup(&mut self, address: u64) -> bool {
        let hit = self.cache.read_and_update_line(address);
        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        hit
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn cache(&self) -> &GenericCache {
        &self.cache
    }
}
