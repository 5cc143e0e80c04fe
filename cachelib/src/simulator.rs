use std::io::BufRead;
use std::time::{Duration, Instant};
use log::{info, trace};
use crate::cache::CacheTrait;
use crate::config::LayeredCacheConfig;
use crate::error::{ConfigError, SimulationError};
use crate::hierarchy::{CacheHierarchy, LayeredCacheResult};
use crate::trace::TraceReader;

/// The simulator replays traces against a cache hierarchy, and collects results.
///
/// It supports calling simulate multiple times, and will update the time taken to simulate and the
/// results accordingly
pub struct Simulator {
    hierarchy: CacheHierarchy,
    result: LayeredCacheResult,
    simulation_time: Duration,
}

impl Simulator {

    /// Creates a new simulator for a given configuration
    ///
    /// # Arguments
    ///
    /// * `config`: A cache configuration, usually resulting from parsing JSON
    ///
    /// returns: Result<Simulator, ConfigError>, failing if any cache has an invalid geometry
    pub fn new(config: &LayeredCacheConfig) -> Result<Self, ConfigError> {
        let hierarchy = CacheHierarchy::from_config(config)?;
        Ok(Self::from_hierarchy(hierarchy))
    }

    /// Creates a simulator around an already built hierarchy
    pub fn from_hierarchy(hierarchy: CacheHierarchy) -> Self {
        let result = hierarchy.result();
        Self {
            hierarchy,
            result,
            simulation_time: Duration::new(0, 0),
        }
    }

    /// Simulates the cache hierarchy on a trace.
    ///
    /// Records are replayed strictly in order. The first malformed record aborts the run, and the
    /// hierarchy is left exactly as it was before the call
    ///
    /// # Arguments
    ///
    /// * `reader`: The trace, one record per line
    ///
    /// returns: Result<&LayeredCacheResult, SimulationError>
    pub fn simulate<Source: BufRead>(&mut self, reader: Source) -> Result<&LayeredCacheResult, SimulationError> {
        let start = Instant::now();
        let mut records: u64 = 0;
        let mut lookups: u64 = 0;
        // Replayed against a copy, only committed once the whole trace has been read
        let mut hierarchy = self.hierarchy.clone();
        for record in TraceReader::new(reader) {
            let record = record?;
            trace!("{} {:#x} {} {}", record.location, record.address, record.mode, record.size);
            lookups += hierarchy.access(record.address, record.size);
            records += 1;
        }
        self.hierarchy = hierarchy;
        let elapsed = start.elapsed();
        self.simulation_time += elapsed;
        self.result = self.hierarchy.result();
        info!("replayed {records} records as {lookups} line lookups in {elapsed:?}");
        Ok(&self.result)
    }

    /// The results as of the last completed simulation
    pub fn result(&self) -> &LayeredCacheResult {
        &self.result
    }

    pub fn hierarchy(&self) -> &CacheHierarchy {
        &self.hierarchy
    }

    /// Gets the wall-clock execution time for processing
    pub fn get_execution_time(&self) -> &Duration {
        &self.simulation_time
    }

    /// Gets the number of uninitialised lines for each cache
    pub fn get_uninitialised_line_counts(&self) -> Vec<u64> {
        self.hierarchy
            .levels()
            .iter()
            .map(|level| level.cache().get_uninitialised_line_count() as u64)
            .collect()
    }
}
