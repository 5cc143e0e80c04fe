use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use crate::error::ConfigError;

lazy_static! {
    static ref SET_ASSOCIATIVE_KIND: Regex = Regex::new(r"^(?P<ways>[0-9]+)way$").unwrap();
}

/// A cache configuration with multiple layers, closest to the requester first
#[derive(Debug, Deserialize)]
pub struct LayeredCacheConfig {
    pub caches: Vec<CacheConfig>,
}

impl LayeredCacheConfig {
    /// Reads and parses a JSON configuration file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses a JSON configuration
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// A configuration for a single cache
#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    pub name: String,
    pub size: u64,
    pub line_size: u64,
    pub kind: CacheKindConfig,
    #[serde(default = "ReplacementPolicyConfig::default")]
    pub replacement_policy: ReplacementPolicyConfig,
}

/// The dimensions of a cache, checked to be consistent
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Geometry {
    pub line_size: u64,
    pub line_count: u64,
    /// The number of slot groups: one per line when direct mapped, one when fully associative
    pub group_count: u64,
}

impl Geometry {
    /// The number of slots in each group
    pub fn group_size(&self) -> u64 {
        self.line_count / self.group_count
    }
}

impl CacheConfig {
    /// Derives the geometry of the cache, failing if the size, line size and kind don't fit
    /// together
    pub fn geometry(&self) -> Result<Geometry, ConfigError> {
        if self.line_size == 0 {
            return Err(ConfigError::ZeroLineSize { name: self.name.clone() });
        }
        if self.size % self.line_size != 0 {
            return Err(ConfigError::SizeNotLineMultiple {
                name: self.name.clone(),
                size: self.size,
                line_size: self.line_size,
            });
        }
        let line_count = self.size / self.line_size;
        if line_count == 0 {
            return Err(ConfigError::NoLines { name: self.name.clone() });
        }
        let group_count = match self.kind {
            CacheKindConfig::Direct => line_count,
            CacheKindConfig::Full => 1,
            CacheKindConfig::SetAssociative(ways) => {
                if line_count % ways != 0 {
                    return Err(ConfigError::AssociativityMismatch {
                        name: self.name.clone(),
                        ways,
                        line_count,
                    });
                }
                line_count / ways
            }
        };
        Ok(Geometry { line_size: self.line_size, line_count, group_count })
    }
}

/// The kind of cache - direct, full, or any `<N>way` set associative cache
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum CacheKindConfig {
    Direct,
    Full,
    /// Holds the associativity, which is always at least 1
    SetAssociative(u64),
}

impl TryFrom<String> for CacheKindConfig {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for CacheKindConfig {
    type Err = ConfigError;

    /// # Examples
    ///
    /// ```
    /// use cachelib::config::CacheKindConfig;
    /// assert_eq!("16way".parse::<CacheKindConfig>().unwrap(), CacheKindConfig::SetAssociative(16));
    /// assert!("way".parse::<CacheKindConfig>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "direct" => Ok(Self::Direct),
            "full" => Ok(Self::Full),
            _ => SET_ASSOCIATIVE_KIND
                .captures(s)
                .and_then(|c| c.name("ways"))
                .and_then(|ways| ways.as_str().parse::<u64>().ok())
                .filter(|ways| *ways > 0)
                .map(Self::SetAssociative)
                .ok_or_else(|| ConfigError::UnknownKind(s.to_string())),
        }
    }
}

/// The replacement policy, if applicable - round robin, lru, or lfu. Defaults to round robin.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Deserialize)]
pub enum ReplacementPolicyConfig {
    #[default]
    #[serde(alias = "rr")]
    RoundRobin,
    #[serde(alias = "lru")]
    LeastRecentlyUsed,
    #[serde(alias = "lfu")]
    LeastFrequentlyUsed,
}
