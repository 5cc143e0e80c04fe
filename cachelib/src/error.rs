use thiserror::Error;

/// Errors raised while loading a cache configuration or deriving a cache's geometry from it
///
/// All of these are detected before any lookup runs
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("couldn't read the config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("couldn't parse the config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unrecognised cache kind {0:?}, expected \"direct\", \"full\" or \"<N>way\"")]
    UnknownKind(String),

    #[error("cache {name}: line size must be positive")]
    ZeroLineSize { name: String },

    #[error("cache {name}: size {size} is not a multiple of the line size {line_size}")]
    SizeNotLineMultiple { name: String, size: u64, line_size: u64 },

    #[error("cache {name}: must hold at least one line")]
    NoLines { name: String },

    #[error("cache {name}: associativity {ways} does not divide the line count {line_count}")]
    AssociativityMismatch { name: String, ways: u64, line_count: u64 },

    #[error("the configuration doesn't describe any caches")]
    NoCaches,
}

/// Errors raised while reading a trace. Line numbers are 1-based
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("couldn't read the trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected 4 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid hexadecimal address {value:?}")]
    Address {
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("line {line}: invalid access size {value:?}")]
    Size {
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("line {line}: access of {size} bytes at {address:#x} runs past the end of the address space")]
    AccessOverflow { line: usize, address: u64, size: u64 },
}

/// Errors raised while replaying a trace against a hierarchy
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Trace(#[from] TraceError),
}
