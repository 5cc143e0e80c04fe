use std::io::BufRead;
use crate::error::TraceError;

/// One memory operation from a trace
///
/// Only the address and size matter to the caches. The other two fields are carried along
/// untouched
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TraceRecord {
    pub location: String,
    pub address: u64,
    pub mode: String,
    pub size: u64,
}

/// Parses a hexadecimal address, with or without a `0x` prefix
///
/// # Examples
///
/// ```
/// use cachelib::trace::parse_address;
/// assert_eq!(parse_address("000000000000000A").unwrap(), 10);
/// assert_eq!(parse_address("0x1f").unwrap(), 31);
/// ```
pub fn parse_address(field: &str) -> Result<u64, std::num::ParseIntError> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    u64::from_str_radix(digits, 16)
}

/// Parses a decimal access size
///
/// # Examples
///
/// ```
/// use cachelib::trace::parse_size;
/// assert_eq!(parse_size("010").unwrap(), 10);
/// ```
pub fn parse_size(field: &str) -> Result<u64, std::num::ParseIntError> {
    field.parse::<u64>()
}

/// Parses one non-blank trace line of 4 whitespace separated fields
///
/// The end of the access, `address + size`, must fit in 64 bits
///
/// # Arguments
///
/// * `line`: The text of the line, without its terminator
/// * `line_number`: The 1-based line number, used for errors
///
/// returns: Result<TraceRecord, TraceError>
pub fn parse_record(line: &str, line_number: usize) -> Result<TraceRecord, TraceError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [location, address, mode, size] = fields[..] else {
        return Err(TraceError::FieldCount { line: line_number, found: fields.len() });
    };
    let address = parse_address(address).map_err(|source| TraceError::Address {
        line: line_number,
        value: address.to_string(),
        source,
    })?;
    let size = parse_size(size).map_err(|source| TraceError::Size {
        line: line_number,
        value: size.to_string(),
        source,
    })?;
    // The end of the access must still be addressable
    if address.checked_add(size).is_none() {
        return Err(TraceError::AccessOverflow { line: line_number, address, size });
    }
    Ok(TraceRecord {
        location: location.to_string(),
        address,
        mode: mode.to_string(),
        size,
    })
}

/// Reads trace records one line at a time, skipping blank lines
///
/// Reads are strictly sequential, which suits memory mapped input
pub struct TraceReader<R: BufRead> {
    reader: R,
    buffer: String,
    line_number: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            line_number: 0,
        }
    }

    /// The number of lines read so far, including blank ones
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let line = self.buffer.trim();
                    if line.is_empty() {
                        continue;
                    }
                    return Some(parse_record(line, self.line_number));
                }
                Err(e) => return Some(Err(TraceError::Io(e))),
            }
        }
    }
}
