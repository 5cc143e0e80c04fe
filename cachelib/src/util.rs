use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use regex::Regex;

pub const TEST_DATA_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/test-data");

/// The files making up one regression case
pub struct TestCasePaths {
    pub config: PathBuf,
    pub trace: PathBuf,
    pub output: PathBuf,
}

/// Finds every regression case in the bundled test data
pub fn get_configs() -> Result<Vec<TestCasePaths>, Box<dyn Error>> {
    get_configs_in(TEST_DATA_PATH)
}

/// Finds every regression case under a directory
///
/// Cases are named by their expected output, `sample-outputs/output-<trace>-<config>.json`, which
/// is the result of replaying `trace-files/<trace>.out` against `sample-inputs/<config>.json`
pub fn get_configs_in<P: AsRef<Path>>(root: P) -> Result<Vec<TestCasePaths>, Box<dyn Error>> {
    let root = root.as_ref();
    let output_pattern = Regex::new(r"^output-(?P<trace>[0-9a-zA-Z_]+)-(?P<config>[0-9a-zA-Z_]+)\.json$")?;
    let mut files = Vec::new();
    for entry in fs::read_dir(root.join("sample-outputs"))? {
        let file_name = entry?
            .file_name()
            .into_string()
            .map_err(|e| format!("Can't convert OS string ({e:?}) to standard string"))?;
        if output_pattern.is_match(&file_name) {
            files.push(file_name);
        }
    }
    files.sort();
    let mut out = Vec::new();
    for file_name in files {
        // Get components of name
        let tokens = output_pattern.captures(&file_name).ok_or("Couldn't parse the file name".to_string())?;
        let trace = tokens.name("trace").ok_or("Couldn't get the trace file from the output file name".to_string())?.as_str();
        let config = tokens.name("config").ok_or("Couldn't get the config file from the output file name".to_string())?.as_str();
        out.push(TestCasePaths {
            config: root.join("sample-inputs").join(format!("{config}.json")),
            trace: root.join("trace-files").join(format!("{trace}.out")),
            output: root.join("sample-outputs").join(&file_name),
        })
    }
    Ok(out)
}
