use crate::ConfigResult;
use std::collections::HashSet;
use std::path::Path;
use url::Url;

/// Inputs file read when no `--url` is given
pub const DEFAULT_INPUTS_PATH: &str = "data/inputs.txt";

/// Resolves the seed URLs for a run
///
/// Explicit URLs win. Without any, seeds are read from the inputs file, one
/// per line, skipping blank lines and `#` comments. Duplicates are dropped
/// keeping the first occurrence.
///
/// # Arguments
///
/// * `cli_urls` - URLs given on the command line
/// * `inputs` - Optional inputs file, consulted only when `cli_urls` is empty
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Seed URLs in order; may be empty
/// * `Err(ConfigError)` - The inputs file exists but could not be read
pub fn resolve_seeds(cli_urls: &[String], inputs: Option<&Path>) -> ConfigResult<Vec<String>> {
    let raw: Vec<String> = if !cli_urls.is_empty() {
        cli_urls.to_vec()
    } else {
        match inputs {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(path)?;
                parse_inputs(&content)
            }
            Some(path) => {
                tracing::warn!("Inputs file {} not found", path.display());
                Vec::new()
            }
            None => Vec::new(),
        }
    };

    let mut seen = HashSet::new();
    Ok(raw
        .iter()
        .map(|seed| normalize_seed(seed))
        .filter(|seed| !seed.is_empty())
        .filter(|seed| seen.insert(seed.clone()))
        .collect())
}

/// Parses the lines of an inputs file
pub fn parse_inputs(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Converts an existing filesystem path into a `file://` URL
///
/// Anything else is returned trimmed and unchanged.
pub fn normalize_seed(seed: &str) -> String {
    let seed = seed.trim();
    if seed.contains("://") {
        return seed.to_string();
    }

    let path = Path::new(seed);
    if !seed.is_empty() && path.exists() {
        let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if let Ok(url) = Url::from_file_path(&absolute) {
            return url.to_string();
        }
    }

    seed.to_string()
}
