//! # Pairing Module
//!
//! Matches audio files across two directory trees by filename stem.
//!
//! - **Collection**: recursive, extension-filtered file discovery
//! - **Name mapping**: stem → path, first occurrence wins on duplicates
//! - **Matching**: sorted intersection of two name maps
//!
//! A missing or empty directory yields an empty list rather than an error;
//! the pipeline decides how to react.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively collect all files under `dir` whose extension matches one of
/// `extensions` (case-insensitive, without the dot).
pub fn collect_audio_files(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| {
                    let ext = ext.to_lowercase();
                    extensions.iter().any(|wanted| wanted.as_str() == ext)
                })
                .unwrap_or(false)
        })
        .collect()
}

/// Build a stem → path map. The first path seen for a stem wins; later
/// duplicates are silently discarded.
pub fn build_name_map<I>(paths: I) -> BTreeMap<String, PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut map = BTreeMap::new();
    for path in paths {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        map.entry(stem.to_string()).or_insert(path);
    }
    map
}

/// Lexicographically sorted intersection of the two maps' key sets.
pub fn common_stems(
    map_a: &BTreeMap<String, PathBuf>,
    map_b: &BTreeMap<String, PathBuf>,
) -> Vec<String> {
    // BTreeMap keys are already sorted and unique
    map_a
        .keys()
        .filter(|stem| map_b.contains_key(*stem))
        .cloned()
        .collect()
}
