use std::collections::BTreeSet;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::errors::{RunnerError, RunnerResult};
use crate::models::proof::ProofUnit;

/// Find every directory under `root` that directly contains `marker`.
///
/// When `requested` is given, only directories whose base name appears in it
/// are returned, and every requested name must match at least one proof
/// directory. Unmatched names are all reported together.
///
/// Directories are visited in file-name order so that output is stable
/// between runs over the same tree.
pub fn discover_proofs(
    root: &Path,
    marker: &str,
    requested: Option<&[String]>,
) -> RunnerResult<Vec<ProofUnit>> {
    if marker.is_empty() {
        return Err(RunnerError::EmptyProofMarker);
    }
    if !root.is_dir() {
        return Err(RunnerError::ProofRoot { path: root.to_path_buf() });
    }

    let mut remaining: BTreeSet<&str> = requested
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .collect();
    let mut units = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_dir() || !entry.path().join(marker).is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if let Some(requested) = requested {
            if !requested.iter().any(|r| r.as_str() == name) {
                continue;
            }
            remaining.remove(name.as_ref());
        }

        debug!("Found proof directory {}", entry.path().display());
        units.push(ProofUnit::load(entry.path(), marker)?);
    }

    if !remaining.is_empty() {
        let missing: Vec<String> = requested
            .unwrap_or_default()
            .iter()
            .filter(|name| remaining.contains(name.as_str()))
            .cloned()
            .collect();
        return Err(RunnerError::ProofsNotFound(missing));
    }

    Ok(units)
}
