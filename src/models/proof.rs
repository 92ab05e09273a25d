use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::errors::{RunnerError, RunnerResult};

/// Name of the per-proof file that declares `PROOF_UID`
pub const PROOF_MAKEFILE: &str = "Makefile";

fn proof_uid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^PROOF_UID\s*=\s*(?P<uid>\w+)").expect("PROOF_UID pattern is valid")
    })
}

/// Extract the first `PROOF_UID = <uid>` declaration from Makefile text
pub fn parse_proof_uid(contents: &str) -> Option<String> {
    contents
        .lines()
        .find_map(|line| proof_uid_pattern().captures(line))
        .map(|caps| caps["uid"].to_string())
}

/// One proof directory found during discovery.
///
/// Immutable once built: the declared identifier is read from the proof's
/// Makefile at discovery time and checked later by the `UidRegistry`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofUnit {
    pub path: PathBuf,
    pub marker_present: bool,
    pub declared_uid: Option<String>,
}

impl ProofUnit {
    /// Load a proof unit from its directory.
    ///
    /// A missing Makefile leaves `declared_uid` empty; any other read error
    /// is reported.
    pub fn load(path: &Path, marker: &str) -> RunnerResult<Self> {
        let makefile = path.join(PROOF_MAKEFILE);
        let declared_uid = match fs::read_to_string(&makefile) {
            Ok(contents) => parse_proof_uid(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(source) => {
                return Err(RunnerError::ProofFile { path: makefile, source });
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            marker_present: path.join(marker).is_file(),
            declared_uid,
        })
    }
}

/// Terminal state of a single proof after configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOutcome {
    Succeeded,
    Failed,
}

impl fmt::Display for UnitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitOutcome::Succeeded => write!(f, "succeeded"),
            UnitOutcome::Failed => write!(f, "failed"),
        }
    }
}
