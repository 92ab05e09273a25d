use std::collections::HashMap;
use std::path::PathBuf;

use crate::errors::{RunnerError, RunnerResult};
use crate::models::proof::ProofUnit;

/// Maps each claimed `PROOF_UID` to the first directory that declared it.
///
/// Scoped to one run; nothing is persisted.
#[derive(Debug, Default)]
pub struct UidRegistry {
    claims: HashMap<String, PathBuf>,
}

impl UidRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the unit's declared identifier.
    ///
    /// Fails when the unit declares no identifier, or when a different
    /// directory already holds it. Re-claiming from the same directory is a
    /// no-op.
    pub fn claim(&mut self, unit: &ProofUnit) -> RunnerResult<()> {
        let Some(uid) = unit.declared_uid.as_deref() else {
            return Err(RunnerError::MissingProofUid { dir: unit.path.clone() });
        };

        match self.claims.get(uid) {
            Some(first) if first != &unit.path => {
                Err(RunnerError::DuplicateProofUid {
                    uid: uid.to_string(),
                    dir: unit.path.clone(),
                    first: first.clone(),
                })
            }
            Some(_) => Ok(()),
            None => {
                self.claims.insert(uid.to_string(), unit.path.clone());
                Ok(())
            }
        }
    }

    #[cfg(test)]
    pub fn owner(&self, uid: &str) -> Option<&PathBuf> {
        self.claims.get(uid)
    }

    pub(crate) fn len(&self) -> usize {
        self.claims.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
