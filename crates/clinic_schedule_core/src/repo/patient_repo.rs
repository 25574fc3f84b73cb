//! Patient pathway source contracts and in-memory implementation.
//!
//! # Responsibility
//! - Supply patients (and through them, tasks) to the schedule service.
//! - Keep loading details out of the scheduling pipeline.
//!
//! # Invariants
//! - The scheduling core only reads from a repository; it never writes.
//! - Patient ids are unique within one repository snapshot.

use crate::model::patient::Patient;
use crate::model::task::PatientId;
use log::info;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised while loading patient data.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    DuplicatePatientId(PatientId),
    EmptyPatientId,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read patients `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid patients json: {err}"),
            Self::DuplicatePatientId(id) => write!(f, "duplicate patient id: {id}"),
            Self::EmptyPatientId => write!(f, "patient id must not be empty"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::DuplicatePatientId(_) | Self::EmptyPatientId => None,
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Read-only access to patient pathways.
pub trait PatientRepository {
    /// All patients in display order; order decides colour assignment.
    fn list_patients(&self) -> RepoResult<Vec<Patient>>;
}

/// Snapshot-backed repository, e.g. loaded from an exported JSON file.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPatientRepository {
    patients: Vec<Patient>,
}

impl InMemoryPatientRepository {
    /// Builds a repository after checking patient id uniqueness.
    pub fn new(patients: Vec<Patient>) -> RepoResult<Self> {
        let mut seen = BTreeSet::new();
        for patient in &patients {
            if patient.id.trim().is_empty() {
                return Err(RepoError::EmptyPatientId);
            }
            if !seen.insert(patient.id.as_str()) {
                return Err(RepoError::DuplicatePatientId(patient.id.clone()));
            }
        }
        Ok(Self { patients })
    }

    /// Parses a JSON array of patients.
    pub fn from_json_str(raw: &str) -> RepoResult<Self> {
        let patients: Vec<Patient> = serde_json::from_str(raw)?;
        Self::new(patients)
    }

    /// Reads a JSON array of patients from disk.
    pub fn load(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| RepoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let repo = Self::from_json_str(&raw)?;
        info!(
            "event=patients_loaded module=repo status=ok patients={}",
            repo.patients.len()
        );
        Ok(repo)
    }
}

impl PatientRepository for InMemoryPatientRepository {
    fn list_patients(&self) -> RepoResult<Vec<Patient>> {
        Ok(self.patients.clone())
    }
}
