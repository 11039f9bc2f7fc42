//! Error types for registrar-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{CourseCode, StudentId};

/// Rejections from registry operations.
///
/// Every variant is returned before anything is mutated, so the registry is
/// unchanged whenever one of these comes back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("student '{id}' already exists")]
    DuplicateStudent { id: StudentId },

    #[error("student '{id}' not found")]
    StudentNotFound { id: StudentId },

    #[error("course '{code}' not found")]
    CourseNotFound { code: CourseCode },

    /// All `capacity` seats are taken.
    #[error("course '{code}' is full ({capacity} of {capacity} seats taken)")]
    CourseFull { code: CourseCode, capacity: u32 },

    #[error("student '{id}' is already registered for '{code}'")]
    AlreadyRegistered { id: StudentId, code: CourseCode },

    #[error("student '{id}' is not registered for '{code}'")]
    NotRegistered { id: StudentId, code: CourseCode },
}

/// Errors from locating, reading, or validating a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with the offending file.
    #[error("failed to parse catalog at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Two catalog entries share a course code.
    #[error("duplicate course code '{code}' in catalog")]
    DuplicateCourse { code: CourseCode },

    #[error("catalog at {path} lists no courses")]
    EmptyCatalog { path: PathBuf },

    /// `dirs::home_dir()` returned `None`, so `~/.registrar/` cannot be located.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CatalogError {
    CatalogError::Io {
        path: path.into(),
        source,
    }
}
