//! Catalog configuration.
//!
//! # Lookup order
//!
//! ```text
//! 1. an explicit path (e.g. `registrar --catalog ./courses.yaml`)
//! 2. ~/.registrar/catalog.yaml, if present
//! 3. the built-in seed catalog
//! ```
//!
//! The catalog is read once when a registry is built and never written back.
//!
//! # API pattern
//!
//! As elsewhere, `fn_at(home: &Path, …)` takes an explicit home and is what
//! tests call; `fn(…)` derives home from `dirs::home_dir()`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, CatalogError};
use crate::types::{Course, CourseCode};

/// One course definition as written in a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: CourseCode,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub capacity: u32,
}

impl CatalogEntry {
    /// A fresh `Course` with no seats taken.
    pub fn to_course(&self) -> Course {
        Course::new(
            self.code.clone(),
            self.title.clone(),
            self.description.clone(),
            self.capacity,
        )
    }
}

/// Ordered list of courses offered for registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub courses: Vec<CatalogEntry>,
}

impl Catalog {
    /// The built-in catalog used when no catalog file is configured.
    pub fn seed() -> Self {
        let entry = |code: &str, title: &str, description: &str, capacity| CatalogEntry {
            code: CourseCode::from(code),
            title: title.to_owned(),
            description: description.to_owned(),
            capacity,
        };
        Self {
            courses: vec![
                entry(
                    "CS101",
                    "Introduction to Programming",
                    "Learn the basics of programming.",
                    30,
                ),
                entry("MATH201", "Calculus I", "An introduction to calculus.", 25),
                entry(
                    "BIO301",
                    "Biology Fundamentals",
                    "Study the fundamentals of biology.",
                    20,
                ),
            ],
        }
    }

    /// First code that appears more than once, if any.
    pub(crate) fn first_duplicate(&self) -> Option<&CourseCode> {
        let mut seen = HashSet::new();
        self.courses
            .iter()
            .map(|entry| &entry.code)
            .find(|code| !seen.insert(*code))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seed()
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// `<home>/.registrar/catalog.yaml`, pure, no I/O.
pub fn catalog_path_at(home: &Path) -> PathBuf {
    home.join(".registrar").join("catalog.yaml")
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// Read and validate a catalog file.
///
/// Returns `CatalogError::Parse` (with path) for malformed YAML,
/// `DuplicateCourse` when a code repeats and `EmptyCatalog` for an empty list.
pub fn load_catalog_at(path: &Path) -> Result<Catalog, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let catalog: Catalog = serde_yaml::from_str(&contents).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    if catalog.courses.is_empty() {
        return Err(CatalogError::EmptyCatalog {
            path: path.to_path_buf(),
        });
    }
    if let Some(code) = catalog.first_duplicate() {
        return Err(CatalogError::DuplicateCourse { code: code.clone() });
    }

    tracing::debug!(
        path = %path.display(),
        courses = catalog.courses.len(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Pick the catalog to start from: `explicit`, then the home catalog file,
/// then [`Catalog::seed`].
pub fn resolve_catalog_at(home: &Path, explicit: Option<&Path>) -> Result<Catalog, CatalogError> {
    if let Some(path) = explicit {
        return load_catalog_at(path);
    }
    let path = catalog_path_at(home);
    if path.exists() {
        return load_catalog_at(&path);
    }
    tracing::debug!("no catalog file configured, using built-in catalog");
    Ok(Catalog::seed())
}

/// `resolve_catalog_at` convenience wrapper.
///
/// An explicit path does not need a home directory.
pub fn resolve_catalog(explicit: Option<&Path>) -> Result<Catalog, CatalogError> {
    if let Some(path) = explicit {
        return load_catalog_at(path);
    }
    resolve_catalog_at(&home()?, None)
}

fn home() -> Result<PathBuf, CatalogError> {
    dirs::home_dir().ok_or(CatalogError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
