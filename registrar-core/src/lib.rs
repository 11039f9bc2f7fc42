//! Registrar core library: course catalog, students, and the registry that
//! keeps enrollment counts and course sets in step.
//!
//! Public API surface:
//! - [`types`]: newtypes, [`Course`], [`Student`]
//! - [`error`]: [`RegistrationError`], [`CatalogError`]
//! - [`catalog`]: seed catalog and catalog file loading
//! - [`registry`]: the single-owner [`Registry`]
//! - [`shared`]: [`SharedRegistry`], a locked handle for concurrent callers

pub mod catalog;
pub mod error;
pub mod registry;
pub mod shared;
pub mod types;

pub use catalog::{Catalog, CatalogEntry};
pub use error::{CatalogError, RegistrationError};
pub use registry::Registry;
pub use shared::SharedRegistry;
pub use types::{Course, CourseCode, Student, StudentId};
