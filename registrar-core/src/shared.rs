//! Thread-safe handle over a [`Registry`].
//!
//! Registration and drop are check-then-act sequences (read availability, then
//! write two structures). Each call here holds one registry-wide lock for the
//! whole sequence, so two callers can never both claim the last seat.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::catalog::Catalog;
use crate::error::{CatalogError, RegistrationError};
use crate::registry::Registry;
use crate::types::{Course, CourseCode, Student, StudentId};

/// Cloneable handle; clones share the same registry.
///
/// Results are owned snapshots, taken while the lock is held.
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<Registry>>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn from_catalog(catalog: &Catalog) -> Result<Self, CatalogError> {
        Registry::from_catalog(catalog).map(Self::new)
    }

    pub fn add_student(
        &self,
        id: impl Into<StudentId>,
        name: impl Into<String>,
    ) -> Result<Student, RegistrationError> {
        self.lock().add_student(id, name).cloned()
    }

    pub fn register_student(
        &self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<(), RegistrationError> {
        self.lock().register_student(student_id, course_code)
    }

    pub fn drop_course(
        &self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<(), RegistrationError> {
        self.lock().drop_course(student_id, course_code)
    }

    pub fn list_courses(&self) -> Vec<Course> {
        self.lock().list_courses().into_iter().cloned().collect()
    }

    pub fn get_student_courses(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<Course>, RegistrationError> {
        let registry = self.lock();
        let courses = registry.get_student_courses(student_id)?;
        Ok(courses.into_iter().cloned().collect())
    }

    pub fn student(&self, id: &StudentId) -> Result<Student, RegistrationError> {
        self.lock().student(id).cloned()
    }

    /// Run `f` against the registry under the lock.
    pub fn with<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&*self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
