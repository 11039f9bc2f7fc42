//! In-memory course registry.
//!
//! # Invariant
//!
//! For every course `C`, `C.enrolled()` equals the number of students whose
//! course set contains `C.code`, and `0 <= enrolled <= capacity`. Every
//! mutating operation checks all of its preconditions first and then updates
//! both sides of the relationship together, so a rejected call leaves the
//! registry untouched.
//!
//! # State per (student, course) pair
//!
//! ```text
//! Unregistered --register_student (seat free)--> Registered
//! Registered   --drop_course------------------> Unregistered
//! ```
//!
//! Calling either transition from the wrong side returns an error instead of
//! silently succeeding.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::catalog::Catalog;
use crate::error::{CatalogError, RegistrationError};
use crate::types::{Course, CourseCode, Student, StudentId};

/// Owns the catalog and every student, and is the only writer of either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    /// Keyed by code, kept in catalog order.
    courses: IndexMap<CourseCode, Course>,
    students: HashMap<StudentId, Student>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry over the built-in seed catalog.
    pub fn new() -> Self {
        Self::with_courses(Catalog::seed().courses.iter().map(|e| e.to_course()))
    }

    /// A registry over `catalog`. Fails if two entries share a code.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, CatalogError> {
        if let Some(code) = catalog.first_duplicate() {
            return Err(CatalogError::DuplicateCourse { code: code.clone() });
        }
        Ok(Self::with_courses(
            catalog.courses.iter().map(|e| e.to_course()),
        ))
    }

    fn with_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        let courses = courses
            .into_iter()
            .map(|course| (course.code.clone(), course))
            .collect();
        Self {
            courses,
            students: HashMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Create a student with no courses.
    pub fn add_student(
        &mut self,
        id: impl Into<StudentId>,
        name: impl Into<String>,
    ) -> Result<&Student, RegistrationError> {
        let id = id.into();
        if self.students.contains_key(&id) {
            tracing::debug!(student = %id, "rejected duplicate student");
            return Err(RegistrationError::DuplicateStudent { id });
        }

        let student = Student::new(id.clone(), name);
        tracing::debug!(student = %id, name = %student.name, "added student");
        Ok(self.students.entry(id).or_insert(student))
    }

    /// Give `student_id` a seat in `course_code`.
    ///
    /// Checks, in order: student exists, course exists, a seat is free, the
    /// student is not already registered.
    pub fn register_student(
        &mut self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<(), RegistrationError> {
        let (student, course) = self
            .lookup_pair_mut(student_id, course_code)
            .inspect_err(|err| tracing::debug!(error = %err, "registration rejected"))?;

        if !course.is_available() {
            let err = RegistrationError::CourseFull {
                code: course_code.clone(),
                capacity: course.capacity(),
            };
            tracing::debug!(error = %err, "registration rejected");
            return Err(err);
        }
        if student.is_registered(course_code) {
            let err = RegistrationError::AlreadyRegistered {
                id: student_id.clone(),
                code: course_code.clone(),
            };
            tracing::debug!(error = %err, "registration rejected");
            return Err(err);
        }

        // Both guards hold, so neither call below can refuse.
        course.enroll();
        student.add_course(course_code.clone());
        tracing::debug!(
            student = %student_id,
            course = %course_code,
            enrolled = course.enrolled(),
            "registered"
        );
        Ok(())
    }

    /// Release `student_id`'s seat in `course_code`.
    pub fn drop_course(
        &mut self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<(), RegistrationError> {
        let (student, course) = self
            .lookup_pair_mut(student_id, course_code)
            .inspect_err(|err| tracing::debug!(error = %err, "drop rejected"))?;

        if !student.is_registered(course_code) {
            let err = RegistrationError::NotRegistered {
                id: student_id.clone(),
                code: course_code.clone(),
            };
            tracing::debug!(error = %err, "drop rejected");
            return Err(err);
        }

        student.remove_course(course_code);
        course.unenroll();
        tracing::debug!(
            student = %student_id,
            course = %course_code,
            enrolled = course.enrolled(),
            "dropped"
        );
        Ok(())
    }

    fn lookup_pair_mut(
        &mut self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<(&mut Student, &mut Course), RegistrationError> {
        let student = self.students.get_mut(student_id).ok_or_else(|| {
            RegistrationError::StudentNotFound {
                id: student_id.clone(),
            }
        })?;
        let course = self.courses.get_mut(course_code).ok_or_else(|| {
            RegistrationError::CourseNotFound {
                code: course_code.clone(),
            }
        })?;
        Ok((student, course))
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Every course, in catalog order.
    pub fn list_courses(&self) -> Vec<&Course> {
        self.courses.values().collect()
    }

    /// The courses `student_id` is registered in, in catalog order.
    pub fn get_student_courses(
        &self,
        student_id: &StudentId,
    ) -> Result<Vec<&Course>, RegistrationError> {
        let student = self.student(student_id)?;
        Ok(self
            .courses
            .values()
            .filter(|course| student.is_registered(&course.code))
            .collect())
    }

    pub fn course(&self, code: &CourseCode) -> Result<&Course, RegistrationError> {
        self.courses
            .get(code)
            .ok_or_else(|| RegistrationError::CourseNotFound { code: code.clone() })
    }

    pub fn student(&self, id: &StudentId) -> Result<&Student, RegistrationError> {
        self.students
            .get(id)
            .ok_or_else(|| RegistrationError::StudentNotFound { id: id.clone() })
    }

    /// Every student, sorted by id.
    pub fn list_students(&self) -> Vec<&Student> {
        let mut students: Vec<&Student> = self.students.values().collect();
        students.sort_by(|a, b| a.id.cmp(&b.id));
        students
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// `true` if every course's counter matches the students that reference
    /// it, stays within capacity, and no student references an unknown course.
    pub fn is_consistent(&self) -> bool {
        let mut counts: HashMap<&CourseCode, u32> = HashMap::new();
        for student in self.students.values() {
            for code in student.registered_courses() {
                if !self.courses.contains_key(code) {
                    return false;
                }
                *counts.entry(code).or_default() += 1;
            }
        }
        self.courses.values().all(|course| {
            course.enrolled() <= course.capacity()
                && counts.get(&course.code).copied().unwrap_or(0) == course.enrolled()
        })
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
