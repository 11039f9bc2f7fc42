//! Domain types for the course registry.
//!
//! `Course` and `Student` are leaf records: they guard their own counters and
//! sets but know nothing about each other. Keeping the two sides in step is the
//! job of [`crate::registry::Registry`].

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed catalog code (e.g. `CS101`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseCode(pub String);

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for CourseCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CourseCode {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed, caller-supplied student identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for StudentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StudentId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Course
// ---------------------------------------------------------------------------

/// A catalog entry with a fixed seat capacity and a live enrollment counter.
///
/// `enrolled` is kept within `0..=capacity` by [`Course::enroll`] and
/// [`Course::unenroll`]; both are no-ops on the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    pub code: CourseCode,
    pub title: String,
    pub description: String,
    capacity: u32,
    enrolled: u32,
}

impl Course {
    pub fn new(
        code: impl Into<CourseCode>,
        title: impl Into<String>,
        description: impl Into<String>,
        capacity: u32,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            description: description.into(),
            capacity,
            enrolled: 0,
        }
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn enrolled(&self) -> u32 {
        self.enrolled
    }

    /// `true` while at least one seat is free.
    pub fn is_available(&self) -> bool {
        self.enrolled < self.capacity
    }

    pub fn is_full(&self) -> bool {
        !self.is_available()
    }

    pub fn seats_left(&self) -> u32 {
        self.capacity - self.enrolled
    }

    /// Take one seat. Returns `false` (and changes nothing) when full.
    pub fn enroll(&mut self) -> bool {
        if !self.is_available() {
            return false;
        }
        self.enrolled += 1;
        true
    }

    /// Give one seat back. Returns `false` (and changes nothing) when empty.
    pub fn unenroll(&mut self) -> bool {
        if self.enrolled == 0 {
            return false;
        }
        self.enrolled -= 1;
        true
    }
}

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

/// A registered student and the set of course codes they hold a seat in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    registered_courses: HashSet<CourseCode>,
    pub admitted_at: DateTime<Utc>,
}

impl Student {
    pub fn new(id: impl Into<StudentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            registered_courses: HashSet::new(),
            admitted_at: Utc::now(),
        }
    }

    pub fn registered_courses(&self) -> &HashSet<CourseCode> {
        &self.registered_courses
    }

    pub fn is_registered(&self, code: &CourseCode) -> bool {
        self.registered_courses.contains(code)
    }

    pub fn course_count(&self) -> usize {
        self.registered_courses.len()
    }

    /// Insert `code`; returns `false` if it was already present.
    pub fn add_course(&mut self, code: CourseCode) -> bool {
        self.registered_courses.insert(code)
    }

    /// Remove `code`; returns `false` if it was absent.
    pub fn remove_course(&mut self, code: &CourseCode) -> bool {
        self.registered_courses.remove(code)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
