//! Registry operation, invariant, and state-machine integration tests.

use registrar_core::{Catalog, CatalogEntry, CourseCode, RegistrationError, Registry, StudentId};
use rstest::rstest;

fn sid(s: &str) -> StudentId {
    StudentId::from(s)
}
fn code(s: &str) -> CourseCode {
    CourseCode::from(s)
}

fn single_course(capacity: u32) -> Registry {
    let catalog = Catalog {
        courses: vec![CatalogEntry {
            code: code("SEM1"),
            title: "Seminar".to_string(),
            description: "One room, few chairs.".to_string(),
            capacity,
        }],
    };
    Registry::from_catalog(&catalog).expect("catalog")
}

fn enrolled(reg: &Registry, c: &str) -> u32 {
    reg.course(&code(c)).expect("course").enrolled()
}

// ---------------------------------------------------------------------------
// 1. Scenarios
// ---------------------------------------------------------------------------

#[test]
fn register_then_list_student_courses() {
    let mut reg = Registry::new();
    reg.add_student("S1", "Ada").expect("add");
    reg.register_student(&sid("S1"), &code("CS101")).expect("register");

    let courses = reg.get_student_courses(&sid("S1")).expect("courses");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].code, code("CS101"));
    assert_eq!(courses[0].enrolled(), 1);
    assert!(reg.is_consistent());
}

#[test]
fn unknown_student_leaves_catalog_unchanged() {
    let mut reg = Registry::new();
    let before = reg.clone();
    let err = reg.register_student(&sid("S9"), &code("CS101")).unwrap_err();
    assert_eq!(err, RegistrationError::StudentNotFound { id: sid("S9") });
    assert_eq!(reg, before);
}

#[test]
fn duplicate_registration_does_not_double_count() {
    let mut reg = Registry::new();
    reg.add_student("S1", "Ada").expect("add");
    reg.register_student(&sid("S1"), &code("CS101")).expect("first");

    let err = reg.register_student(&sid("S1"), &code("CS101")).unwrap_err();
    assert_eq!(
        err,
        RegistrationError::AlreadyRegistered { id: sid("S1"), code: code("CS101") }
    );
    assert_eq!(enrolled(&reg, "CS101"), 1);
    assert!(reg.is_consistent());
}

#[test]
fn unknown_course_is_reported_for_known_student() {
    let mut reg = Registry::new();
    reg.add_student("S1", "Ada").expect("add");
    let err = reg.register_student(&sid("S1"), &code("PHYS999")).unwrap_err();
    assert_eq!(err, RegistrationError::CourseNotFound { code: code("PHYS999") });
    let err = reg.drop_course(&sid("S1"), &code("PHYS999")).unwrap_err();
    assert_eq!(err, RegistrationError::CourseNotFound { code: code("PHYS999") });
}

#[test]
fn get_student_courses_for_unknown_student_fails() {
    let reg = Registry::new();
    let err = reg.get_student_courses(&sid("ghost")).unwrap_err();
    assert!(matches!(err, RegistrationError::StudentNotFound { .. }), "got: {err}");
}

// ---------------------------------------------------------------------------
// 2. Capacity boundary
// ---------------------------------------------------------------------------

#[test]
fn last_seat_goes_to_first_caller() {
    let mut reg = single_course(1);
    reg.add_student("S1", "Ada").expect("add");
    reg.add_student("S2", "Grace").expect("add");

    reg.register_student(&sid("S1"), &code("SEM1")).expect("first seat");
    let err = reg.register_student(&sid("S2"), &code("SEM1")).unwrap_err();
    assert_eq!(err, RegistrationError::CourseFull { code: code("SEM1"), capacity: 1 });
    assert_eq!(enrolled(&reg, "SEM1"), 1);
    assert!(reg.get_student_courses(&sid("S2")).expect("courses").is_empty());
}

#[test]
fn dropped_seat_can_be_taken_again() {
    let mut reg = single_course(1);
    reg.add_student("S1", "Ada").expect("add");
    reg.add_student("S2", "Grace").expect("add");

    reg.register_student(&sid("S1"), &code("SEM1")).expect("register");
    reg.drop_course(&sid("S1"), &code("SEM1")).expect("drop");
    reg.register_student(&sid("S2"), &code("SEM1")).expect("freed seat");
    assert_eq!(enrolled(&reg, "SEM1"), 1);
    assert!(reg.is_consistent());
}

#[test]
fn zero_capacity_course_is_always_full() {
    let mut reg = single_course(0);
    reg.add_student("S1", "Ada").expect("add");
    let err = reg.register_student(&sid("S1"), &code("SEM1")).unwrap_err();
    assert!(matches!(err, RegistrationError::CourseFull { capacity: 0, .. }));
}

#[test]
fn seed_course_fills_at_its_capacity() {
    let mut reg = Registry::new();
    for i in 0..20 {
        let id = format!("S{i}");
        reg.add_student(id.as_str(), "Student").expect("add");
        reg.register_student(&sid(&id), &code("BIO301")).expect("register");
    }
    reg.add_student("late", "Late").expect("add");
    let err = reg.register_student(&sid("late"), &code("BIO301")).unwrap_err();
    assert!(matches!(err, RegistrationError::CourseFull { capacity: 20, .. }));
    assert_eq!(enrolled(&reg, "BIO301"), 20);
    assert!(reg.is_consistent());
}

// ---------------------------------------------------------------------------
// 3. Drop idempotence and round trip
// ---------------------------------------------------------------------------

#[test]
fn second_drop_fails_and_changes_nothing() {
    let mut reg = Registry::new();
    reg.add_student("S1", "Ada").expect("add");
    reg.register_student(&sid("S1"), &code("MATH201")).expect("register");

    reg.drop_course(&sid("S1"), &code("MATH201")).expect("first drop");
    let after_first = reg.clone();

    let err = reg.drop_course(&sid("S1"), &code("MATH201")).unwrap_err();
    assert_eq!(
        err,
        RegistrationError::NotRegistered { id: sid("S1"), code: code("MATH201") }
    );
    assert_eq!(reg, after_first);
}

#[rstest]
#[case("CS101")]
#[case("MATH201")]
#[case("BIO301")]
fn register_then_drop_restores_state(#[case] course: &str) {
    let mut reg = Registry::new();
    reg.add_student("S1", "Ada").expect("add");
    reg.add_student("S2", "Grace").expect("add");
    reg.register_student(&sid("S2"), &code(course)).expect("background seat");
    let before = reg.clone();

    reg.register_student(&sid("S1"), &code(course)).expect("register");
    reg.drop_course(&sid("S1"), &code(course)).expect("drop");

    assert_eq!(reg, before, "[{course}] state must be restored");
}

#[test]
fn drop_without_registration_is_rejected() {
    let mut reg = Registry::new();
    reg.add_student("S1", "Ada").expect("add");
    let err = reg.drop_course(&sid("S1"), &code("CS101")).unwrap_err();
    assert!(matches!(err, RegistrationError::NotRegistered { .. }));
    assert_eq!(enrolled(&reg, "CS101"), 0);
}

// ---------------------------------------------------------------------------
// 4. Invariant under a mixed workload
// ---------------------------------------------------------------------------

#[test]
fn counters_mirror_course_sets_after_every_step() {
    let mut reg = single_course(3);
    let ids = ["a", "b", "c", "d", "e"];
    for id in ids {
        reg.add_student(id, id.to_uppercase()).expect("add");
    }

    // Deterministic mix of registrations and drops, including rejected ones.
    for step in 0..60usize {
        let id = sid(ids[(step * 7 + 3) % ids.len()]);
        let _ = if step % 3 == 0 {
            reg.drop_course(&id, &code("SEM1"))
        } else {
            reg.register_student(&id, &code("SEM1"))
        };
        assert!(reg.is_consistent(), "invariant broken at step {step}");
        let course = reg.course(&code("SEM1")).expect("course");
        assert!(course.enrolled() <= course.capacity());
    }
}

#[rstest]
#[case::duplicate_student(|r: &mut Registry| r.add_student("S1", "Again").map(|_| ()))]
#[case::missing_student(|r: &mut Registry| r.register_student(&sid("S9"), &code("CS101")))]
#[case::missing_course(|r: &mut Registry| r.register_student(&sid("S1"), &code("NOPE")))]
#[case::already_registered(|r: &mut Registry| r.register_student(&sid("S1"), &code("CS101")))]
#[case::not_registered(|r: &mut Registry| r.drop_course(&sid("S1"), &code("BIO301")))]
fn rejected_operations_leave_registry_untouched(
    #[case] op: fn(&mut Registry) -> Result<(), RegistrationError>,
) {
    let mut reg = Registry::new();
    reg.add_student("S1", "Ada").expect("add");
    reg.register_student(&sid("S1"), &code("CS101")).expect("register");
    let before = reg.clone();

    assert!(op(&mut reg).is_err());
    assert_eq!(reg, before);
}
