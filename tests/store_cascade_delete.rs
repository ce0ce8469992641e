use std::cell::RefCell;
use std::rc::Rc;

use gradebookd::model::GradeType;
use gradebookd::store::{Change, GradeStore};
use uuid::Uuid;

#[test]
fn removing_students_cascades_to_their_grades() {
    let mut store = GradeStore::in_memory();
    let kept = store.add_student("Anna", 3).expect("add student");
    let removed = store.add_student("Ben", 3).expect("add student");

    store
        .add_grade(kept, "Math", 1, "90", GradeType::Test)
        .expect("add grade");
    store
        .add_grade(removed, "Math", 1, "70", GradeType::Test)
        .expect("add grade");
    store
        .add_grade(removed, "Reading", 2, "80", GradeType::Homework)
        .expect("add grade");

    let (students_gone, grades_gone) = store.remove_students(&[removed]);
    assert_eq!(students_gone, 1);
    assert_eq!(grades_gone, 2);

    assert_eq!(store.students().len(), 1);
    assert!(store.grades().iter().all(|g| g.student_id == kept));
}

#[test]
fn blank_name_and_blank_value_are_silent_no_ops() {
    let mut store = GradeStore::in_memory();
    assert_eq!(store.add_student("   ", 2), None);
    assert!(store.students().is_empty());

    let student = store.add_student("Cleo", 2).expect("add student");
    assert_eq!(store.add_grade(student, "Art", 1, "", GradeType::Quiz), None);
    assert_eq!(
        store.add_grade(student, "Art", 1, "   ", GradeType::Quiz),
        None
    );
    assert!(store.grades().is_empty());
}

#[test]
fn removing_a_missing_grade_is_a_no_op() {
    let mut store = GradeStore::in_memory();
    let student = store.add_student("Dana", 1).expect("add student");
    store
        .add_grade(student, "Math", 1, "88", GradeType::Test)
        .expect("add grade");

    assert!(!store.remove_grade(Uuid::new_v4()));
    assert_eq!(store.grades().len(), 1);
}

#[test]
fn mutations_notify_the_affected_collection() {
    let events: Rc<RefCell<Vec<Change>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);

    let mut store = GradeStore::in_memory();
    store.subscribe(move |change| sink.borrow_mut().push(change));

    let student = store.add_student("Elio", 4).expect("add student");
    store
        .add_grade(student, "Science", 3, "91", GradeType::Quiz)
        .expect("add grade");
    store.set_weight(GradeType::Quiz, 25.0);
    store.remove_students(&[student]);

    assert_eq!(
        events.borrow().as_slice(),
        &[
            Change::Students,
            Change::Grades,
            Change::Weights,
            Change::Students,
            Change::Grades,
        ]
    );
}

#[test]
fn orphaned_grades_are_excluded_from_aggregates() {
    let mut store = GradeStore::in_memory();
    let student = store.add_student("Fay", 5).expect("add student");
    store
        .add_grade(student, "Math", 1, "95", GradeType::Test)
        .expect("add grade");

    // An entry pointing at a student that was never added stays in the list
    // but never feeds an average.
    let ghost = Uuid::new_v4();
    store
        .add_grade(ghost, "Math", 1, "10", GradeType::Test)
        .expect("add grade");

    assert_eq!(store.student_average(ghost, "Math", 1), None);
    let class_avg = store.class_average(5, "Math", 1).expect("class average");
    assert!((class_avg - 95.0).abs() < 1e-9);
}
