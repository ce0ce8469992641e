use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use gradebookd::db::{self, KEY_GRADES, KEY_STUDENTS, KEY_WEIGHTS};
use gradebookd::model::GradeType;
use gradebookd::store::GradeStore;

fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

#[test]
fn reopening_a_workspace_restores_persisted_state() {
    let workspace = temp_dir("gradebook-persist");

    let student_id;
    {
        let kv = db::open_kv(&workspace).expect("open kv");
        let mut store = GradeStore::open(kv);
        student_id = store.add_student("Gwen", 6).expect("add student");
        store
            .add_grade(student_id, "History", 2, "84", GradeType::Test)
            .expect("add grade");
        store.set_weight(GradeType::Homework, 40.0);
    }

    let kv = db::open_kv(&workspace).expect("reopen kv");
    let store = GradeStore::open(kv);
    assert_eq!(store.students().len(), 1);
    assert_eq!(store.students()[0].id, student_id);
    assert_eq!(store.students()[0].name, "Gwen");
    assert_eq!(store.grades().len(), 1);
    assert_eq!(store.grades()[0].value, "84");
    assert_eq!(store.weights().homework, 40.0);
    assert_eq!(store.weights().test, 50.0);

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn weights_persist_as_fixed_order_array() {
    let kv = db::open_kv_in_memory().expect("open kv");
    let mut store = GradeStore::open(kv);
    store.set_weight(GradeType::Test, 40.0);

    let raw = store
        .kv()
        .expect("kv attached")
        .get_raw(KEY_WEIGHTS)
        .expect("read weights slot")
        .expect("weights slot present");
    let slots: Vec<f64> = serde_json::from_str(&raw).expect("weights array");
    assert_eq!(slots, vec![40.0, 17.0, 33.0]);
}

#[test]
fn weight_values_clamp_to_percent_range() {
    let mut store = GradeStore::in_memory();
    store.set_weight(GradeType::Quiz, 150.0);
    assert_eq!(store.weights().quiz, 100.0);
    store.set_weight(GradeType::Quiz, -3.0);
    assert_eq!(store.weights().quiz, 0.0);
}

#[test]
fn corrupt_slots_fall_back_to_defaults() {
    let kv = db::open_kv_in_memory().expect("open kv");
    kv.set_raw(KEY_STUDENTS, "{not json").expect("write garbage");
    kv.set_raw(KEY_GRADES, "[{\"id\":42}]").expect("write garbage");
    kv.set_raw(KEY_WEIGHTS, "[1,2]").expect("write short array");

    let store = GradeStore::open(kv);
    assert!(store.students().is_empty());
    assert!(store.grades().is_empty());
    assert_eq!(store.weights().test, 50.0);
    assert_eq!(store.weights().quiz, 17.0);
    assert_eq!(store.weights().homework, 33.0);
}
