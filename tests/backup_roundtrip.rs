use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use gradebookd::backup;
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

fn populated_store() -> GradeStore {
    let mut store = GradeStore::in_memory();
    let a = store.add_student("Hana", 2).expect("add student");
    let b = store.add_student("Iris", 7).expect("add student");
    store
        .add_grade(a, "Spelling", 1, "92", GradeType::Test)
        .expect("add grade");
    store
        .add_grade(a, "Spelling", 1, "88", GradeType::Homework)
        .expect("add grade");
    store
        .add_grade(b, "Typing", 4, "oops", GradeType::Quiz)
        .expect("add grade");
    store.set_weight(GradeType::Quiz, 20.0);
    store
}

#[test]
fn backup_restore_reproduces_identical_state() {
    let out_dir = temp_dir("gradebook-backup");
    let out_path = out_dir.join("GradeBookBackup.json");

    let store = populated_store();
    let original = store.snapshot();

    let summary = backup::write_backup(&original, &out_path).expect("write backup");
    assert_eq!(summary.path, out_path);
    assert!(summary.byte_count > 0);

    let decoded = backup::read_backup(&out_path).expect("read backup");
    let mut restored = GradeStore::in_memory();
    restored.restore(decoded);

    assert_eq!(restored.snapshot(), original);

    // Re-serialization is byte-for-byte identical.
    let first = serde_json::to_vec(&original).expect("encode original");
    let second = serde_json::to_vec(&restored.snapshot()).expect("encode restored");
    assert_eq!(first, second);

    let _ = std::fs::remove_dir_all(out_dir);
}

#[test]
fn backup_document_uses_the_flat_wire_format() {
    let store = populated_store();
    let doc = serde_json::to_value(store.snapshot()).expect("encode snapshot");

    assert!(doc.get("students").and_then(|v| v.as_array()).is_some());
    assert_eq!(doc.get("testWeight").and_then(|v| v.as_f64()), Some(50.0));
    assert_eq!(doc.get("quizWeight").and_then(|v| v.as_f64()), Some(20.0));
    assert_eq!(
        doc.get("homeworkWeight").and_then(|v| v.as_f64()),
        Some(33.0)
    );

    let grades = doc
        .get("grades")
        .and_then(|v| v.as_array())
        .expect("grades array");
    assert!(grades
        .iter()
        .any(|g| g.get("type").and_then(|v| v.as_str()) == Some("Quiz")));
    assert!(grades.iter().all(|g| g.get("studentId").is_some()));
}

#[test]
fn malformed_backup_bytes_leave_state_untouched() {
    let out_dir = temp_dir("gradebook-backup-bad");
    let bad_path = out_dir.join("broken.json");
    std::fs::write(&bad_path, b"{\"students\": [").expect("write broken file");

    let mut store = populated_store();
    let before = store.snapshot();

    let result = backup::read_backup(&bad_path);
    assert!(result.is_err());

    // Nothing decoded, so nothing is applied; the store still holds the
    // same state it had before the attempt.
    assert_eq!(store.snapshot(), before);

    // A wrong-shape but valid JSON document is rejected the same way.
    std::fs::write(&bad_path, b"{\"students\": 7}").expect("write wrong shape");
    assert!(backup::read_backup(&bad_path).is_err());
    assert_eq!(store.snapshot(), before);

    let _ = std::fs::remove_dir_all(out_dir);
}

#[test]
fn missing_backup_file_is_a_soft_failure() {
    let out_dir = temp_dir("gradebook-backup-missing");
    let missing = out_dir.join("nope.json");
    assert!(backup::read_backup(&missing).is_err());
    let _ = std::fs::remove_dir_all(out_dir);
}
