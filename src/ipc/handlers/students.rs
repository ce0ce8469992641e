use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use uuid::Uuid;

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let students = match req.params.get("gradeLevel").and_then(|v| v.as_i64()) {
        Some(level) => store.students_in_level(level),
        None => store.students().to_vec(),
    };
    match serde_json::to_value(&students) {
        Ok(v) => ok(&req.id, json!({ "students": v })),
        Err(e) => err(&req.id, "encode_failed", e.to_string(), None),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(name) = req.params.get("name").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.name", None);
    };
    let Some(grade_level) = req.params.get("gradeLevel").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing params.gradeLevel", None);
    };
    if !(1..=10).contains(&grade_level) {
        return err(&req.id, "bad_params", "gradeLevel must be 1-10", None);
    }

    // Blank names are a silent rejection, not an error.
    match store.add_student(name, grade_level) {
        Some(id) => ok(
            &req.id,
            json!({ "created": true, "studentId": id.to_string() }),
        ),
        None => ok(&req.id, json!({ "created": false })),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(raw_ids) = req.params.get("studentIds").and_then(|v| v.as_array()) else {
        return err(&req.id, "bad_params", "missing params.studentIds", None);
    };
    let mut ids: Vec<Uuid> = Vec::with_capacity(raw_ids.len());
    for raw in raw_ids {
        let Some(parsed) = raw.as_str().and_then(|s| Uuid::parse_str(s).ok()) else {
            return err(&req.id, "bad_params", "studentIds must be uuid strings", None);
        };
        ids.push(parsed);
    }

    let (removed_students, removed_grades) = store.remove_students(&ids);
    ok(
        &req.id,
        json!({
            "removedStudents": removed_students,
            "removedGrades": removed_grades,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_list(state, req)),
        "students.create" => Some(handle_create(state, req)),
        "students.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
