use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::{self, GradeType};
use serde_json::json;
use uuid::Uuid;

fn parse_uuid_param(params: &serde_json::Value, key: &str) -> Result<Option<Uuid>, String> {
    match params.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => {
            let Some(parsed) = v.as_str().and_then(|s| Uuid::parse_str(s).ok()) else {
                return Err(format!("params.{} must be a uuid string", key));
            };
            Ok(Some(parsed))
        }
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let student_id = match parse_uuid_param(&req.params, "studentId") {
        Ok(v) => v,
        Err(msg) => return err(&req.id, "bad_params", msg, None),
    };
    let subject = req.params.get("subject").and_then(|v| v.as_str());
    let period = req.params.get("period").and_then(|v| v.as_i64());

    let grades = store.grades_matching(student_id, subject, period);
    match serde_json::to_value(&grades) {
        Ok(v) => ok(&req.id, json!({ "grades": v })),
        Err(e) => err(&req.id, "encode_failed", e.to_string(), None),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let student_id = match parse_uuid_param(&req.params, "studentId") {
        Ok(Some(v)) => v,
        Ok(None) => return err(&req.id, "bad_params", "missing params.studentId", None),
        Err(msg) => return err(&req.id, "bad_params", msg, None),
    };
    let Some(subject) = req.params.get("subject").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.subject", None);
    };
    if !model::is_known_subject(subject) {
        return err(&req.id, "bad_params", "subject is not in the catalog", None);
    }
    let Some(period) = req.params.get("period").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing params.period", None);
    };
    if !(1..=6).contains(&period) {
        return err(&req.id, "bad_params", "period must be 1-6", None);
    }
    let Some(value) = req.params.get("value").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.value", None);
    };
    let Some(grade_type) = req
        .params
        .get("type")
        .and_then(|v| v.as_str())
        .and_then(GradeType::parse)
    else {
        return err(
            &req.id,
            "bad_params",
            "type must be Test, Quiz or Homework",
            None,
        );
    };

    // Blank values are a silent rejection, not an error.
    match store.add_grade(student_id, subject, period, value, grade_type) {
        Some(id) => ok(
            &req.id,
            json!({ "created": true, "gradeId": id.to_string() }),
        ),
        None => ok(&req.id, json!({ "created": false })),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let grade_id = match parse_uuid_param(&req.params, "gradeId") {
        Ok(Some(v)) => v,
        Ok(None) => return err(&req.id, "bad_params", "missing params.gradeId", None),
        Err(msg) => return err(&req.id, "bad_params", msg, None),
    };

    let removed = store.remove_grade(grade_id);
    ok(&req.id, json!({ "removed": removed }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.list" => Some(handle_list(state, req)),
        "grades.create" => Some(handle_create(state, req)),
        "grades.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
