use crate::calc;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use uuid::Uuid;

fn letter_for(average: Option<f64>) -> &'static str {
    match average {
        Some(avg) => calc::letter_grade(&avg.to_string()),
        None => calc::NO_GRADE,
    }
}

fn handle_letter_grade(req: &Request) -> serde_json::Value {
    let Some(value) = req.params.get("value").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.value", None);
    };
    ok(&req.id, json!({ "letter": calc::letter_grade(value) }))
}

fn handle_student_average(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(student_id) = req
        .params
        .get("studentId")
        .and_then(|v| v.as_str())
        .and_then(|s| Uuid::parse_str(s).ok())
    else {
        return err(&req.id, "bad_params", "missing params.studentId", None);
    };
    let Some(subject) = req.params.get("subject").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.subject", None);
    };
    let Some(period) = req.params.get("period").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing params.period", None);
    };

    let average = store.student_average(student_id, subject, period);
    ok(
        &req.id,
        json!({ "average": average, "letter": letter_for(average) }),
    )
}

fn handle_class_average(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(grade_level) = req.params.get("gradeLevel").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing params.gradeLevel", None);
    };
    let Some(subject) = req.params.get("subject").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing params.subject", None);
    };
    let Some(period) = req.params.get("period").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing params.period", None);
    };

    let average = store.class_average(grade_level, subject, period);
    ok(
        &req.id,
        json!({ "average": average, "letter": letter_for(average) }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "calc.letterGrade" => Some(handle_letter_grade(req)),
        "calc.studentAverage" => Some(handle_student_average(state, req)),
        "calc.classAverage" => Some(handle_class_average(state, req)),
        _ => None,
    }
}
