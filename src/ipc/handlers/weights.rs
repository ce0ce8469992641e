use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::GradeType;
use serde_json::json;

fn weights_json(state: &AppState) -> Option<serde_json::Value> {
    let weights = state.store.as_ref()?.weights();
    Some(json!({
        "test": weights.test,
        "quiz": weights.quiz,
        "homework": weights.homework,
        "total": weights.total(),
    }))
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(weights) = weights_json(state) else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    ok(&req.id, json!({ "weights": weights }))
}

fn handle_set(state: &mut AppState, req: &Request) -> serde_json::Value {
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
    let Some(value) = req.params.get("value").and_then(|v| v.as_f64()) else {
        return err(&req.id, "bad_params", "missing params.value", None);
    };
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    // Out-of-range values clamp rather than fail.
    store.set_weight(grade_type, value);
    let weights = weights_json(state).unwrap_or(serde_json::Value::Null);
    ok(&req.id, json!({ "weights": weights }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "weights.get" => Some(handle_get(state, req)),
        "weights.set" => Some(handle_set(state, req)),
        _ => None,
    }
}
