use crate::db;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::model;
use crate::store::GradeStore;
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    match db::open_kv(&path) {
        Ok(kv) => {
            let store = GradeStore::open(kv);
            let counts = json!({
                "students": store.students().len(),
                "grades": store.grades().len(),
            });
            state.workspace = Some(path.clone());
            state.store = Some(store);
            ok(
                &req.id,
                json!({
                    "workspacePath": path.to_string_lossy(),
                    "loaded": counts,
                }),
            )
        }
        Err(e) => err(&req.id, "db_open_failed", format!("{e:?}"), None),
    }
}

fn handle_subjects_list(req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "subjects": model::SUBJECTS }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        "subjects.list" => Some(handle_subjects_list(req)),
        _ => None,
    }
}
