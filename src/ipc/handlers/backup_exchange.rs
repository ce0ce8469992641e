use crate::backup;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let out_path = req
        .params
        .get("outPath")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
        .unwrap_or_else(backup::default_backup_path);

    match backup::write_backup(&store.snapshot(), &out_path) {
        Ok(summary) => ok(
            &req.id,
            json!({
                "path": summary.path.to_string_lossy(),
                "byteCount": summary.byte_count,
            }),
        ),
        Err(e) => err(&req.id, "backup_failed", format!("{e:?}"), None),
    }
}

fn handle_restore(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(in_path) = req
        .params
        .get("inPath")
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
    else {
        return err(&req.id, "bad_params", "missing params.inPath", None);
    };
    let Some(store) = state.store.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    // Decode fully before touching the store; a bad file leaves state as-is.
    let payload = match backup::read_backup(&in_path) {
        Ok(p) => p,
        Err(e) => return err(&req.id, "restore_failed", format!("{e:?}"), None),
    };

    let students = payload.students.len();
    let grades = payload.grades.len();
    store.restore(payload);
    ok(
        &req.id,
        json!({ "students": students, "grades": grades }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "backup.create" => Some(handle_create(state, req)),
        "backup.restore" => Some(handle_restore(state, req)),
        _ => None,
    }
}
