use anyhow::Context;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::model::BackupPayload;

pub const DEFAULT_BACKUP_FILENAME: &str = "GradeBookBackup.json";

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub byte_count: usize,
}

/// Where a backup lands when the caller names no destination.
pub fn default_backup_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_BACKUP_FILENAME)
}

/// Serialize a snapshot and write it as one JSON document. Encode or write
/// failure yields an error for the caller to report; nothing partial is kept
/// as the document is written in a single call.
pub fn write_backup(payload: &BackupPayload, out_path: &Path) -> anyhow::Result<ExportSummary> {
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }
    let bytes = serde_json::to_vec(payload).context("failed to serialize backup payload")?;
    std::fs::write(out_path, &bytes).with_context(|| {
        format!(
            "failed to write backup file {}",
            out_path.to_string_lossy()
        )
    })?;
    Ok(ExportSummary {
        path: out_path.to_path_buf(),
        byte_count: bytes.len(),
    })
}

/// Read and decode a backup file. The file handle is scoped to this call and
/// released on success and failure alike; a decode failure never disturbs
/// any store state because nothing is applied here.
pub fn read_backup(in_path: &Path) -> anyhow::Result<BackupPayload> {
    let mut file = File::open(in_path)
        .with_context(|| format!("failed to open backup file {}", in_path.to_string_lossy()))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .context("failed to read backup file")?;
    decode_backup(&bytes)
}

pub fn decode_backup(bytes: &[u8]) -> anyhow::Result<BackupPayload> {
    serde_json::from_slice(bytes).context("backup file is not a valid snapshot")
}
