use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::model::{GradeEntry, Student, WeightConfig};

pub const KEY_STUDENTS: &str = "students";
pub const KEY_WEIGHTS: &str = "weights";
pub const KEY_GRADES: &str = "grades";

/// Simple key-value backing store. Each slot holds one serialized JSON
/// document; decode failures on load are treated as "no data".
pub struct Kv {
    conn: Connection,
}

pub fn open_kv(workspace: &Path) -> anyhow::Result<Kv> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join("gradebook.sqlite3");
    let conn = Connection::open(db_path)?;
    Kv::init(conn)
}

pub fn open_kv_in_memory() -> anyhow::Result<Kv> {
    Kv::init(Connection::open_in_memory()?)
}

impl Kv {
    fn init(conn: Connection) -> anyhow::Result<Kv> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv(
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Kv { conn })
    }

    pub fn get_raw(&self, key: &str) -> anyhow::Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?", [key], |r| r.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn set_raw(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;
        Ok(())
    }

    /// Absent or undecodable slot yields an empty roster.
    pub fn load_students(&self) -> Vec<Student> {
        self.load_json(KEY_STUDENTS).unwrap_or_default()
    }

    /// Absent or undecodable slot yields an empty grade list.
    pub fn load_grades(&self) -> Vec<GradeEntry> {
        self.load_json(KEY_GRADES).unwrap_or_default()
    }

    /// Weights persist as the fixed-order array [test, quiz, homework].
    /// Anything other than a 3-element numeric array falls back to defaults.
    pub fn load_weights(&self) -> WeightConfig {
        self.load_json::<Vec<f64>>(KEY_WEIGHTS)
            .and_then(|slots| WeightConfig::from_slots(&slots))
            .unwrap_or_default()
    }

    pub fn save_students(&self, students: &[Student]) -> anyhow::Result<()> {
        self.set_raw(KEY_STUDENTS, &serde_json::to_string(students)?)
    }

    pub fn save_grades(&self, grades: &[GradeEntry]) -> anyhow::Result<()> {
        self.set_raw(KEY_GRADES, &serde_json::to_string(grades)?)
    }

    pub fn save_weights(&self, weights: &WeightConfig) -> anyhow::Result<()> {
        self.set_raw(KEY_WEIGHTS, &serde_json::to_string(&weights.to_slots())?)
    }

    fn load_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }
}
