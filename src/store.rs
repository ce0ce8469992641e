use uuid::Uuid;

use crate::calc;
use crate::db::Kv;
use crate::model::{BackupPayload, GradeEntry, GradeType, Student, WeightConfig};

/// Which collection a mutation touched. Observers receive one event per
/// affected collection, after the matching persistence write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Students,
    Weights,
    Grades,
}

type Observer = Box<dyn FnMut(Change)>;

/// Authoritative in-memory state. Owns all collections; grade entries point
/// at students by id only, so deleting a student is a plain retain plus a
/// cascade over the grade list. Every successful mutation commits the
/// affected slots to the backing store and then notifies observers.
pub struct GradeStore {
    students: Vec<Student>,
    grades: Vec<GradeEntry>,
    weights: WeightConfig,
    kv: Option<Kv>,
    observers: Vec<Observer>,
}

impl GradeStore {
    /// Fresh store with no persistence attached.
    pub fn in_memory() -> Self {
        Self {
            students: Vec::new(),
            grades: Vec::new(),
            weights: WeightConfig::default(),
            kv: None,
            observers: Vec::new(),
        }
    }

    /// Load state from the backing store. Missing or corrupt slots come back
    /// as empty collections / default weights, never as errors.
    pub fn open(kv: Kv) -> Self {
        let students = kv.load_students();
        let grades = kv.load_grades();
        let weights = kv.load_weights();
        Self {
            students,
            grades,
            weights,
            kv: Some(kv),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl FnMut(Change) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn kv(&self) -> Option<&Kv> {
        self.kv.as_ref()
    }

    // Read accessors.

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student(&self, id: Uuid) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn students_in_level(&self, grade_level: i64) -> Vec<Student> {
        self.students
            .iter()
            .filter(|s| s.grade_level == grade_level)
            .cloned()
            .collect()
    }

    pub fn grades(&self) -> &[GradeEntry] {
        &self.grades
    }

    pub fn grades_matching(
        &self,
        student_id: Option<Uuid>,
        subject: Option<&str>,
        period: Option<i64>,
    ) -> Vec<GradeEntry> {
        self.grades
            .iter()
            .filter(|g| student_id.map(|id| g.student_id == id).unwrap_or(true))
            .filter(|g| subject.map(|s| g.subject == s).unwrap_or(true))
            .filter(|g| period.map(|p| g.period == p).unwrap_or(true))
            .cloned()
            .collect()
    }

    pub fn weights(&self) -> &WeightConfig {
        &self.weights
    }

    /// Weighted average for one student's entries in a subject/period view.
    /// Undefined when the student is unknown or nothing parses.
    pub fn student_average(&self, student_id: Uuid, subject: &str, period: i64) -> Option<f64> {
        self.student(student_id)?;
        let entries = self.grades_matching(Some(student_id), Some(subject), Some(period));
        calc::weighted_average(&entries, &self.weights)
    }

    /// Class average across a grade level for one subject/period view.
    pub fn class_average(&self, grade_level: i64, subject: &str, period: i64) -> Option<f64> {
        let roster = self.students_in_level(grade_level);
        calc::class_average(&roster, |s| self.student_average(s.id, subject, period))
    }

    // Mutations.

    /// Blank names (after trimming) are silently ignored.
    pub fn add_student(&mut self, name: &str, grade_level: i64) -> Option<Uuid> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }
        let id = Uuid::new_v4();
        self.students.push(Student {
            id,
            name: trimmed.to_string(),
            grade_level,
        });
        self.commit(Change::Students);
        Some(id)
    }

    /// Removes the named students and every grade entry referencing them.
    /// Returns (students removed, grades removed).
    pub fn remove_students(&mut self, ids: &[Uuid]) -> (usize, usize) {
        let before_students = self.students.len();
        let before_grades = self.grades.len();
        self.students.retain(|s| !ids.contains(&s.id));
        self.grades.retain(|g| !ids.contains(&g.student_id));
        let removed = (
            before_students - self.students.len(),
            before_grades - self.grades.len(),
        );
        self.commit(Change::Students);
        self.commit(Change::Grades);
        removed
    }

    /// Blank values never enter the collection; everything else is appended
    /// as supplied, including values that will not parse as numbers.
    pub fn add_grade(
        &mut self,
        student_id: Uuid,
        subject: &str,
        period: i64,
        value: &str,
        grade_type: GradeType,
    ) -> Option<Uuid> {
        if value.trim().is_empty() {
            return None;
        }
        let id = Uuid::new_v4();
        self.grades.push(GradeEntry {
            id,
            student_id,
            subject: subject.to_string(),
            period,
            value: value.to_string(),
            grade_type,
        });
        self.commit(Change::Grades);
        Some(id)
    }

    pub fn remove_grade(&mut self, id: Uuid) -> bool {
        let before = self.grades.len();
        self.grades.retain(|g| g.id != id);
        if self.grades.len() == before {
            return false;
        }
        self.commit(Change::Grades);
        true
    }

    /// Values clamp to [0,100]; the three weights stay independent and no
    /// sum-to-100 rule is enforced.
    pub fn set_weight(&mut self, grade_type: GradeType, value: f64) {
        self.weights.set_weight(grade_type, value);
        self.commit(Change::Weights);
    }

    // Backup exchange.

    pub fn snapshot(&self) -> BackupPayload {
        BackupPayload {
            students: self.students.clone(),
            test_weight: self.weights.test,
            quiz_weight: self.weights.quiz,
            homework_weight: self.weights.homework,
            grades: self.grades.clone(),
        }
    }

    /// Replaces all collections with the snapshot's values in one step, then
    /// runs the standard per-collection commits. Callers keep prior state by
    /// simply not calling this when decoding fails.
    pub fn restore(&mut self, payload: BackupPayload) {
        self.weights = payload.weights();
        self.students = payload.students;
        self.grades = payload.grades;
        self.commit(Change::Students);
        self.commit(Change::Weights);
        self.commit(Change::Grades);
    }

    /// Persist the affected slot, then notify. A failed write keeps the
    /// in-memory state authoritative and leaves a diagnostic on stderr.
    fn commit(&mut self, change: Change) {
        if let Some(kv) = &self.kv {
            let result = match change {
                Change::Students => kv.save_students(&self.students),
                Change::Weights => kv.save_weights(&self.weights),
                Change::Grades => kv.save_grades(&self.grades),
            };
            if let Err(e) = result {
                eprintln!("gradebookd: persist {:?} failed: {e:?}", change);
            }
        }
        for observer in &mut self.observers {
            observer(change);
        }
    }
}
