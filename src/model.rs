use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed subject catalog, alphabetical. Not user-extensible.
pub const SUBJECTS: [&str; 20] = [
    "Algebra",
    "Art",
    "Bible",
    "English",
    "Health",
    "History",
    "Literature",
    "Math",
    "Memory",
    "Music",
    "Penmanship",
    "Phonics",
    "Reading",
    "Recordkeeping",
    "Science",
    "Social Studies",
    "Spanish",
    "Spelling",
    "Typing",
    "Writing",
];

pub fn is_known_subject(name: &str) -> bool {
    SUBJECTS.iter().any(|s| *s == name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub grade_level: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeType {
    Test,
    Quiz,
    Homework,
}

impl GradeType {
    pub const ALL: [GradeType; 3] = [GradeType::Test, GradeType::Quiz, GradeType::Homework];

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeType::Test => "Test",
            GradeType::Quiz => "Quiz",
            GradeType::Homework => "Homework",
        }
    }

    pub fn parse(s: &str) -> Option<GradeType> {
        match s {
            "Test" => Some(GradeType::Test),
            "Quiz" => Some(GradeType::Quiz),
            "Homework" => Some(GradeType::Homework),
            _ => None,
        }
    }
}

/// A single recorded mark. `value` stays as entered text; scores are parsed
/// lazily so partial or non-numeric input is carried, not rejected.
/// `student_id` is a non-owning reference resolved at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject: String,
    pub period: i64,
    pub value: String,
    #[serde(rename = "type")]
    pub grade_type: GradeType,
}

/// Per-type weights in [0,100]. Deliberately no invariant that the three
/// sum to 100; the host surfaces the total but does not block odd splits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightConfig {
    pub test: f64,
    pub quiz: f64,
    pub homework: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            test: 50.0,
            quiz: 17.0,
            homework: 33.0,
        }
    }
}

impl WeightConfig {
    pub fn weight_for(&self, grade_type: GradeType) -> f64 {
        match grade_type {
            GradeType::Test => self.test,
            GradeType::Quiz => self.quiz,
            GradeType::Homework => self.homework,
        }
    }

    pub fn set_weight(&mut self, grade_type: GradeType, value: f64) {
        let clamped = value.clamp(0.0, 100.0);
        match grade_type {
            GradeType::Test => self.test = clamped,
            GradeType::Quiz => self.quiz = clamped,
            GradeType::Homework => self.homework = clamped,
        }
    }

    pub fn total(&self) -> f64 {
        self.test + self.quiz + self.homework
    }

    /// Fixed-order persistence form: [test, quiz, homework].
    pub fn to_slots(&self) -> [f64; 3] {
        [self.test, self.quiz, self.homework]
    }

    pub fn from_slots(slots: &[f64]) -> Option<Self> {
        if slots.len() != 3 {
            return None;
        }
        Some(Self {
            test: slots[0],
            quiz: slots[1],
            homework: slots[2],
        })
    }
}

/// The full exportable state, flat exactly as it lands in the backup file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupPayload {
    pub students: Vec<Student>,
    pub test_weight: f64,
    pub quiz_weight: f64,
    pub homework_weight: f64,
    pub grades: Vec<GradeEntry>,
}

impl BackupPayload {
    pub fn weights(&self) -> WeightConfig {
        WeightConfig {
            test: self.test_weight,
            quiz: self.quiz_weight,
            homework: self.homework_weight,
        }
    }
}
