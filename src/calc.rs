use crate::model::{GradeEntry, GradeType, Student, WeightConfig};

/// Sentinel shown when a value has no numeric reading.
pub const NO_GRADE: &str = "\u{2014}";

/// Parse a stored grade value. Values are free text; anything that is not a
/// plain number is excluded from aggregation rather than counted as zero.
pub fn parse_score(value: &str) -> Option<f64> {
    value.parse::<f64>().ok()
}

/// Letter band for a score, checked highest band first. Ranges are inclusive
/// at both ends; a value falling between bands (e.g. 99.5) drops to F, as
/// does anything negative or above 100.
pub fn letter_grade(value: &str) -> &'static str {
    let Some(v) = parse_score(value) else {
        return NO_GRADE;
    };
    match v {
        v if v == 100.0 => "A+",
        v if (96.0..=99.0).contains(&v) => "A",
        v if (94.0..=95.0).contains(&v) => "A\u{2212}",
        v if (92.0..=93.0).contains(&v) => "B+",
        v if (88.0..=91.0).contains(&v) => "B",
        v if (86.0..=87.0).contains(&v) => "B\u{2212}",
        v if (84.0..=85.0).contains(&v) => "C+",
        v if (79.0..=83.0).contains(&v) => "C",
        v if (76.0..=78.0).contains(&v) => "C\u{2212}",
        v if (70.0..=75.0).contains(&v) => "D",
        v if (63.0..=69.0).contains(&v) => "E",
        _ => "F",
    }
}

/// Weighted percentage average over a set of entries.
///
/// Entries are grouped by type; each type with at least one parsable value
/// contributes its arithmetic mean. Weights are renormalized over the
/// contributing types only, so a student with nothing but homework marks
/// gets 100% of the average from homework, not a third of it. Returns None
/// when no type contributes or the contributing weights sum to zero.
pub fn weighted_average(entries: &[GradeEntry], weights: &WeightConfig) -> Option<f64> {
    let mut type_means: Vec<(GradeType, f64)> = Vec::new();
    for grade_type in GradeType::ALL {
        let scores: Vec<f64> = entries
            .iter()
            .filter(|e| e.grade_type == grade_type)
            .filter_map(|e| parse_score(&e.value))
            .collect();
        if !scores.is_empty() {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            type_means.push((grade_type, mean));
        }
    }

    let used_weight: f64 = type_means
        .iter()
        .map(|(t, _)| weights.weight_for(*t))
        .sum();
    if used_weight <= 0.0 {
        return None;
    }

    let total = type_means
        .iter()
        .map(|(t, mean)| mean * (weights.weight_for(*t) / used_weight))
        .sum();
    Some(total)
}

/// Mean of the defined per-student averages. None for an empty roster or
/// when no student has a defined average.
pub fn class_average<F>(students: &[Student], per_student: F) -> Option<f64>
where
    F: Fn(&Student) -> Option<f64>,
{
    if students.is_empty() {
        return None;
    }
    let averages: Vec<f64> = students.iter().filter_map(|s| per_student(s)).collect();
    if averages.is_empty() {
        return None;
    }
    Some(averages.iter().sum::<f64>() / averages.len() as f64)
}
