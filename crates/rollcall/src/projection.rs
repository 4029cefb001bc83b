//! Derived views over the record list.
//!
//! Everything here is a pure function of the full record list plus the
//! current filter selections. Nothing is memoized: every call recomputes
//! from scratch, which is fine at the scale of a class register.

use serde::Serialize;

use crate::record::{AttendanceRecord, Month};

/// Month selection for the summary and table views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    /// Keep records of every month.
    #[default]
    All,
    /// Keep only records filed under this month.
    Month(Month),
}

impl MonthFilter {
    /// Whether the record passes this selection.
    #[must_use]
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        match self {
            Self::All => true,
            Self::Month(month) => record.month == *month,
        }
    }
}

impl From<Option<Month>> for MonthFilter {
    fn from(month: Option<Month>) -> Self {
        month.map_or(Self::All, Self::Month)
    }
}

impl std::fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Month(month) => month.fmt(f),
        }
    }
}

/// Student selection for the summary and table views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StudentFilter {
    /// Keep records of every student.
    #[default]
    All,
    /// Keep only records of this student (exact name match).
    Student(String),
}

impl StudentFilter {
    /// Parse a selection, where `"all"` (any case) selects every student.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Student(trimmed.to_string())
        }
    }

    /// Whether the record passes this selection.
    #[must_use]
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        match self {
            Self::All => true,
            Self::Student(name) => record.student_name == *name,
        }
    }
}

impl std::fmt::Display for StudentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Student(name) => f.write_str(name),
        }
    }
}

/// Keep records passing both selections.
///
/// The two filters are independent and conjunctive.
#[must_use]
pub fn filter(
    records: &[AttendanceRecord],
    month: &MonthFilter,
    student: &StudentFilter,
) -> Vec<AttendanceRecord> {
    records
        .iter()
        .filter(|r| month.matches(r) && student.matches(r))
        .cloned()
        .collect()
}

/// Grouped attendance counts for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentSummary {
    /// The student's name.
    pub name: String,
    /// Counts per month label, in first-seen order.
    pub months: Vec<MonthCount>,
}

/// Attendance count for one month label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// The month label.
    pub month: Month,
    /// Number of classes attended.
    pub count: usize,
}

/// Grouped attendance counts, student by student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Per-student groups, in first-seen order.
    pub students: Vec<StudentSummary>,
}

impl Summary {
    /// The count recorded for a given student and month, if any.
    #[must_use]
    pub fn count_for(&self, name: &str, month: Month) -> Option<usize> {
        self.students
            .iter()
            .find(|s| s.name == name)?
            .months
            .iter()
            .find(|m| m.month == month)
            .map(|m| m.count)
    }
}

/// Group records by student, then by month label, counting occurrences.
///
/// Outer and inner group order is first-seen order in the input, matching
/// the order records were filed. Returns `None` for an empty input: the
/// caller renders an explicit "no records" state, never an empty mapping.
#[must_use]
pub fn summarize(records: &[AttendanceRecord]) -> Option<Summary> {
    if records.is_empty() {
        return None;
    }

    let mut students: Vec<StudentSummary> = Vec::new();
    for record in records {
        let idx = match students.iter().position(|s| s.name == record.student_name) {
            Some(i) => i,
            None => {
                students.push(StudentSummary {
                    name: record.student_name.clone(),
                    months: Vec::new(),
                });
                students.len() - 1
            }
        };
        let student = &mut students[idx];

        match student.months.iter_mut().find(|m| m.month == record.month) {
            Some(entry) => entry.count += 1,
            None => student.months.push(MonthCount {
                month: record.month,
                count: 1,
            }),
        }
    }

    Some(Summary { students })
}

/// Order records for the table view: most recent class first.
///
/// The sort is stable, so records sharing a timestamp keep their relative
/// input order. Returns `None` for an empty input, like [`summarize`].
#[must_use]
pub fn sort_for_display(records: &[AttendanceRecord]) -> Option<Vec<AttendanceRecord>> {
    if records.is_empty() {
        return None;
    }

    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    Some(sorted)
}

/// Render an attendance count with the right plural.
#[must_use]
pub fn format_count(count: usize) -> String {
    if count == 1 {
        "1 class".to_string()
    } else {
        format!("{count} classes")
    }
}
