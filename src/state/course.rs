/// Course records
///
/// These structs represent the data model that flows between
/// the catalog parser, the query engine and the UI layer.
use serde_json::{Map, Value};
use std::fmt;

/// Instructor shown when a record names nobody
pub const DEFAULT_INSTRUCTOR: &str = "TBA";

/// Placeholder rendered for absent fields
pub const MISSING: &str = "N/A";

/// A scalar field value as it appeared in the catalog file
///
/// `level` and `credits` keep their original JSON type so filters can
/// compare `3` and `"3"` as equal.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl FieldValue {
    /// Convert a decoded JSON value; `null` is treated as absent.
    /// Arrays and objects are kept as their compact JSON text.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            other => Some(FieldValue::Text(other.to_string())),
        }
    }

    /// Loose equality against a selected option string
    ///
    /// Text compares exactly. Numbers and booleans compare numerically
    /// against the selection read as a number, so `3` matches `"3"` and
    /// `" 3 "`, and `true` matches `"1"`.
    pub fn loosely_equals(&self, selected: &str) -> bool {
        match self {
            FieldValue::Text(s) => s == selected,
            FieldValue::Number(n) => to_number(selected) == Some(*n),
            FieldValue::Bool(b) => to_number(selected) == Some(if *b { 1.0 } else { 0.0 }),
        }
    }

    /// Whether the value counts as "nothing" for defaulting purposes
    fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(n) => *n == 0.0 || n.is_nan(),
            FieldValue::Bool(b) => !b,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => f.write_str(&format_number(*n)),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Format a number the way it reads in the source file: integral values
/// lose their fractional part (`3.0` -> "3").
fn format_number(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

/// Read an option string as a number; blank strings are 0.
fn to_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // Rust's float parser also accepts "inf" and "nan", which are not numbers here
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    s.parse().ok()
}

/// Represents a single course offering in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    /// Course identifier (e.g., "CS101"); uniqueness is not enforced
    pub id: Option<String>,
    pub title: Option<String>,
    /// Course level code (e.g., "100" or 100)
    pub level: Option<FieldValue>,
    pub credits: Option<FieldValue>,
    /// Never empty: defaults to "TBA"
    pub instructor: String,
    /// "<Season> <Year>" label, e.g. "Fall 2023"
    pub semester: Option<String>,
    pub department: Option<String>,
    pub description: Option<String>,
}

impl CourseRecord {
    /// Build a record from one decoded JSON object.
    /// Unknown keys are ignored and missing keys become absent fields.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let field = |key: &str| object.get(key).and_then(FieldValue::from_json);
        let text = |key: &str| field(key).map(|value| value.to_string());

        let instructor = match field("instructor") {
            Some(value) if !value.is_blank() => value.to_string(),
            _ => DEFAULT_INSTRUCTOR.to_string(),
        };

        CourseRecord {
            id: text("id"),
            title: text("title"),
            level: field("level"),
            credits: field("credits"),
            instructor,
            semester: text("semester"),
            department: text("department"),
            description: text("description"),
        }
    }

    /// One-line summary used in the course list: "<id> - <title> (<level>)"
    pub fn summary(&self) -> String {
        format!(
            "{} - {} ({})",
            display(&self.id),
            display(&self.title),
            display(&self.level)
        )
    }

    /// Heading of the detail view
    pub fn heading(&self) -> String {
        display(&self.title)
    }

    /// Full field listing for the detail view, in display order.
    /// Every field is listed, absent ones as the placeholder.
    pub fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", display(&self.id)),
            ("Department", display(&self.department)),
            ("Level", display(&self.level)),
            ("Credits", display(&self.credits)),
            ("Instructor", self.instructor.clone()),
            ("Semester", display(&self.semester)),
            ("Description", display(&self.description)),
        ]
    }
}

/// Render an optional field, using the placeholder when absent
fn display<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => MISSING.to_string(),
    }
}
