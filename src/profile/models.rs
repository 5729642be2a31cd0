// src/profile/models.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// End marker used when a date range has no explicit end.
pub const PRESENT: &str = "Present";

/// Start/end pair of free-form month-year tokens (e.g. "Jan 2020").
/// Not parsed into calendar types: exported profiles are too inconsistent for that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start: String,
    #[serde(default = "present")]
    pub end: String,
}

fn present() -> String {
    PRESENT.to_string()
}

impl Default for DateRange {
    fn default() -> Self {
        Self { start: String::new(), end: present() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub location: String,
    pub linkedin_url: String,
}

impl Contact {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.location.is_empty()
            && self.linkedin_url.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub title: String,
    pub location: String,
    pub dates: DateRange,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub dates: DateRange,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub expires: String,
}

/// Structured output of one parse.
///
/// Every key is optional on the way in, since stored profiles are written
/// with empty sections removed (see [`ProfileRecord::to_pruned_json`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    pub contact: Contact,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<String>,
    pub other: String,
}

impl ProfileRecord {
    /// Serializes the record and drops every top-level key whose value is empty.
    ///
    /// A key that survives always carries data: a non-empty string, a non-empty
    /// list, or a contact with at least one non-empty sub-field. Nested objects
    /// are emitted whole.
    pub fn to_pruned_json(&self) -> Result<Value, serde_json::Error> {
        let full = serde_json::to_value(self)?;
        let pruned = match full {
            Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .filter(|(key, value)| {
                        let keep = !is_empty_value(value);
                        if !keep {
                            tracing::trace!("Dropping empty key '{}' from profile output", key);
                        }
                        keep
                    })
                    .collect::<Map<String, Value>>(),
            ),
            other => other,
        };
        Ok(pruned)
    }

    /// Names of the sections that carry data, in output order.
    pub fn populated_sections(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if !self.contact.is_empty() { names.push("contact"); }
        if !self.summary.is_empty() { names.push("summary"); }
        if !self.experience.is_empty() { names.push("experience"); }
        if !self.education.is_empty() { names.push("education"); }
        if !self.skills.is_empty() { names.push("skills"); }
        if !self.certifications.is_empty() { names.push("certifications"); }
        if !self.languages.is_empty() { names.push("languages"); }
        if !self.other.is_empty() { names.push("other"); }
        names
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(_) => false,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.values().all(is_empty_value),
    }
}
