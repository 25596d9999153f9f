//! Core record types for biodata.
//!
//! A [`Record`] is one persisted biodata entry. Field names in the stored JSON
//! follow the form field names (`nama`, `nim`, `prodi`, ...) so existing data
//! files keep working.

use chrono::{DateTime, Local, SecondsFormat, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Study programs offered by the submission form.
pub const PROGRAMS: &[&str] = &["Informatika", "Sistem Informasi", "Teknik Elektro"];

/// Genders offered by the submission form.
pub const GENDERS: &[&str] = &["Laki-laki", "Perempuan"];

/// Hobbies offered by the submission form.
pub const HOBBIES: &[&str] = &["Membaca", "Olahraga", "Musik", "Coding", "Gaming"];

/// A single stored biodata entry.
///
/// Missing keys, `null`s and values of the wrong type deserialize to empty
/// values rather than failing the whole file. Numbers and booleans stored in
/// text fields are kept as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    /// When the record was created, as an ISO-8601 string.
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: String,

    /// Full name.
    #[serde(rename = "nama", deserialize_with = "lenient_string")]
    pub name: String,

    /// Student identification number. Opaque text.
    #[serde(rename = "nim", deserialize_with = "lenient_string")]
    pub student_id: String,

    /// Study program.
    #[serde(rename = "prodi", deserialize_with = "lenient_string")]
    pub program: String,

    /// Gender.
    #[serde(deserialize_with = "lenient_string")]
    pub gender: String,

    /// Selected hobbies, in submission order.
    #[serde(rename = "hobi", deserialize_with = "lenient_list")]
    pub hobbies: Vec<String>,

    /// Postal address. May span several lines.
    #[serde(rename = "alamat", deserialize_with = "lenient_string")]
    pub address: String,
}

impl Record {
    /// Hobbies joined for display, e.g. `"Musik, Coding"`.
    #[must_use]
    pub fn hobbies_display(&self) -> String {
        self.hobbies.join(", ")
    }

    /// Parse the stored timestamp, if it is well-formed.
    #[must_use]
    pub fn parsed_timestamp(&self) -> Option<DateTime<chrono::FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.into_iter().filter_map(scalar_text).collect()),
        _ => Ok(Vec::new()),
    }
}

/// Format a timestamp the way records store it: seconds precision with a
/// numeric UTC offset, e.g. `2025-10-17T09:30:00+07:00`.
#[must_use]
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// The current local time as a record timestamp.
#[must_use]
pub fn now_timestamp() -> String {
    format_timestamp(&Local::now())
}

/// The option lists the submission form offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormOptions {
    /// Study programs.
    pub programs: &'static [&'static str],
    /// Genders.
    pub genders: &'static [&'static str],
    /// Hobbies.
    pub hobbies: &'static [&'static str],
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            programs: PROGRAMS,
            genders: GENDERS,
            hobbies: HOBBIES,
        }
    }
}
