//! Submission validation.
//!
//! Turns an untrusted [`RawSubmission`] into a [`Record`], or reports every
//! missing field at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::record::{now_timestamp, Record};

/// A submission as it arrives from a form, JSON body, or the CLI.
///
/// Field names match the form inputs. Nothing here has been trimmed or checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSubmission {
    /// Full name.
    pub nama: String,
    /// Student identification number.
    pub nim: String,
    /// Study program.
    pub prodi: String,
    /// Gender.
    pub gender: String,
    /// Selected hobbies.
    pub hobi: Vec<String>,
    /// Address.
    pub alamat: String,
}

impl RawSubmission {
    /// Build a submission from decoded form pairs.
    ///
    /// `hobi[]` and `hobi` are both collected, in order, into the hobby list.
    /// For the single-valued fields the last occurrence wins. Unknown keys are
    /// ignored.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "nama" => raw.nama = value.into(),
                "nim" => raw.nim = value.into(),
                "prodi" => raw.prodi = value.into(),
                "gender" => raw.gender = value.into(),
                "alamat" => raw.alamat = value.into(),
                "hobi" | "hobi[]" => raw.hobi.push(value.into()),
                _ => {}
            }
        }
        raw
    }
}

/// The submission fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// `nama`
    Name,
    /// `nim`
    StudentId,
    /// `prodi`
    Program,
    /// `gender`
    Gender,
    /// `hobi`
    Hobbies,
    /// `alamat`
    Address,
}

impl Field {
    /// The form key for this field.
    #[must_use]
    pub fn form_key(self) -> &'static str {
        match self {
            Self::Name => "nama",
            Self::StudentId => "nim",
            Self::Program => "prodi",
            Self::Gender => "gender",
            Self::Hobbies => "hobi",
            Self::Address => "alamat",
        }
    }

    /// The message shown to the submitter when this field is missing.
    #[must_use]
    pub fn required_message(self) -> &'static str {
        match self {
            Self::Name => "Nama Lengkap wajib diisi.",
            Self::StudentId => "NIM wajib diisi.",
            Self::Program => "Program Studi wajib dipilih.",
            Self::Gender => "Jenis Kelamin wajib dipilih.",
            Self::Hobbies => "Pilih minimal satu hobi.",
            Self::Address => "Alamat wajib diisi.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_key())
    }
}

/// A single failed required-field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ValidationError {
    /// The field that failed.
    pub field: Field,
    /// Human-readable message.
    pub message: &'static str,
}

impl ValidationError {
    /// The error reported when `field` is blank.
    #[must_use]
    pub fn required(field: Field) -> Self {
        Self {
            field,
            message: field.required_message(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a submission, stamping it with the current local time.
///
/// # Errors
///
/// Returns every failed check, in form order, if any required field is blank.
pub fn validate(raw: RawSubmission) -> Result<Record, Vec<ValidationError>> {
    validate_at(raw, now_timestamp())
}

/// Validate a submission with an explicit timestamp.
///
/// String fields are trimmed before checking. Hobbies are kept exactly as
/// submitted; only an empty selection is rejected.
///
/// # Errors
///
/// Returns every failed check, in form order, if any required field is blank.
pub fn validate_at(
    raw: RawSubmission,
    timestamp: impl Into<String>,
) -> Result<Record, Vec<ValidationError>> {
    let name = raw.nama.trim();
    let student_id = raw.nim.trim();
    let program = raw.prodi.trim();
    let gender = raw.gender.trim();
    let address = raw.alamat.trim();

    let checks = [
        (Field::Name, name.is_empty()),
        (Field::StudentId, student_id.is_empty()),
        (Field::Program, program.is_empty()),
        (Field::Gender, gender.is_empty()),
        (Field::Hobbies, raw.hobi.is_empty()),
        (Field::Address, address.is_empty()),
    ];
    let errors: Vec<ValidationError> = checks
        .into_iter()
        .filter(|(_, blank)| *blank)
        .map(|(field, _)| ValidationError::required(field))
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Record {
        timestamp: timestamp.into(),
        name: name.to_string(),
        student_id: student_id.to_string(),
        program: program.to_string(),
        gender: gender.to_string(),
        hobbies: raw.hobi,
        address: address.to_string(),
    })
}
