//! Static form tables for the two capture forms.
//!
//! The view layer iterates these tables to lay out inputs; the field enums
//! are the only way to address a draft field, so there is no lookup by
//! arbitrary string past the `FromStr` boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Input widget a field is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
    Date,
}

/// One row of a form table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec<F: 'static> {
    pub field: F,
    pub label: &'static str,
    pub input_kind: InputKind,
}

/// Fields of the one-time profile form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Name,
    Age,
    Gender,
    MedicalHistory,
    BloodPressure,
    BloodOxygen,
}

/// Fields of the daily record form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Date,
    Weight,
    Water,
    Sleep,
    Exercise,
    Meals,
}

pub const PROFILE_FORM: [FieldSpec<ProfileField>; 6] = [
    FieldSpec { field: ProfileField::Name, label: "Name", input_kind: InputKind::Text },
    FieldSpec { field: ProfileField::Age, label: "Age", input_kind: InputKind::Number },
    FieldSpec { field: ProfileField::Gender, label: "Gender", input_kind: InputKind::Text },
    FieldSpec {
        field: ProfileField::MedicalHistory,
        label: "Medical history",
        input_kind: InputKind::Text,
    },
    FieldSpec {
        field: ProfileField::BloodPressure,
        label: "Blood pressure (mmHg)",
        input_kind: InputKind::Text,
    },
    FieldSpec {
        field: ProfileField::BloodOxygen,
        label: "Blood oxygen (%)",
        input_kind: InputKind::Number,
    },
];

pub const RECORD_FORM: [FieldSpec<RecordField>; 6] = [
    FieldSpec { field: RecordField::Date, label: "Date", input_kind: InputKind::Date },
    FieldSpec { field: RecordField::Weight, label: "Weight (kg)", input_kind: InputKind::Number },
    FieldSpec { field: RecordField::Water, label: "Water (L)", input_kind: InputKind::Number },
    FieldSpec { field: RecordField::Sleep, label: "Sleep (hours)", input_kind: InputKind::Number },
    FieldSpec {
        field: RecordField::Exercise,
        label: "Exercise (minutes)",
        input_kind: InputKind::Number,
    },
    FieldSpec { field: RecordField::Meals, label: "Meals", input_kind: InputKind::Text },
];

impl ProfileField {
    pub fn key(self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Age => "age",
            ProfileField::Gender => "gender",
            ProfileField::MedicalHistory => "medical_history",
            ProfileField::BloodPressure => "blood_pressure",
            ProfileField::BloodOxygen => "blood_oxygen",
        }
    }
}

impl RecordField {
    pub fn key(self) -> &'static str {
        match self {
            RecordField::Date => "date",
            RecordField::Weight => "weight",
            RecordField::Water => "water",
            RecordField::Sleep => "sleep",
            RecordField::Exercise => "exercise",
            RecordField::Meals => "meals",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a field key names nothing on the form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for ProfileField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PROFILE_FORM
            .iter()
            .map(|spec| spec.field)
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

impl FromStr for RecordField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RECORD_FORM
            .iter()
            .map(|spec| spec.field)
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_cover_every_field_once() {
        assert_eq!(PROFILE_FORM.len(), 6);
        assert_eq!(RECORD_FORM.len(), 6);
        assert_eq!(RECORD_FORM[0].field, RecordField::Date);
        assert_eq!(RECORD_FORM[0].input_kind, InputKind::Date);
        assert_eq!(RECORD_FORM[1].label, "Weight (kg)");
    }

    #[test]
    fn keys_parse_back_to_fields() {
        for spec in PROFILE_FORM {
            assert_eq!(spec.field.key().parse::<ProfileField>(), Ok(spec.field));
        }
        for spec in RECORD_FORM {
            assert_eq!(spec.field.key().parse::<RecordField>(), Ok(spec.field));
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert_eq!(
            "height".parse::<RecordField>(),
            Err(UnknownField("height".to_string()))
        );
        assert!("medicalHistory".parse::<ProfileField>().is_err());
    }
}
