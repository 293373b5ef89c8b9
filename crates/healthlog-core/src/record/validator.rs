use crate::error::ValidationError;
use crate::form::RecordField;

use super::{HealthRecord, RecordDraft};

/// Check a submitted draft and turn it into a storable record.
///
/// Date and weight must be non-empty (whitespace-only counts as empty);
/// when both are missing the date is reported. Nothing else is checked and
/// every value is carried over untouched.
pub fn validate(candidate: &RecordDraft) -> Result<HealthRecord, ValidationError> {
    for field in [RecordField::Date, RecordField::Weight] {
        if candidate.get(field).trim().is_empty() {
            return Err(ValidationError::MissingRequiredField { field });
        }
    }

    Ok(HealthRecord {
        date: candidate.date.clone(),
        weight: candidate.weight.clone(),
        water: candidate.water.clone(),
        sleep: candidate.sleep.clone(),
        exercise: candidate.exercise.clone(),
        meals: candidate.meals.clone(),
    })
}
