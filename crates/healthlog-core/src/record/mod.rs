//! Daily health records: the editable draft, the accepted record, the
//! validator between them and the append-only store they land in.

mod store;
mod validator;

pub use store::RecordStore;
pub use validator::validate;

use serde::{Deserialize, Serialize};

use crate::form::RecordField;

/// In-progress record form. Every field is free text until submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub date: String,
    pub weight: String,
    pub water: String,
    pub sleep: String,
    pub exercise: String,
    pub meals: String,
}

impl RecordDraft {
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Date => &self.date,
            RecordField::Weight => &self.weight,
            RecordField::Water => &self.water,
            RecordField::Sleep => &self.sleep,
            RecordField::Exercise => &self.exercise,
            RecordField::Meals => &self.meals,
        }
    }

    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        let slot = match field {
            RecordField::Date => &mut self.date,
            RecordField::Weight => &mut self.weight,
            RecordField::Water => &mut self.water,
            RecordField::Sleep => &mut self.sleep,
            RecordField::Exercise => &mut self.exercise,
            RecordField::Meals => &mut self.meals,
        };
        *slot = value.into();
    }

    /// Back to all-empty, as after a successful submission.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// An accepted record. Only [`validate`] builds one, so `date` and `weight`
/// are never empty.
///
/// Values are kept verbatim; an empty `meals` stays empty here and is only
/// replaced by a placeholder when projected for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthRecord {
    date: String,
    weight: String,
    water: String,
    sleep: String,
    exercise: String,
    meals: String,
}

impl HealthRecord {
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn weight(&self) -> &str {
        &self.weight
    }

    pub fn water(&self) -> &str {
        &self.water
    }

    pub fn sleep(&self) -> &str {
        &self.sleep
    }

    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    pub fn meals(&self) -> &str {
        &self.meals
    }
}

impl From<&HealthRecord> for RecordDraft {
    fn from(record: &HealthRecord) -> Self {
        Self {
            date: record.date.clone(),
            weight: record.weight.clone(),
            water: record.water.clone(),
            sleep: record.sleep.clone(),
            exercise: record.exercise.clone(),
            meals: record.meals.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_set_then_clear() {
        let mut draft = RecordDraft::default();
        draft.set(RecordField::Meals, "rice");
        draft.set(RecordField::Weight, "70");
        assert_eq!(draft.get(RecordField::Meals), "rice");
        assert_eq!(draft.weight, "70");

        draft.clear();
        assert_eq!(draft, RecordDraft::default());
    }
}
