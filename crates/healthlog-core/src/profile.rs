//! User profile and the write-once store that gates the rest of the app.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::form::ProfileField;

/// One-time identity and health metadata, held exactly as entered.
///
/// `age` and `blood_oxygen` come from numeric inputs but are kept as text:
/// nothing downstream computes with them and empty is a legal value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub medical_history: String,
    /// Free-form, usually "systolic/diastolic".
    pub blood_pressure: String,
    pub blood_oxygen: String,
}

impl UserProfile {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Age => &self.age,
            ProfileField::Gender => &self.gender,
            ProfileField::MedicalHistory => &self.medical_history,
            ProfileField::BloodPressure => &self.blood_pressure,
            ProfileField::BloodOxygen => &self.blood_oxygen,
        }
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Age => &mut self.age,
            ProfileField::Gender => &mut self.gender,
            ProfileField::MedicalHistory => &mut self.medical_history,
            ProfileField::BloodPressure => &mut self.blood_pressure,
            ProfileField::BloodOxygen => &mut self.blood_oxygen,
        };
        *slot = value.into();
    }
}

/// Holds at most one profile for the session.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profile: Option<UserProfile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the candidate. Any field values are accepted, including an
    /// entirely empty profile.
    pub fn try_save(&mut self, candidate: UserProfile) -> Result<(), Infallible> {
        tracing::info!(name = %candidate.name, "profile saved");
        self.profile = Some(candidate);
        Ok(())
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// True once a profile exists; the record form and dashboard sit behind this.
    pub fn is_open(&self) -> bool {
        self.profile.is_some()
    }
}
