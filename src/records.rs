use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub make: String,
    pub model: String,
    pub mileage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("make is required")]
    MissingMake,
    #[error("model is required")]
    MissingModel,
    #[error("mileage must be greater than zero")]
    InvalidMileage,
}

impl RecordError {
    pub fn field(&self) -> &'static str {
        match self {
            RecordError::MissingMake => "make",
            RecordError::MissingModel => "model",
            RecordError::InvalidMileage => "mileage",
        }
    }
}

impl VehicleRecord {
    /// Checks required fields and returns the trimmed record.
    pub fn validate(self) -> Result<VehicleRecord, RecordError> {
        let make = self.make.trim();
        if make.is_empty() {
            return Err(RecordError::MissingMake);
        }
        let model = self.model.trim();
        if model.is_empty() {
            return Err(RecordError::MissingModel);
        }
        if self.mileage == 0 {
            return Err(RecordError::InvalidMileage);
        }
        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .map(str::to_string);

        Ok(VehicleRecord {
            make: make.to_string(),
            model: model.to_string(),
            mileage: self.mileage,
            notes,
        })
    }
}
