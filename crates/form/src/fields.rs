//! Form fields and their errors

use nameform_validation::TAKEN_MESSAGE;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Input fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Location,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => f.write_str("Name"),
            Field::Location => f.write_str("Location"),
        }
    }
}

/// Error shown under a field
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Raised synchronously on blur or submit when the field is empty
    #[error("{0} is required")]
    Required(Field),

    /// Raised by the latest remote validation
    #[error("{}", TAKEN_MESSAGE)]
    Taken,
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Current error, if any, of each field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors {
    pub name: Option<FieldError>,
    pub location: Option<FieldError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Location => self.location.as_ref(),
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = [&self.name, &self.location]
            .into_iter()
            .flatten()
            .map(ToString::to_string)
            .collect();
        f.write_str(&messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(FieldError::Required(Field::Name).to_string(), "Name is required");
        assert_eq!(
            FieldError::Required(Field::Location).to_string(),
            "Location is required"
        );
        assert_eq!(FieldError::Taken.to_string(), "The name has already been taken");
    }

    #[test]
    fn test_errors_display_and_json() {
        let errors = FieldErrors {
            name: Some(FieldError::Taken),
            location: Some(FieldError::Required(Field::Location)),
        };

        assert!(!errors.is_empty());
        assert_eq!(
            errors.to_string(),
            "The name has already been taken; Location is required"
        );
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({
                "name": "The name has already been taken",
                "location": "Location is required"
            })
        );
    }
}
