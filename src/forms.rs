//! Form decoding and validation: presence and length only, per the descriptor.

use crate::entity::EntityDef;
use std::collections::HashMap;
use std::fmt;

/// Submitted form fields, keyed by field name.
pub type FormValues = HashMap<String, String>;

/// Field-level validation messages, kept in the order they were recorded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormErrors {
    errors: Vec<(String, String)>,
}

impl FormErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push((field.to_string(), message.into()));
    }

    /// First message recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

/// Keep only the entity's editable fields from a raw submission, trimmed.
/// Unknown keys are dropped; missing fields come back as empty strings so a
/// later write always replaces every editable column.
pub fn editable_values(entity: &EntityDef, submitted: &FormValues) -> FormValues {
    entity
        .fields
        .iter()
        .map(|f| {
            let v = submitted
                .get(f.name)
                .map(|s| s.trim().to_string())
                .unwrap_or_default();
            (f.name.to_string(), v)
        })
        .collect()
}

/// Presence for required fields and max length for all. Returns every failure,
/// not just the first, so the form can show messages per field.
pub fn validate(entity: &EntityDef, values: &FormValues) -> Result<(), FormErrors> {
    let mut errors = FormErrors::default();
    for f in entity.fields {
        let v = values.get(f.name).map(String::as_str).unwrap_or("");
        if f.required && v.is_empty() {
            errors.push(f.name, "This field is required.");
            continue;
        }
        if v.chars().count() > f.max_length {
            errors.push(
                f.name,
                format!("Must be at most {} characters.", f.max_length),
            );
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityDef, FieldDef, STUDENT};

    const ROOM: EntityDef = EntityDef {
        name: "Room",
        plural: "Rooms",
        table: "rooms",
        fields: &[
            FieldDef { name: "name", label: "Name", required: true, max_length: 10 },
            FieldDef { name: "building", label: "Building", required: false, max_length: 10 },
        ],
    };

    fn submission(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn editable_values_drops_unknown_keys_and_trims() {
        let got = editable_values(
            &STUDENT,
            &submission(&[("name", "  Ana "), ("identity_number", "X1"), ("role", "admin")]),
        );
        assert_eq!(got.get("name").unwrap(), "Ana");
        assert_eq!(got.get("identity_number").unwrap(), "X1");
        assert!(!got.contains_key("role"));
    }

    #[test]
    fn editable_values_fills_missing_fields_with_empty() {
        let got = editable_values(&STUDENT, &submission(&[("name", "Ana")]));
        assert_eq!(got.get("identity_number").unwrap(), "");
    }

    #[test]
    fn missing_required_field_fails() {
        let err = validate(&STUDENT, &submission(&[("name", "Ana")])).unwrap_err();
        assert_eq!(err.get("identity_number"), Some("This field is required."));
        assert!(err.get("name").is_none());
    }

    #[test]
    fn whitespace_only_required_field_fails_after_trim() {
        let values = editable_values(&STUDENT, &submission(&[("name", "   "), ("identity_number", "X1")]));
        let err = validate(&STUDENT, &values).unwrap_err();
        assert_eq!(err.get("name"), Some("This field is required."));
    }

    #[test]
    fn optional_field_may_be_empty() {
        assert!(validate(&ROOM, &submission(&[("name", "A-101"), ("building", "")])).is_ok());
    }

    #[test]
    fn over_long_value_fails_with_length_message() {
        let err = validate(
            &ROOM,
            &submission(&[("name", "A-101"), ("building", "longer than ten")]),
        )
        .unwrap_err();
        assert_eq!(err.get("building"), Some("Must be at most 10 characters."));
    }

    #[test]
    fn all_failures_are_reported() {
        let err = validate(&STUDENT, &submission(&[])).unwrap_err();
        assert_eq!(err.iter().count(), 2);
        assert_eq!(err.to_string(), "name: This field is required.; identity_number: This field is required.");
    }
}
