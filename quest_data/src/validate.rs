use thiserror::Error;

use crate::{QuestField, QuestRecord};

/// A basic field whose text cannot be written as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field {field} is not an integer: '{raw}'")]
    InvalidFieldValue { field: QuestField, raw: String },
}

/// Coerce the text of a basic field to its integer value.
///
/// Surrounding whitespace is ignored and empty text counts as `0`.
///
/// ```
/// use quest_data::{QuestField, parse_basic_value};
///
/// assert_eq!(parse_basic_value(QuestField::Level, " 30 "), Ok(30));
/// assert_eq!(parse_basic_value(QuestField::Level, ""), Ok(0));
/// assert!(parse_basic_value(QuestField::Level, "thirty").is_err());
/// ```
pub fn parse_basic_value(field: QuestField, raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<i64>().map_err(|_| ValidationError::InvalidFieldValue {
        field,
        raw: raw.to_string(),
    })
}

/// Report every basic field of `record` that would block encoding, in field order.
pub fn validate_record(record: &QuestRecord) -> Vec<ValidationError> {
    QuestField::BASIC
        .into_iter()
        .filter_map(|field| parse_basic_value(field, record.value(field)).err())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_clean() {
        assert!(validate_record(&QuestRecord::default()).is_empty());
    }

    #[test]
    fn reports_each_bad_field_in_order() {
        let mut record = QuestRecord::default();
        record.set(QuestField::Pos2, "x");
        record.set(QuestField::Level, "3.5");
        record.set(QuestField::Model, "");
        // text fields are never checked
        record.set(QuestField::Body, "not a number");

        let errors = validate_record(&record);
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidFieldValue {
                    field: QuestField::Level,
                    raw: "3.5".into(),
                },
                ValidationError::InvalidFieldValue {
                    field: QuestField::Pos2,
                    raw: "x".into(),
                },
            ]
        );
    }

    #[test]
    fn negative_and_signed_values_are_integers() {
        assert_eq!(parse_basic_value(QuestField::Target, "-12"), Ok(-12));
        assert_eq!(parse_basic_value(QuestField::Target, "+7"), Ok(7));
        assert_eq!(parse_basic_value(QuestField::Target, "007"), Ok(7));
    }
}
