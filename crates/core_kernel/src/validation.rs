//! Argument validation shared by every constructor in the domain crates
//!
//! Each helper checks a single constraint and hands back the accepted value,
//! so a constructor reads as a sequence of `?` calls and never builds a
//! partially valid object.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::identifiers::EntityId;

/// An argument failed a domain constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {message}")]
pub struct ValidationError {
    /// Name of the offending argument
    pub field: &'static str,
    /// Human readable reason
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for a named argument
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Rejects the nil identifier
pub fn require_id<T: EntityId>(field: &'static str, id: T) -> Result<T, ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new(field, "identifier cannot be empty"));
    }
    Ok(id)
}

/// Rejects empty or whitespace-only text, returning an owned copy otherwise
pub fn require_non_blank(field: &'static str, value: &str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "cannot be empty or whitespace"));
    }
    Ok(value.to_string())
}

/// Rejects zero and negative values
pub fn require_positive(field: &'static str, value: Decimal) -> Result<Decimal, ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::new(
            field,
            format!("must be greater than 0, got {}", value),
        ));
    }
    Ok(value)
}

/// Rejects an end instant that precedes its start
pub fn require_not_before(
    field: &'static str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<DateTime<Utc>, ValidationError> {
    if end < start {
        return Err(ValidationError::new(
            field,
            format!("{} is before start time {}", end, start),
        ));
    }
    Ok(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::DischargeId;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    #[test]
    fn test_require_id() {
        assert!(require_id("id", DischargeId::nil()).is_err());
        assert!(require_id("id", DischargeId::new()).is_ok());
    }

    #[test]
    fn test_require_non_blank() {
        assert_eq!(require_non_blank("code", "PRV-01").unwrap(), "PRV-01");
        let err = require_non_blank("code", "   ").unwrap_err();
        assert_eq!(err.field, "code");
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("kg", dec!(0.01)).unwrap(), dec!(0.01));
        assert!(require_positive("kg", Decimal::ZERO).is_err());
        assert!(require_positive("kg", dec!(-3)).is_err());
    }

    #[test]
    fn test_require_not_before() {
        let start = Utc::now();
        assert!(require_not_before("end_time", start, start).is_ok());
        assert!(require_not_before("end_time", start, start - Duration::seconds(1)).is_err());
    }
}
