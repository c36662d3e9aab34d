use serde::Serialize;
use std::fmt;

use crate::types::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field problem found in one payload, in the order they were checked.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    pub fn require(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    pub fn require_uuid(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        } else if uuid::Uuid::parse_str(value).is_err() {
            self.push(field, "must be a uuid");
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Payload-level checks. Each request body implements this next to its definition.
pub trait Validate {
    fn validate(&self, validator: &Validator, errors: &mut ValidationErrors);
}

/// Built once in `main` and handed to the routes through app data.
#[derive(Debug, Clone)]
pub struct Validator {
    pub password_min: usize,
    pub password_max: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            password_min: 3,
            password_max: 100,
        }
    }
}

impl Validator {
    pub fn check<P: Validate>(&self, payload: &P) -> Result<(), AppError> {
        let mut errors = ValidationErrors::default();
        payload.validate(self, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }

    pub fn email(&self, errors: &mut ValidationErrors, field: &'static str, value: &str) {
        let valid = match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
            }
            None => false,
        };
        if !valid {
            errors.push(field, "must be an email address");
        }
    }

    pub fn password(&self, errors: &mut ValidationErrors, field: &'static str, value: &str) {
        let len = value.chars().count();
        if len < self.password_min || len > self.password_max {
            errors.push(
                field,
                format!(
                    "must be between {} and {} characters",
                    self.password_min, self.password_max
                ),
            );
        }
    }
}
