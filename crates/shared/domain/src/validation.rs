//! Field validation rules and the per-field error map.
//!
//! Each rule returns at most one error per field so the message shown next
//! to an input is deterministic.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::constants::*;
use crate::field::Field;

static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[a-z]").unwrap());
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[A-Z]").unwrap());
static SYMBOL: Lazy<Regex> = Lazy::new(|| Regex::new("[^A-Za-z0-9_]").unwrap());

/// Validation messages keyed by field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first message for a field wins.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Keep only the errors of the given fields
    pub fn retain(&mut self, mut keep: impl FnMut(Field) -> bool) {
        self.0.retain(|field, _| keep(*field));
    }

    /// Convert into `Err` when any error was recorded
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (name, field_errors) in errors.field_errors() {
            // Struct-level errors have no field to attach to
            let Ok(field) = name.parse::<Field>() else {
                continue;
            };
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.add(field, message);
            }
        }
        out
    }
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Non-blank text
pub fn required_text(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(error("required", MSG_REQUIRED));
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    required_text(value)?;
    if !value.trim().validate_email() {
        return Err(error("email", MSG_INVALID_EMAIL));
    }
    Ok(())
}

/// At least 8 characters with a lowercase letter, an uppercase letter and a
/// symbol. The first failing rule is reported.
pub fn password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", MSG_REQUIRED));
    }
    // Length is in Unicode scalar values, not UTF-16 units
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(error("length", MSG_PASSWORD_TOO_SHORT));
    }
    if !LOWERCASE.is_match(value) {
        return Err(error("lowercase", MSG_PASSWORD_LOWERCASE));
    }
    if !UPPERCASE.is_match(value) {
        return Err(error("uppercase", MSG_PASSWORD_UPPERCASE));
    }
    if !SYMBOL.is_match(value) {
        return Err(error("symbol", MSG_PASSWORD_SYMBOL));
    }
    Ok(())
}

pub fn language(value: &str) -> Result<(), ValidationError> {
    required_text(value)?;
    if !is_valid_language(value.trim()) {
        return Err(error("language", MSG_INVALID_LANGUAGE));
    }
    Ok(())
}

pub fn plan_type(value: &str) -> Result<(), ValidationError> {
    required_text(value)?;
    if !VALID_PLAN_TYPES.contains(&value.trim()) {
        return Err(error("plan_type", MSG_INVALID_PLAN_TYPE));
    }
    Ok(())
}

/// Calendar date as entered in the VAT registration date field
pub fn iso_date(value: &str) -> Result<(), ValidationError> {
    required_text(value)?;
    NaiveDate::parse_from_str(value.trim(), VAT_DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| error("date", MSG_INVALID_DATE))
}
