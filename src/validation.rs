use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use validator::{ValidationError, ValidationErrors};

pub const BLANK: &str = "cannot be blank";
pub const INVALID_EMAIL: &str = "must be a valid email address";

/// Field name to human readable reason, keyed by the wire (camelCase) name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.insert(field.into(), reason.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            if let Some(reason) = pick_reason(errs) {
                out.insert(wire_name(&field.to_string()), reason);
            }
        }
        out
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

// Presence failures take priority over format failures on the same field
fn pick_reason(errs: &[ValidationError]) -> Option<String> {
    let chosen = errs
        .iter()
        .find(|e| e.code == "length" || e.code == "range")
        .or_else(|| errs.first())?;

    Some(match &chosen.message {
        Some(msg) => msg.to_string(),
        None => chosen.code.to_string(),
    })
}

/// `user_id` -> `userId`
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
