//! Schema-driven form engine: holds raw field input, validates it against
//! the schema rules and resets fields back to their initial values.

use std::collections::BTreeMap;

use thiserror::Error;

pub(crate) mod schema;

use schema::{FieldKind, FieldSpec, FormSchema, Rule};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FieldValue {
    Text(String),
    Number(i64),
}

/// Values of every field that passed validation and was not left empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FormValues(BTreeMap<String, FieldValue>);

impl FormValues {
    pub(crate) fn number(&self, key: &str) -> Option<i64> {
        match self.0.get(key) {
            Some(FieldValue::Number(value)) => Some(*value),
            _ => None,
        }
    }

    pub(crate) fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(FieldValue::Text(value)) => Some(value),
            _ => None,
        }
    }
}

/// Field-keyed validation messages.
#[derive(Clone, Debug, Default, Error, PartialEq, Eq)]
#[error("{} field(s) failed validation", .0.len())]
pub(crate) struct FieldErrors(pub(crate) BTreeMap<String, String>);

impl FieldErrors {
    pub(crate) fn single(key: &str, message: impl Into<String>) -> Self {
        Self(BTreeMap::from([(key.to_string(), message.into())]))
    }

    pub(crate) fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct FormState {
    schema: FormSchema,
    initial: BTreeMap<String, String>,
    values: BTreeMap<String, String>,
    errors: FieldErrors,
}

impl FormState {
    /// `data` overrides field defaults; together they form the reset target.
    pub(crate) fn new(schema: FormSchema, data: &[(&str, String)]) -> Self {
        let mut initial: BTreeMap<String, String> = schema
            .fields
            .iter()
            .filter_map(|field| Some((field.key.clone(), field.default.clone()?)))
            .collect();
        for (key, value) in data {
            initial.insert((*key).to_string(), value.clone());
        }

        Self {
            schema,
            values: initial.clone(),
            initial,
            errors: FieldErrors::default(),
        }
    }

    pub(crate) fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub(crate) fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub(crate) fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Mutable raw input for a widget, created empty on first use.
    pub(crate) fn value_mut(&mut self, key: &str) -> &mut String {
        self.values.entry(key.to_string()).or_default()
    }

    pub(crate) fn error(&self, key: &str) -> Option<&str> {
        self.errors.get(key)
    }

    /// Checks every field and returns the typed values, or the messages for
    /// each failing field. Messages are kept for inline display.
    pub(crate) fn validate_fields(&mut self) -> Result<FormValues, FieldErrors> {
        let mut values = BTreeMap::new();
        let mut errors = BTreeMap::new();

        for field in &self.schema.fields {
            match validate_field(field, self.get(&field.key)) {
                Ok(Some(value)) => {
                    values.insert(field.key.clone(), value);
                }
                Ok(None) => {}
                Err(message) => {
                    errors.insert(field.key.clone(), message);
                }
            }
        }

        self.errors = FieldErrors(errors);
        if self.errors.is_empty() {
            Ok(FormValues(values))
        } else {
            Err(self.errors.clone())
        }
    }

    /// Restores the named fields (all when `None`) and drops their errors.
    pub(crate) fn reset_fields(&mut self, keys: Option<&[&str]>) {
        let keys: Vec<String> = match keys {
            Some(keys) => keys.iter().map(|key| key.to_string()).collect(),
            None => self
                .schema
                .fields
                .iter()
                .map(|field| field.key.clone())
                .collect(),
        };

        for key in keys {
            match self.initial.get(&key) {
                Some(value) => {
                    self.values.insert(key.clone(), value.clone());
                }
                None => {
                    self.values.remove(&key);
                }
            }
            self.errors.0.remove(&key);
        }
    }
}

fn validate_field(field: &FieldSpec, raw: &str) -> Result<Option<FieldValue>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return if field.is_required() {
            Err(field.required_message())
        } else {
            Ok(None)
        };
    }

    match &field.kind {
        FieldKind::Input | FieldKind::TextArea => Ok(Some(FieldValue::Text(raw.to_string()))),
        FieldKind::RadioGroup { options } => {
            if options.iter().any(|option| option.value == raw) {
                Ok(Some(FieldValue::Text(raw.to_string())))
            } else {
                Err(format!("{} has no option '{raw}'", field.label))
            }
        }
        FieldKind::InputNumber => {
            let number: i64 = raw
                .parse()
                .map_err(|_| format!("{} must be a whole number", field.label))?;
            check_bounds(field, number)?;
            Ok(Some(FieldValue::Number(number)))
        }
    }
}

/// Explicit rules report first; input attributes still bound the value
/// when no rule covers it.
fn check_bounds(field: &FieldSpec, number: i64) -> Result<(), String> {
    for rule in &field.rules {
        match rule {
            Rule::Min { value, message } if number < *value => return Err(message.clone()),
            Rule::Max { value, message } if number > *value => return Err(message.clone()),
            _ => {}
        }
    }

    if let Some(min) = field.attrs.min {
        if number < min {
            return Err(format!("{} must be at least {min}", field.label));
        }
    }
    if let Some(max) = field.attrs.max {
        if number > max {
            return Err(format!("{} must be at most {max}", field.label));
        }
    }
    Ok(())
}
