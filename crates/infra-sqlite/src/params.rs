// Named parameter source built from serialized entities

use crate::named_params::ParsedSql;
use giftstore_core::error::{AppError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::sqlite::SqliteArguments;
use sqlx::Arguments;

/// Parameter values keyed by name.
///
/// Built from an entity's serialized fields, so every field is available
/// under its own name (`:price`, `:create_date`, ...).
#[derive(Debug, Clone, Default)]
pub struct SqlParameters {
    values: Map<String, Value>,
}

impl SqlParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters from every serialized field of `entity`
    pub fn from_entity<T: Serialize>(entity: &T) -> Result<Self> {
        match serde_json::to_value(entity)? {
            Value::Object(values) => Ok(Self { values }),
            other => Err(AppError::Validation(format!(
                "Entity must serialize to an object to supply parameters, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn single(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().with(name, value)
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Positional arguments for `statement`, in placeholder order
    pub fn to_arguments<'q>(&self, statement: &ParsedSql) -> Result<SqliteArguments<'q>> {
        let mut args = SqliteArguments::default();
        for name in statement.names() {
            let value = self.values.get(name).ok_or_else(|| {
                AppError::Validation(format!(
                    "No value supplied for parameter '{}' in: {}",
                    name, statement
                ))
            })?;
            add_value(&mut args, value)?;
        }
        Ok(args)
    }
}

fn add_value(args: &mut SqliteArguments<'_>, value: &Value) -> Result<()> {
    let added = match value {
        Value::Null => args.add(Option::<String>::None),
        Value::Bool(b) => args.add(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => args.add(i),
            None => args.add(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => args.add(s.clone()),
        // Nested values are stored as JSON text
        Value::Array(_) | Value::Object(_) => args.add(value.to_string()),
    };
    added.map_err(|e| AppError::Database(format!("Failed to bind parameter: {}", e)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
