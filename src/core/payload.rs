use crate::domain::forms::FormBasics;
use crate::domain::id::{Id, Type};
use crate::domain::locale::{plain_text_format, DisplayText, Locale};
use crate::utils::error::{Result, ServiceError};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A request's JSON object (or query parameters) with typed accessors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    data: Map<String, Value>,
}

impl Payload {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Parses a request body. An empty body is an empty object.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(body)? {
            Value::Object(data) => Ok(Self::new(data)),
            other => Err(ServiceError::invalid_argument(format!(
                "request body must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn from_query(params: HashMap<String, String>) -> Self {
        Self::new(
            params
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        )
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn contains_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.contains(key))
    }

    pub fn verify_keys_present(&self, keys: &[&str]) -> Result<()> {
        match keys.iter().find(|key| !self.contains(key)) {
            Some(missing) => Err(ServiceError::null_argument(format!(
                "\"{}\" required in input parameters but not provided.",
                missing
            ))),
            None => Ok(()),
        }
    }

    pub fn verify_at_least_one_key_present(&self, keys: &[&str]) -> Result<()> {
        if self.contains_any(keys) {
            return Ok(());
        }
        Err(ServiceError::null_argument(format!(
            "At least one of the following must be passed in: [{}]",
            keys.iter()
                .map(|k| format!("\"{}\"", k))
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }

    fn required(&self, key: &str) -> Result<&Value> {
        self.get(key).ok_or_else(|| {
            ServiceError::null_argument(format!(
                "\"{}\" required in input parameters but not provided.",
                key
            ))
        })
    }

    pub fn id(&self, key: &str) -> Result<Id> {
        match self.required(key)? {
            Value::String(raw) => Id::parse(raw),
            other => Err(ServiceError::invalid_argument(format!(
                "\"{}\" must be an Id string, got {}",
                key,
                json_kind(other)
            ))),
        }
    }

    pub fn float(&self, key: &str) -> Result<f64> {
        float_value(key, self.required(key)?)
    }

    /// Truthiness of the value: `0`, `""`, `[]`, `{}`, `null` and `false` are false.
    pub fn boolean(&self, key: &str) -> Result<bool> {
        Ok(truthy(self.required(key)?))
    }

    pub fn array(&self, key: &str) -> Result<&Vec<Value>> {
        match self.required(key)? {
            Value::Array(items) => Ok(items),
            _ => Err(ServiceError::invalid_argument(format!(
                "\"{}\" must be a list of objects.",
                key
            ))),
        }
    }

    pub fn display_text(&self, key: &str, locale: &Locale) -> Result<DisplayText> {
        display_text_value(key, self.required(key)?, locale)
    }

    /// Applies `displayName`/`name`, `description` and `genusTypeId` to a form.
    pub fn set_form_basics<F: FormBasics>(&self, form: &mut F, locale: &Locale) -> Result<()> {
        if self.contains("displayName") {
            form.set_display_name(self.display_text("displayName", locale)?);
        }
        if self.contains("name") {
            form.set_display_name(self.display_text("name", locale)?);
        }
        if self.contains("description") {
            form.set_description(self.display_text("description", locale)?);
        }
        if self.contains("genusTypeId") {
            form.set_genus_type(self.id("genusTypeId")?);
        }
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

pub fn float_value(key: &str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        ServiceError::invalid_argument(format!(
            "\"{}\" must be numeric, got {}",
            key,
            json_kind(value)
        ))
    })
}

fn type_field(map: &Map<String, Value>, field: &str, default: Type) -> Result<Type> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::String(raw)) => Id::parse(raw),
        Some(other) => Err(ServiceError::invalid_argument(format!(
            "\"{}\" must be a type string, got {}",
            field,
            json_kind(other)
        ))),
    }
}

/// Plain strings take the request locale; objects carry their own types.
pub fn display_text_value(key: &str, value: &Value, locale: &Locale) -> Result<DisplayText> {
    match value {
        Value::String(text) => Ok(DisplayText::new(text.clone(), locale)),
        Value::Number(_) | Value::Bool(_) => Ok(DisplayText::new(value.to_string(), locale)),
        Value::Object(map) => {
            let text = match map.get("text") {
                Some(Value::String(text)) => text.clone(),
                _ => {
                    return Err(ServiceError::invalid_argument(format!(
                        "\"{}\" display text needs a \"text\" string",
                        key
                    )))
                }
            };
            Ok(DisplayText {
                format_type_id: type_field(map, "formatTypeId", plain_text_format())?,
                language_type_id: type_field(map, "languageTypeId", locale.language_type.clone())?,
                script_type_id: type_field(map, "scriptTypeId", locale.script_type.clone())?,
                text,
            })
        }
        other => Err(ServiceError::invalid_argument(format!(
            "\"{}\" must be a string or display text object, got {}",
            key,
            json_kind(other)
        ))),
    }
}
