use crate::domain::id::{Id, Type};
use serde::Serialize;

pub fn plain_text_format() -> Type {
    Id::new("TextFormats", "PLAIN", "okapia.net")
}

pub fn language_type(code: &str) -> Type {
    Id::new("639-2", code, "ISO")
}

pub fn script_type(code: &str) -> Type {
    Id::new("15924", code, "ISO")
}

/// Language and script applied to display text built from plain strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub language_type: Type,
    pub script_type: Type,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language_type: language_type("ENG"),
            script_type: script_type("LATN"),
        }
    }
}

impl Locale {
    /// Maps an `X-Api-Locale` code; unsupported codes fall back to the default.
    pub fn from_code(code: &str) -> Self {
        let (language, script) = match code.trim().to_ascii_lowercase().as_str() {
            "en" => ("ENG", "LATN"),
            "hi" => ("HIN", "DEVA"),
            "te" => ("TEL", "TELU"),
            _ => return Self::default(),
        };
        Self {
            language_type: language_type(language),
            script_type: script_type(script),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayText {
    pub format_type_id: Type,
    pub language_type_id: Type,
    pub script_type_id: Type,
    pub text: String,
}

impl DisplayText {
    pub fn new(text: impl Into<String>, locale: &Locale) -> Self {
        Self {
            format_type_id: plain_text_format(),
            language_type_id: locale.language_type.clone(),
            script_type_id: locale.script_type.clone(),
            text: text.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new("", &Locale::default())
    }
}

/// Caller context handed to the service runtime when a manager is requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proxy {
    pub agent_id: Id,
    pub locale: Locale,
}

impl Proxy {
    pub fn new(username: &str, authority: &str, locale: Locale) -> Self {
        Self {
            agent_id: Id::new("osid.agent.Agent", username, authority),
            locale,
        }
    }
}
