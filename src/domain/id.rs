use crate::utils::error::{Result, ServiceError};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use serde::{Serialize, Serializer};
use std::fmt;

// Characters quoted when an identifier is rendered; '/' and ' ' stay literal.
const ID_COMPONENT: &AsciiSet = &CONTROLS
    .add(b':')
    .add(b'@')
    .add(b'%')
    .add(b'#')
    .add(b'?')
    .add(b'&')
    .add(b'"');

/// An external-service identifier of the form `namespace:identifier@authority`.
///
/// Rendered URL-quoted (`namespace%3Aidentifier%40authority`), which is the
/// form clients send back in paths and payloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id {
    namespace: String,
    identifier: String,
    authority: String,
}

/// Genus, format, language and script types share the identifier syntax.
pub type Type = Id;

impl Id {
    pub fn new(
        namespace: impl Into<String>,
        identifier: impl Into<String>,
        authority: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            identifier: identifier.into(),
            authority: authority.into(),
        }
    }

    /// Parses a quoted or unquoted identifier string.
    pub fn parse(raw: &str) -> Result<Self> {
        let decoded = percent_decode_str(raw.trim())
            .decode_utf8()
            .map_err(|_| ServiceError::invalid_argument(format!("'{}' is not a valid Id", raw)))?;

        let invalid = || ServiceError::invalid_argument(format!("'{}' is not a valid Id", raw));

        let (namespace, rest) = decoded.split_once(':').ok_or_else(invalid)?;
        let (identifier, authority) = rest.rsplit_once('@').ok_or_else(invalid)?;

        if namespace.is_empty() || identifier.is_empty() || authority.is_empty() {
            return Err(invalid());
        }

        Ok(Self::new(namespace, identifier, authority))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}%3A{}%40{}",
            utf8_percent_encode(&self.namespace, ID_COMPONENT),
            utf8_percent_encode(&self.identifier, ID_COMPONENT),
            utf8_percent_encode(&self.authority, ID_COMPONENT)
        )
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
