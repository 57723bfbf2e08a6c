use std::{convert::TryFrom, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Encoded identity hash of a router instance.
///
/// This type stores the identity exactly as the hosting process renders it:
/// a base64-style string over `A–Z a–z 0–9 - ~` with optional `=` padding.
/// The console never decodes it; it only compares prefixes against
/// operator-supplied short identifiers and prints it on status pages.
///
/// Validation covers the character set only. The exact length is owned by
/// the encoder on the hosting side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct Ident(String);

impl Ident {
    /// Creates a new `Ident` from a string-like value.
    ///
    /// # Examples
    /// ```
    /// use orc_model::Ident;
    ///
    /// let id = Ident::new("jT~wT4dk7mFlGt5WspMJ4dHv2eUWDTgGXaLBkcPW1sE=").unwrap();
    /// assert!(id.has_prefix("jT~w"));
    /// ```
    pub fn new(s: impl Into<String>) -> ModelResult<Self> {
        Self::try_from(s.into())
    }

    /// Returns the encoded identity as `&str`.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the encoded form starts with `prefix`.
    ///
    /// The comparison is case-sensitive and byte-exact; the caller decides
    /// what to do when nothing matches.
    #[inline]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl FromStr for Ident {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        Self::try_from(s.to_owned())
    }
}

impl TryFrom<String> for Ident {
    type Error = ModelError;
    fn try_from(s: String) -> ModelResult<Self> {
        let valid = !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '~' | '='));
        if valid {
            Ok(Ident(s))
        } else {
            Err(ModelError::InvalidIdent(s))
        }
    }
}

impl From<Ident> for String {
    fn from(id: Ident) -> Self {
        id.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Ident;

    #[test]
    fn accepts_base64_style_identities() {
        let ok = [
            "jT~wT4dk7mFlGt5WspMJ4dHv2eUWDTgGXaLBkcPW1sE=",
            "9fjzx0eDU28Cr2SnydjBBGEpE6qXhJKF6Gz6fhwbWJo=",
            "abc123",
            "A-~=",
        ];

        for s in ok {
            let parsed = Ident::from_str(s);
            assert!(parsed.is_ok(), "expected valid Ident for {s}, got {parsed:?}");
        }
    }

    #[test]
    fn rejects_empty_and_foreign_characters() {
        let bad = ["", "has space", "plus+pad", "slash/pad", "newline\n"];

        for s in bad {
            let parsed = Ident::from_str(s);
            assert!(parsed.is_err(), "expected error for Ident {s:?}, but got Ok");
        }
    }

    #[test]
    fn prefix_matching_is_case_sensitive() {
        let id = Ident::new("AbCdEf").unwrap();

        assert!(id.has_prefix("AbC"));
        assert!(id.has_prefix(""));
        assert!(!id.has_prefix("abc"));
        assert!(!id.has_prefix("AbCdEfG"));
    }

    #[test]
    fn display_and_as_str_agree() {
        let id = Ident::new("abc-~123").unwrap();
        assert_eq!(id.to_string(), id.as_str());
    }

    #[test]
    fn serde_roundtrip_as_plain_string() {
        let id = Ident::new("jT~wT4dk7mFlGt5WspMJ4dHv2eUWDTgGXaLBkcPW1sE=").unwrap();
        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, "\"jT~wT4dk7mFlGt5WspMJ4dHv2eUWDTgGXaLBkcPW1sE=\"");
        let back: Ident = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn serde_rejects_invalid_input() {
        let err = serde_json::from_str::<Ident>("\"not valid!\"");
        assert!(err.is_err());
    }
}
