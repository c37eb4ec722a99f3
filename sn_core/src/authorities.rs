//! Granted-authority extraction from verified token claims.
//!
//! Token issuers publish authorities under two claims: `authorities`
//! (used verbatim) and `scope` (each entry prefixed with `SCOPE_`). Either
//! claim may arrive as a space-delimited string or as a list of strings,
//! depending on the issuer; both shapes are resolved into [`ClaimValue`]
//! once, at this boundary, so nothing downstream inspects JSON shapes.

use serde_json::{Map, Value};

/// Prefix applied to every authority sourced from the `scope` claim.
pub const SCOPE_AUTHORITY_PREFIX: &str = "SCOPE_";

const AUTHORITIES_CLAIM: &str = "authorities";
const SCOPE_CLAIM: &str = "scope";

/// Normalized shape of an authority-bearing claim.
///
/// Unrecognized JSON shapes degrade to `Absent` rather than failing:
/// malformed claims mean "no authorities", never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimValue {
    /// Space-delimited authority string, e.g. `"read write"`.
    Text(String),
    /// Already-structured list of authority strings.
    List(Vec<String>),
    /// Claim missing or not an authority-bearing shape.
    Absent,
}

impl ClaimValue {
    /// Classify a raw claim value. Non-string list elements are dropped.
    pub fn from_claim(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(text)) => Self::Text(text.clone()),
            Some(Value::Array(items)) => Self::List(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_owned))
                    .collect(),
            ),
            _ => Self::Absent,
        }
    }

    /// Resolve into individual authority strings. Text values split on
    /// literal spaces, so a blank string contributes nothing.
    pub fn into_values(self) -> Vec<String> {
        match self {
            Self::Text(text) => text
                .split(' ')
                .filter(|part| !part.is_empty())
                .map(str::to_owned)
                .collect(),
            Self::List(values) => values,
            Self::Absent => Vec::new(),
        }
    }
}

/// Extract the granted authorities from a verified claim set.
///
/// Entries from `authorities` are kept verbatim and listed first; entries
/// from `scope` follow, each prefixed with [`SCOPE_AUTHORITY_PREFIX`].
/// Duplicates are preserved; callers treat the result as a set.
pub fn granted_authorities(claims: &Map<String, Value>) -> Vec<String> {
    let mut authorities = ClaimValue::from_claim(claims.get(AUTHORITIES_CLAIM)).into_values();
    authorities.extend(
        ClaimValue::from_claim(claims.get(SCOPE_CLAIM))
            .into_values()
            .into_iter()
            .map(|scope| format!("{SCOPE_AUTHORITY_PREFIX}{scope}")),
    );
    authorities
}
