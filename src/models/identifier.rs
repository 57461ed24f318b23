//! Opaque identifiers for vehicles and jobs.

use serde::{Deserialize, Serialize};

/// An opaque, stable identifier of a vehicle or a job.
///
/// Instances in the wild use either strings or integers as identifiers;
/// both deserialize into the same textual form.
///
/// # Examples
///
/// ```
/// use u_makespan::models::Identifier;
///
/// let a = Identifier::from("courier-1");
/// let b = Identifier::from(17u64);
/// assert_eq!(a.as_str(), "courier-1");
/// assert_eq!(b.to_string(), "17");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "IdentifierRepr", into = "String")]
pub struct Identifier(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum IdentifierRepr {
    Number(u64),
    Text(String),
}

impl From<IdentifierRepr> for Identifier {
    fn from(repr: IdentifierRepr) -> Self {
        match repr {
            IdentifierRepr::Number(n) => Self(n.to_string()),
            IdentifierRepr::Text(s) => Self(s),
        }
    }
}

impl Identifier {
    /// The identifier as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for Identifier {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}
