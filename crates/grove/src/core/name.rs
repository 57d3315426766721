use std::fmt;

use convert_case::{Case, Casing};

use crate::error::{Error, Result};

/// Fallback for names that lose every character in conversion.
const ANONYMOUS: &str = "node";

/// Characters allowed in a name.
fn allowed(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '_')
}

/// A node's display name in tree dumps and log lines: snake case ASCII.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName(String);

impl NodeName {
    /// Accept a name as given, failing if it is empty or has characters
    /// outside `[a-z0-9_]`.
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() || !name.chars().all(allowed) {
            return Err(Error::Invalid(format!("node name {name:?}")));
        }
        Ok(Self(name.to_string()))
    }

    /// Derive a name from anything, usually a type name: snake case it and
    /// drop what is left over.
    pub fn convert(raw: &str) -> Self {
        let name: String = raw.to_case(Case::Snake).chars().filter(|c| allowed(*c)).collect();
        if name.is_empty() {
            Self(ANONYMOUS.into())
        } else {
            Self(name)
        }
    }

    /// The name as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for NodeName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
