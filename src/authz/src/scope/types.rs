/// Scope type definitions
///
/// Scopes are ordered by breadth: `Own < Department < Company`.

use crate::error::AuthzError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Organizational breadth a permission applies to
///
/// A grant at a wider scope implicitly covers the narrower scopes nested in
/// it. Variant order is breadth order, so the derived `Ord` is meaningful.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The actor's own records
    #[default]
    Own,
    /// Records in the actor's department
    Department,
    /// Organization-wide
    Company,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Own, Scope::Department, Scope::Company];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Own => "own",
            Scope::Department => "department",
            Scope::Company => "company",
        }
    }

    /// Whether a grant at this scope satisfies a request at `requested`
    ///
    /// - `Company` covers every scope
    /// - `Department` covers `Department` and `Own`
    /// - `Own` covers only `Own`
    pub fn covers(&self, requested: Scope) -> bool {
        *self >= requested
    }
}

impl FromStr for Scope {
    type Err = AuthzError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "own" => Ok(Scope::Own),
            "department" => Ok(Scope::Department),
            "company" => Ok(Scope::Company),
            other => Err(AuthzError::InvalidInput(format!("unknown scope '{}'", other))),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
