//! Customer title enumeration.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// The customer's title as accepted by the gateway. `Blank` is the empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerTitle {
    Blank,
    Mr,
    Ms,
    Mrs,
    Miss,
    Dr,
    Sir,
    Prof,
}

impl CustomerTitle {
    pub const ALL: [CustomerTitle; 8] = [
        CustomerTitle::Blank,
        CustomerTitle::Mr,
        CustomerTitle::Ms,
        CustomerTitle::Mrs,
        CustomerTitle::Miss,
        CustomerTitle::Dr,
        CustomerTitle::Sir,
        CustomerTitle::Prof,
    ];

    /// Returns the exact wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerTitle::Blank => "",
            CustomerTitle::Mr => "Mr.",
            CustomerTitle::Ms => "Ms.",
            CustomerTitle::Mrs => "Mrs.",
            CustomerTitle::Miss => "Miss",
            CustomerTitle::Dr => "Dr.",
            CustomerTitle::Sir => "Sir.",
            CustomerTitle::Prof => "Prof.",
        }
    }
}

impl FromStr for CustomerTitle {
    type Err = ValidationError;

    /// Matching is exact: `"mr."` and `"Mr"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomerTitle::ALL
            .into_iter()
            .find(|title| title.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidTitle(s.to_string()))
    }
}

impl fmt::Display for CustomerTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CustomerTitle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CustomerTitle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
