//! Domain identifier types with validation
//!
//! Newtype wrappers for claim, revert, prescriber, drug and chain identifiers.
//! Each type rejects empty input, so a loaded record can never carry a blank key.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a string identifier newtype with the shared constructor and trait set.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, rejecting empty or blank input
            pub fn new(id: impl Into<String>) -> Result<Self, String> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(concat!($label, " cannot be empty").to_string());
                }
                Ok(Self(id))
            }

            /// Returns the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes self and returns the inner String
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Claim identifier. Expected to be unique across a batch.
    ///
    /// ```
    /// use rxledger::domain::ids::ClaimId;
    ///
    /// let id = ClaimId::new("9b778873-d84d-497b-8c04-f0de70c302a7").unwrap();
    /// assert_eq!(id.as_str(), "9b778873-d84d-497b-8c04-f0de70c302a7");
    /// ```
    ClaimId,
    "Claim ID"
);

string_id!(
    /// Revert identifier
    RevertId,
    "Revert ID"
);

string_id!(
    /// National Provider Identifier of a prescriber or pharmacy location
    ///
    /// ```
    /// use rxledger::domain::ids::Npi;
    /// use std::str::FromStr;
    ///
    /// let npi = Npi::from_str("4444444444").unwrap();
    /// assert_eq!(npi.to_string(), "4444444444");
    /// ```
    Npi,
    "NPI"
);

string_id!(
    /// National Drug Code of a drug product
    Ndc,
    "NDC"
);

/// Pharmacy chain name with all whitespace removed
///
/// Chain names arrive in free text ("Health Mart", "health mart ") and are
/// compared after stripping every whitespace character.
///
/// # Examples
///
/// ```
/// use rxledger::domain::ids::ChainName;
///
/// let chain = ChainName::new(" Health  Mart ").unwrap();
/// assert_eq!(chain.as_str(), "HealthMart");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainName(String);

impl ChainName {
    /// Creates a chain name, removing whitespace
    ///
    /// # Returns
    ///
    /// Returns `Err` if nothing is left after whitespace removal
    pub fn new(name: impl AsRef<str>) -> Result<Self, String> {
        let compact: String = name
            .as_ref()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if compact.is_empty() {
            return Err("Chain name cannot be empty".to_string());
        }
        Ok(Self(compact))
    }

    /// Returns the chain name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChainName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChainName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChainName> for String {
    fn from(name: ChainName) -> Self {
        name.0
    }
}

impl AsRef<str> for ChainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_creation() {
        let id = ClaimId::new("9b778873-d84d-497b-8c04-f0de70c302a7").unwrap();
        assert_eq!(id.as_str(), "9b778873-d84d-497b-8c04-f0de70c302a7");
        assert_eq!(id.into_inner(), "9b778873-d84d-497b-8c04-f0de70c302a7");
    }

    #[test]
    fn test_ids_empty_fails() {
        assert!(ClaimId::new("").is_err());
        assert!(RevertId::new("   ").is_err());
        assert_eq!(Npi::new("").unwrap_err(), "NPI cannot be empty");
        assert_eq!(Ndc::new(" ").unwrap_err(), "NDC cannot be empty");
    }

    #[test]
    fn test_npi_from_str_and_display() {
        let npi: Npi = "1234567890".parse().unwrap();
        assert_eq!(format!("{npi}"), "1234567890");
    }

    #[test]
    fn test_ids_order_lexically() {
        let a = Ndc::new("00002323401").unwrap();
        let b = Ndc::new("00093752910").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let ndc = Ndc::new("00093752910").unwrap();
        let json = serde_json::to_string(&ndc).unwrap();
        assert_eq!(json, "\"00093752910\"");
        let back: Ndc = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ndc);
    }

    #[test]
    fn test_id_deserialize_rejects_empty() {
        assert!(serde_json::from_str::<ClaimId>("\"\"").is_err());
    }

    #[test]
    fn test_chain_name_strips_whitespace() {
        let chain = ChainName::new("Health Mart").unwrap();
        assert_eq!(chain.as_str(), "HealthMart");

        let chain = ChainName::new("\tdoctor\n").unwrap();
        assert_eq!(chain.as_str(), "doctor");
    }

    #[test]
    fn test_chain_name_blank_fails() {
        assert!(ChainName::new("  \t ").is_err());
    }
}
