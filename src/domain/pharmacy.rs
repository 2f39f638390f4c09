//! Pharmacy domain model and the NPI to chain lookup

use super::ids::{ChainName, Npi};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A pharmacy location and the chain it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pharmacy {
    /// Chain name, whitespace removed
    pub chain: ChainName,

    /// Location NPI
    pub npi: Npi,
}

impl Pharmacy {
    /// Creates a pharmacy from raw strings
    ///
    /// # Errors
    ///
    /// Returns an error if the NPI is empty or the chain is blank
    pub fn new(chain: impl AsRef<str>, npi: impl Into<String>) -> Result<Self, String> {
        Ok(Self {
            chain: ChainName::new(chain)?,
            npi: Npi::new(npi)?,
        })
    }
}

/// NPI to chain membership
///
/// When the same NPI is listed more than once the last listing wins.
#[derive(Debug, Clone, Default)]
pub struct ChainDirectory {
    chains: HashMap<Npi, ChainName>,
}

impl ChainDirectory {
    /// Builds the directory from loaded pharmacies
    pub fn from_pharmacies(pharmacies: &[Pharmacy]) -> Self {
        let chains = pharmacies
            .iter()
            .map(|p| (p.npi.clone(), p.chain.clone()))
            .collect();
        Self { chains }
    }

    /// Looks up the chain of an NPI
    pub fn chain_of(&self, npi: &Npi) -> Option<&ChainName> {
        self.chains.get(npi)
    }

    /// Number of distinct NPIs
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Iterates over the known NPIs
    pub fn npis(&self) -> impl Iterator<Item = &Npi> {
        self.chains.keys()
    }
}
