//! Prescriber allow-list
//!
//! Passed per call to the engines; nothing holds on to it between passes.

use crate::domain::ids::Npi;
use std::collections::HashSet;

/// Set of prescriber NPIs whose claims are admitted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    npis: HashSet<Npi>,
}

impl AllowList {
    /// Creates an empty allow-list (admits nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an NPI
    pub fn insert(&mut self, npi: Npi) -> bool {
        self.npis.insert(npi)
    }

    /// Whether the NPI is admitted
    pub fn contains(&self, npi: &Npi) -> bool {
        self.npis.contains(npi)
    }

    /// Number of admitted NPIs
    pub fn len(&self) -> usize {
        self.npis.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.npis.is_empty()
    }
}

impl FromIterator<Npi> for AllowList {
    fn from_iter<I: IntoIterator<Item = Npi>>(iter: I) -> Self {
        Self {
            npis: iter.into_iter().collect(),
        }
    }
}

impl Extend<Npi> for AllowList {
    fn extend<I: IntoIterator<Item = Npi>>(&mut self, iter: I) {
        self.npis.extend(iter);
    }
}

/// Whether a claim's prescriber passes an optional allow-list
pub fn admits(allowed: Option<&AllowList>, npi: &Npi) -> bool {
    allowed.map_or(true, |list| list.contains(npi))
}
