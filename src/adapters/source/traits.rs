//! Record source abstraction
//!
//! This module defines the trait that input adapters implement to hand claims,
//! reverts and pharmacies to the analytics pipeline.

use crate::domain::{Claim, Pharmacy, Result, Revert};
use async_trait::async_trait;

/// Records read from a source plus the number of malformed records skipped
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    /// Well-formed records in source order
    pub records: Vec<T>,

    /// Records that failed to parse or validate
    pub malformed: usize,
}

impl<T> Loaded<T> {
    /// Create a result from records and a malformed count
    pub fn new(records: Vec<T>, malformed: usize) -> Self {
        Self { records, malformed }
    }

    /// Number of well-formed records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no well-formed records were loaded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append another result, keeping order
    pub fn append(&mut self, mut other: Loaded<T>) {
        self.records.append(&mut other.records);
        self.malformed += other.malformed;
    }
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self::new(Vec::new(), 0)
    }
}

impl<T> From<Vec<T>> for Loaded<T> {
    fn from(records: Vec<T>) -> Self {
        Self::new(records, 0)
    }
}

/// Source of the three record sets
///
/// Implementations skip malformed individual records and report how many they
/// skipped; only failures of a whole source (missing directory, unreadable file)
/// are errors.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Human-readable description for logs
    fn describe(&self) -> String;

    /// Retrieve all claims
    ///
    /// # Errors
    ///
    /// Returns an error if the claim source cannot be read.
    async fn retrieve_claims(&self) -> Result<Loaded<Claim>>;

    /// Retrieve all reverts
    ///
    /// # Errors
    ///
    /// Returns an error if the revert source cannot be read.
    async fn retrieve_reverts(&self) -> Result<Loaded<Revert>>;

    /// Retrieve all pharmacies
    ///
    /// # Errors
    ///
    /// Returns an error if the pharmacy source cannot be read.
    async fn retrieve_pharmacies(&self) -> Result<Loaded<Pharmacy>>;
}
