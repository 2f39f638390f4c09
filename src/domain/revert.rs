//! Revert domain model

use super::ids::{ClaimId, RevertId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A later cancellation of exactly one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revert {
    /// Revert identifier
    pub id: RevertId,

    /// The claim this revert cancels
    pub claim_id: ClaimId,

    /// When the revert was submitted
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub timestamp: NaiveDateTime,
}

impl Revert {
    /// Creates a revert from raw identifiers
    ///
    /// # Errors
    ///
    /// Returns an error if either identifier is empty
    pub fn new(
        id: impl Into<String>,
        claim_id: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Result<Self, String> {
        Ok(Self {
            id: RevertId::new(id)?,
            claim_id: ClaimId::new(claim_id)?,
            timestamp,
        })
    }
}
