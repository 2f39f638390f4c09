//! Claim domain model
//!
//! A claim is one pharmacy fill: who prescribed it, which drug, how much,
//! at what unit price.

use super::ids::{ClaimId, Ndc, Npi};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A pharmacy claim
///
/// # Examples
///
/// ```
/// use rxledger::domain::claim::Claim;
/// use rxledger::domain::timestamp::parse_timestamp;
///
/// let claim = Claim::builder()
///     .id("9b778873-d84d-497b-8c04-f0de70c302a7")
///     .npi("4444444444")
///     .ndc("00093752910")
///     .price(60849.0)
///     .quantity(90.0)
///     .timestamp(parse_timestamp("2024-03-01T21:09:01").unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(claim.npi.as_str(), "4444444444");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique claim identifier
    pub id: ClaimId,

    /// Prescriber NPI
    pub npi: Npi,

    /// Drug NDC
    pub ndc: Ndc,

    /// Price of the fill
    pub price: f64,

    /// Dispensed quantity
    pub quantity: f64,

    /// When the claim was submitted
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub timestamp: NaiveDateTime,
}

impl Claim {
    /// Creates a new builder for constructing a Claim
    pub fn builder() -> ClaimBuilder {
        ClaimBuilder::default()
    }

    /// Checks the numeric fields
    ///
    /// # Errors
    ///
    /// Returns an error if price or quantity is negative, NaN or infinite
    pub fn validate(&self) -> Result<(), String> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(format!(
                "claim {}: price must be a non-negative number, got {}",
                self.id, self.price
            ));
        }
        if !self.quantity.is_finite() || self.quantity < 0.0 {
            return Err(format!(
                "claim {}: quantity must be a non-negative number, got {}",
                self.id, self.quantity
            ));
        }
        Ok(())
    }
}

/// Builder for constructing Claim instances
#[derive(Debug, Default)]
pub struct ClaimBuilder {
    id: Option<String>,
    npi: Option<String>,
    ndc: Option<String>,
    price: Option<f64>,
    quantity: Option<f64>,
    timestamp: Option<NaiveDateTime>,
}

impl ClaimBuilder {
    /// Creates a new ClaimBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the claim ID
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the prescriber NPI
    pub fn npi(mut self, npi: impl Into<String>) -> Self {
        self.npi = Some(npi.into());
        self
    }

    /// Sets the drug NDC
    pub fn ndc(mut self, ndc: impl Into<String>) -> Self {
        self.ndc = Some(ndc.into());
        self
    }

    /// Sets the price
    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the quantity
    pub fn quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets the timestamp
    pub fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builds and validates the Claim
    ///
    /// # Errors
    ///
    /// Returns an error if a field is missing or invalid
    pub fn build(self) -> Result<Claim, String> {
        let claim = Claim {
            id: ClaimId::new(self.id.ok_or("id is required")?)?,
            npi: Npi::new(self.npi.ok_or("npi is required")?)?,
            ndc: Ndc::new(self.ndc.ok_or("ndc is required")?)?,
            price: self.price.ok_or("price is required")?,
            quantity: self.quantity.ok_or("quantity is required")?,
            timestamp: self.timestamp.ok_or("timestamp is required")?,
        };
        claim.validate()?;
        Ok(claim)
    }
}
