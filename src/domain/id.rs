//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Offer event identifier - newtype for type safety.
///
/// The inner String is private to ensure all construction goes through
/// the defined constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferEventId(String);

impl OfferEventId {
    /// Create a new OfferEventId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the offer event ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OfferEventId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for OfferEventId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// League identifier - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LeagueId(String);

impl LeagueId {
    /// Create a new LeagueId from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the league ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeagueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LeagueId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for LeagueId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Product surface / model variant that scored an offer.
///
/// Modes are a configured enumeration rather than a closed Rust enum so new
/// surfaces can be monitored without a release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Mode(String);

impl Mode {
    /// Create a new Mode tag.
    pub fn new(mode: impl Into<String>) -> Self {
        Self(mode.into())
    }

    /// Get the mode tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Mode {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for Mode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
