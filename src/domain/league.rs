//! League configuration as seen by the segment resolver.

use std::fmt;

use super::id::LeagueId;

/// Per-league attributes resolved from the league-configuration store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueConfig {
    pub league_id: LeagueId,
    pub is_superflex: bool,
    pub is_tep: bool,
    /// Number of teams; `None` or zero when unknown.
    pub team_count: Option<u32>,
    /// Free-form league type label, e.g. "Dynasty" or "redraft".
    pub league_type: Option<String>,
    /// Optional specialty format label; "standard" means none.
    pub specialty_format: Option<String>,
}

impl LeagueConfig {
    /// Derive the coarse league class used in segment keys.
    #[must_use]
    pub fn class(&self) -> LeagueClass {
        LeagueClass::derive(self.league_type.as_deref(), self.specialty_format.as_deref())
    }
}

/// Coarse league class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LeagueClass {
    Dynasty,
    Redraft,
    Specialty,
    #[default]
    Unknown,
}

impl LeagueClass {
    /// Specialty wins when a non-standard specialty format is set; otherwise
    /// the league type label is matched on "dyn" / "red".
    #[must_use]
    pub fn derive(league_type: Option<&str>, specialty_format: Option<&str>) -> Self {
        let specialty = specialty_format
            .map(str::trim)
            .filter(|format| !format.is_empty())
            .is_some_and(|format| !format.eq_ignore_ascii_case("standard"));
        if specialty {
            return Self::Specialty;
        }

        let label = league_type.unwrap_or_default().to_ascii_lowercase();
        if label.contains("dyn") {
            Self::Dynasty
        } else if label.contains("red") {
            Self::Redraft
        } else {
            Self::Unknown
        }
    }

    /// Segment-key token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dynasty => "DYN",
            Self::Redraft => "RED",
            Self::Specialty => "SPC",
            Self::Unknown => "UNK",
        }
    }
}

impl fmt::Display for LeagueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
