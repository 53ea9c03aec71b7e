// src/domain/decade.rs
//
// Decade tokens accepted by discovery.
// The table is fixed; anything else is rejected before any request is made.

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decade {
    #[serde(rename = "2020s")]
    Twenties2020,
    #[serde(rename = "2010s")]
    Tens2010,
    #[serde(rename = "2000s")]
    Noughties2000,
    #[serde(rename = "1990s")]
    Nineties1990,
    #[serde(rename = "1980s")]
    Eighties1980,
    #[serde(rename = "1970s")]
    Seventies1970,
    #[serde(rename = "1960s")]
    Sixties1960,
}

impl Decade {
    pub const ALL: [Decade; 7] = [
        Decade::Twenties2020,
        Decade::Tens2010,
        Decade::Noughties2000,
        Decade::Nineties1990,
        Decade::Eighties1980,
        Decade::Seventies1970,
        Decade::Sixties1960,
    ];

    /// Inclusive year range queried for this decade
    ///
    /// The current decade stops at 2024.
    pub fn years(self) -> RangeInclusive<i32> {
        match self {
            Decade::Twenties2020 => 2020..=2024,
            Decade::Tens2010 => 2010..=2019,
            Decade::Noughties2000 => 2000..=2009,
            Decade::Nineties1990 => 1990..=1999,
            Decade::Eighties1980 => 1980..=1989,
            Decade::Seventies1970 => 1970..=1979,
            Decade::Sixties1960 => 1960..=1969,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Decade::Twenties2020 => "2020s",
            Decade::Tens2010 => "2010s",
            Decade::Noughties2000 => "2000s",
            Decade::Nineties1990 => "1990s",
            Decade::Eighties1980 => "1980s",
            Decade::Seventies1970 => "1970s",
            Decade::Sixties1960 => "1960s",
        }
    }
}

impl FromStr for Decade {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decade::ALL
            .into_iter()
            .find(|decade| decade.token() == s)
            .ok_or_else(|| DomainError::InvalidDecade(s.to_string()))
    }
}

impl std::fmt::Display for Decade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}
