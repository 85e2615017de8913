use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{invalid_input_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKey {
    Confort,
    Decouverte,
    Prestige,
    Custom,
}

impl PackageKey {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Confort => "confort",
            Self::Decouverte => "decouverte",
            Self::Prestige => "prestige",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PackageKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "confort" => Ok(Self::Confort),
            "decouverte" => Ok(Self::Decouverte),
            "prestige" => Ok(Self::Prestige),
            "custom" => Ok(Self::Custom),
            _ => Err(invalid_input_error("unknown package")),
        }
    }
}

/// A resolved hire package: day/night prices and the distance allowance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PackageTier {
    pub key: PackageKey,
    pub duration_hours: f64,
    pub day_price: f64,
    pub night_price: f64,
    pub included_km: u32,
    pub extra_km_rate: f64,
}
