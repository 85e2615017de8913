use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneAssessment {
    pub within_free_zone: bool,
    pub distance_from_reference_km: f64,
    pub fee: f64,
    pub fee_breakdown: Option<FeeBreakdown>,
}

impl ZoneAssessment {
    pub fn free(distance_from_reference_km: f64) -> Self {
        Self {
            within_free_zone: true,
            distance_from_reference_km,
            fee: 0.0,
            fee_breakdown: None,
        }
    }
}

/// How an out-of-zone fee was computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum FeeBreakdown {
    Distance {
        distance_km: f64,
        rate_per_km: f64,
    },
    RoundTrip {
        one_way_min: f64,
        round_trip_min: f64,
        round_trip_hours: f64,
        hourly_rate: f64,
    },
}
