use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{PackageTier, RateClass, ZoneAssessment};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    pub token: Uuid,
    #[serde(flatten)]
    pub details: QuoteDetails,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteDetails {
    Trip(TripPricing),
    Disposition(DispositionPricing),
}

impl Quote {
    pub fn new(details: QuoteDetails) -> Self {
        Self {
            token: Uuid::new_v4(),
            details,
        }
    }

    pub fn final_price(&self) -> f64 {
        match &self.details {
            QuoteDetails::Trip(pricing) => pricing.final_price,
            QuoteDetails::Disposition(pricing) => pricing.final_price,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripPricing {
    pub distance_km: f64,
    pub duration_min: f64,
    pub rate_class: RateClass,
    pub rate_per_km: f64,
    pub base_price: f64,
    /// Base price floored to the minimum fare.
    pub trip_price: f64,
    pub approach_fee: f64,
    pub approach: Option<ZoneAssessment>,
    pub traffic_surcharge: f64,
    pub traffic: Option<TrafficDetails>,
    pub final_price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrafficDetails {
    pub scheduled_duration_min: f64,
    pub live_duration_min: f64,
    pub delay_min: f64,
    pub surcharge: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispositionPricing {
    pub package: PackageTier,
    pub rate_class: RateClass,
    pub base_price: f64,
    pub estimated_km: f64,
    pub included_km: u32,
    pub extra_km: f64,
    pub extra_km_rate: f64,
    pub extra_km_price: f64,
    pub pickup_zone: ZoneAssessment,
    pub pickup_fee: f64,
    pub final_price: f64,
    pub deposit: f64,
    pub balance: f64,
}
