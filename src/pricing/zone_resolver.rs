use serde::{Deserialize, Serialize};

use super::round_cents;
use crate::entities::{FeeBreakdown, GeoLeg, RateClass, ZoneAssessment};
use crate::error::{routing_unavailable_error, Error, RoutingFailure};

/// What to do when the distance to the reference point cannot be measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingFailurePolicy {
    /// Treat the location as inside the free zone (fee = 0).
    #[default]
    FailOpen,
    FailClosed,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ZoneFeeRule {
    /// `distance × rate`.
    PerKm { day_rate: f64, night_rate: f64 },
    /// `2 × one-way duration (h) × rate`.
    HourlyRoundTrip { day_rate: f64, night_rate: f64 },
}

/// Free-service zone around a reference point (home base or service hub).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneResolver {
    pub free_radius_km: f64,
    pub fee_rule: ZoneFeeRule,
    #[serde(default)]
    pub on_routing_failure: RoutingFailurePolicy,
}

impl ZoneResolver {
    pub fn new(free_radius_km: f64, fee_rule: ZoneFeeRule) -> Self {
        Self {
            free_radius_km,
            fee_rule,
            on_routing_failure: RoutingFailurePolicy::FailOpen,
        }
    }

    pub fn with_policy(mut self, on_routing_failure: RoutingFailurePolicy) -> Self {
        self.on_routing_failure = on_routing_failure;
        self
    }

    /// Assesses a leg measured from the reference point to the location.
    pub fn assess(
        &self,
        leg: Result<&GeoLeg, RoutingFailure>,
        rate_class: RateClass,
    ) -> Result<ZoneAssessment, Error> {
        let leg = match leg {
            Ok(leg) => leg,
            Err(failure) => return self.on_failure(failure),
        };

        leg.validate()?;

        if leg.distance_km <= self.free_radius_km {
            return Ok(ZoneAssessment::free(leg.distance_km));
        }

        let (fee, breakdown) = match self.fee_rule {
            ZoneFeeRule::PerKm {
                day_rate,
                night_rate,
            } => {
                let rate_per_km = rate_class.select(day_rate, night_rate);
                let breakdown = FeeBreakdown::Distance {
                    distance_km: leg.distance_km,
                    rate_per_km,
                };
                (round_cents(leg.distance_km * rate_per_km), breakdown)
            }
            ZoneFeeRule::HourlyRoundTrip {
                day_rate,
                night_rate,
            } => {
                let hourly_rate = rate_class.select(day_rate, night_rate);
                let round_trip_min = 2.0 * leg.duration_min;
                let round_trip_hours = round_trip_min / 60.0;
                let breakdown = FeeBreakdown::RoundTrip {
                    one_way_min: leg.duration_min,
                    round_trip_min,
                    round_trip_hours: round_cents(round_trip_hours),
                    hourly_rate,
                };
                (round_cents(round_trip_hours * hourly_rate), breakdown)
            }
        };

        Ok(ZoneAssessment {
            within_free_zone: false,
            distance_from_reference_km: leg.distance_km,
            fee,
            fee_breakdown: Some(breakdown),
        })
    }

    fn on_failure(&self, failure: RoutingFailure) -> Result<ZoneAssessment, Error> {
        match self.on_routing_failure {
            RoutingFailurePolicy::FailOpen => {
                tracing::warn!(%failure, "zone distance unavailable, assuming free zone");
                Ok(ZoneAssessment::free(0.0))
            }
            RoutingFailurePolicy::FailClosed => Err(routing_unavailable_error(failure)),
        }
    }
}
