use serde::{Deserialize, Serialize};

use super::round_cents;
use crate::entities::TrafficDetails;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrafficSurchargeCalculator {
    pub rate_per_minute_delay: f64,
}

impl TrafficSurchargeCalculator {
    pub fn new(rate_per_minute_delay: f64) -> Self {
        Self {
            rate_per_minute_delay,
        }
    }

    pub fn surcharge(&self, scheduled_duration_min: f64, live_duration_min: Option<f64>) -> f64 {
        self.details(scheduled_duration_min, live_duration_min)
            .map(|details| details.surcharge)
            .unwrap_or(0.0)
    }

    /// Itemized delay, present only when live traffic is slower than scheduled.
    pub fn details(
        &self,
        scheduled_duration_min: f64,
        live_duration_min: Option<f64>,
    ) -> Option<TrafficDetails> {
        let live_duration_min = live_duration_min?;
        let delay_min = (live_duration_min - scheduled_duration_min).max(0.0);

        if delay_min <= 0.0 {
            return None;
        }

        Some(TrafficDetails {
            scheduled_duration_min,
            live_duration_min,
            delay_min,
            surcharge: round_cents(delay_min * self.rate_per_minute_delay),
        })
    }
}
