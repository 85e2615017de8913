use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

/// One measured leg, as returned by the routing collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoLeg {
    pub distance_km: f64,
    pub duration_min: f64,
    pub live_duration_min: Option<f64>,
}

impl GeoLeg {
    pub fn new(distance_km: f64, duration_min: f64) -> Self {
        Self {
            distance_km,
            duration_min,
            live_duration_min: None,
        }
    }

    pub fn with_live_duration(mut self, live_duration_min: f64) -> Self {
        self.live_duration_min = Some(live_duration_min);
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        let is_measure = |value: f64| value.is_finite() && value >= 0.0;

        if !is_measure(self.distance_km) {
            return Err(invalid_input_error("leg distance must be a non-negative number"));
        }

        if !is_measure(self.duration_min) {
            return Err(invalid_input_error("leg duration must be a non-negative number"));
        }

        if let Some(live) = self.live_duration_min {
            if !is_measure(live) {
                return Err(invalid_input_error(
                    "live leg duration must be a non-negative number",
                ));
            }
        }

        Ok(())
    }
}
