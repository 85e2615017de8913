use serde::{Deserialize, Serialize};

use crate::entities::{PackageKey, TimeContext};
use crate::error::{invalid_input_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingRequest {
    Trip(TripRequest),
    Disposition(DispositionRequest),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TripRequest {
    pub pickup: String,
    pub dropoff: String,
    pub date: String,
    pub time: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DispositionRequest {
    pub package: PackageKey,
    #[serde(default)]
    pub custom_hours: Option<f64>,
    pub pickup: String,
    pub estimated_km: f64,
    pub date: String,
    pub time: String,
}

fn require_address(address: &str, field: &str) -> Result<(), Error> {
    if address.trim().is_empty() {
        return Err(invalid_input_error(&format!("{} address is required", field)));
    }

    Ok(())
}

impl TripRequest {
    pub fn validate(&self) -> Result<TimeContext, Error> {
        require_address(&self.pickup, "pickup")?;
        require_address(&self.dropoff, "dropoff")?;

        TimeContext::parse(&self.date, &self.time)
    }
}

impl DispositionRequest {
    pub fn validate(&self) -> Result<TimeContext, Error> {
        require_address(&self.pickup, "pickup")?;

        if !self.estimated_km.is_finite() || self.estimated_km <= 0.0 {
            return Err(invalid_input_error(
                "estimated distance must be a positive number",
            ));
        }

        TimeContext::parse(&self.date, &self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dispatches_on_kind_tag() {
        let request: PricingRequest = serde_json::from_value(json!({
            "kind": "disposition",
            "package": "custom",
            "custom_hours": 6.0,
            "pickup": "Gare de Rennes",
            "estimated_km": 120.0,
            "date": "2024-03-15",
            "time": "10:00",
        }))
        .unwrap();

        match request {
            PricingRequest::Disposition(disposition) => {
                assert_eq!(disposition.package, PackageKey::Custom);
                assert_eq!(disposition.custom_hours, Some(6.0));
            }
            _ => panic!("expected a disposition request"),
        }
    }

    #[test]
    fn unknown_package_is_rejected_while_decoding() {
        let result = serde_json::from_value::<PricingRequest>(json!({
            "kind": "disposition",
            "package": "platinum",
            "pickup": "Gare de Rennes",
            "estimated_km": 10.0,
            "date": "2024-03-15",
            "time": "10:00",
        }));

        assert!(result.is_err());
    }

    #[test]
    fn trip_requires_addresses() {
        let request = TripRequest {
            pickup: " ".into(),
            dropoff: "Aéroport de Rennes".into(),
            date: "2024-03-15".into(),
            time: "10:00".into(),
        };

        assert!(request.validate().unwrap_err().is_invalid_input());
    }

    fn disposition(estimated_km: f64) -> DispositionRequest {
        DispositionRequest {
            package: PackageKey::Confort,
            custom_hours: None,
            pickup: "Gare de Rennes".into(),
            estimated_km,
            date: "2024-03-15".into(),
            time: "10:00".into(),
        }
    }

    #[test]
    fn disposition_rejects_non_positive_distance() {
        for estimated_km in [-5.0, 0.0, f64::NAN] {
            let err = disposition(estimated_km).validate().unwrap_err();

            assert!(err.is_invalid_input(), "{}", estimated_km);
        }

        assert!(disposition(0.5).validate().is_ok());
    }
}
