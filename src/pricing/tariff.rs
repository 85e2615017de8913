use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::{RateClassifier, TrafficSurchargeCalculator, ZoneFeeRule, ZoneResolver};
use crate::error::{configuration_invalid_error, configuration_missing_error, Error};

/// Every rate, radius and threshold of one market.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tariff {
    pub trip: TripTariff,
    pub disposition: DispositionTariff,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TripTariff {
    pub classifier: RateClassifier,
    pub day_rate_per_km: f64,
    pub night_rate_per_km: f64,
    pub minimum_fare: f64,
    pub approach_zone: ZoneResolver,
    pub traffic: TrafficSurchargeCalculator,
}

impl Default for TripTariff {
    fn default() -> Self {
        Self {
            classifier: RateClassifier::new(20, 7),
            day_rate_per_km: 2.0,
            night_rate_per_km: 2.5,
            minimum_fare: 15.0,
            approach_zone: ZoneResolver::new(
                20.0,
                ZoneFeeRule::PerKm {
                    day_rate: 0.30,
                    night_rate: 0.20,
                },
            ),
            traffic: TrafficSurchargeCalculator::new(0.30),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispositionTariff {
    pub classifier: RateClassifier,
    pub tiers: TierTable,
    /// Distance allowance granted per hour of a custom package.
    pub custom_km_per_hour: f64,
    /// Decimal places kept on custom package prices.
    pub custom_price_precision: u32,
    pub pickup_zone: ZoneResolver,
    pub deposit_share: f64,
}

impl Default for DispositionTariff {
    fn default() -> Self {
        Self {
            classifier: RateClassifier::new(19, 7),
            tiers: TierTable::default(),
            custom_km_per_hour: 25.0,
            custom_price_precision: 0,
            pickup_zone: ZoneResolver::new(
                30.0,
                ZoneFeeRule::HourlyRoundTrip {
                    day_rate: 45.0,
                    night_rate: 45.0,
                },
            ),
            deposit_share: 0.30,
        }
    }
}

/// The three named packages, shortest first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    pub confort: TierRate,
    pub decouverte: TierRate,
    pub prestige: TierRate,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierRate {
    pub duration_hours: f64,
    pub day_price: f64,
    pub night_price: f64,
    pub included_km: u32,
    pub extra_km_rate: f64,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            confort: TierRate {
                duration_hours: 1.0,
                day_price: 55.0,
                night_price: 70.0,
                included_km: 25,
                extra_km_rate: 2.20,
            },
            decouverte: TierRate {
                duration_hours: 4.0,
                day_price: 195.0,
                night_price: 245.0,
                included_km: 100,
                extra_km_rate: 1.95,
            },
            prestige: TierRate {
                duration_hours: 8.0,
                day_price: 360.0,
                night_price: 450.0,
                included_km: 200,
                extra_km_rate: 1.80,
            },
        }
    }
}

impl Tariff {
    /// Loads a market tariff from a JSON file.
    #[tracing::instrument]
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = fs::read_to_string(path)
            .map_err(|_| configuration_missing_error(&format!("tariff file {}", path.display())))?;

        let tariff: Tariff = serde_json::from_str(&raw)
            .map_err(|err| configuration_invalid_error(&format!("tariff file: {}", err)))?;

        tariff.validate()?;

        Ok(tariff)
    }

    pub fn validate(&self) -> Result<(), Error> {
        let tiers = &self.disposition.tiers;
        let hours = [
            tiers.confort.duration_hours,
            tiers.decouverte.duration_hours,
            tiers.prestige.duration_hours,
        ];

        if !(hours[0] > 0.0 && hours[0] < hours[1] && hours[1] < hours[2]) {
            return Err(configuration_invalid_error(
                "tier durations must be positive and strictly increasing",
            ));
        }

        for classifier in [&self.trip.classifier, &self.disposition.classifier] {
            if classifier.night_start_hour > 24 || classifier.night_end_hour > 24 {
                return Err(configuration_invalid_error("night window hours must be within 0..=24"));
            }
        }

        if !(0.0..=1.0).contains(&self.disposition.deposit_share) {
            return Err(configuration_invalid_error("deposit share must be within 0..=1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tariff_is_valid() {
        assert!(Tariff::default().validate().is_ok());
    }

    #[test]
    fn tariff_round_trips_through_json() {
        let tariff = Tariff::default();
        let raw = serde_json::to_string(&tariff).unwrap();

        let decoded: Tariff = serde_json::from_str(&raw).unwrap();

        assert_eq!(decoded, tariff);
    }

    #[test]
    fn rejects_unordered_tiers() {
        let mut tariff = Tariff::default();
        tariff.disposition.tiers.decouverte.duration_hours = 9.0;

        let err = tariff.validate().unwrap_err();

        assert_eq!(err.kind, crate::error::ErrorKind::ConfigurationInvalid);
    }

    #[test]
    fn malformed_tariff_file_is_invalid_configuration() {
        let name = format!("fiacre-tariff-{}.json", uuid::Uuid::new_v4());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, "{ \"trip\": 42 }").unwrap();

        let err = Tariff::load(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert_eq!(err.kind, crate::error::ErrorKind::ConfigurationInvalid);
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn missing_tariff_file_is_a_configuration_error() {
        let err = Tariff::load(Path::new("/nonexistent/tariff.json")).unwrap_err();

        assert_eq!(err.kind, crate::error::ErrorKind::ConfigurationMissing);
    }
}
