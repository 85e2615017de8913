//! Fare calculation: pure, deterministic pricing rules.
//!
//! Every calculator is built from an immutable slice of the [`Tariff`] and
//! holds no state between calls.

mod disposition;
mod package_tier;
mod rate_classifier;
mod tariff;
mod traffic;
mod trip;
mod zone_resolver;

pub use disposition::DispositionFareCalculator;
pub use package_tier::PackageTierResolver;
pub use rate_classifier::RateClassifier;
pub use tariff::{DispositionTariff, Tariff, TierRate, TierTable, TripTariff};
pub use traffic::TrafficSurchargeCalculator;
pub use trip::TripFareCalculator;
pub use zone_resolver::{RoutingFailurePolicy, ZoneFeeRule, ZoneResolver};

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

pub fn round_cents(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round_cents(33.000000000000004), 33.0);
        assert_eq!(round_cents(61.599999999999994), 61.6);
        assert_eq!(round_cents(2.675_1), 2.68);
    }

    #[test]
    fn rounds_half_up_to_whole_units() {
        assert_eq!(round_to(277.5, 0), 278.0);
        assert_eq!(round_to(277.49, 0), 277.0);
    }
}
