use super::{round_cents, round_to, DispositionTariff, TierRate};
use crate::entities::{PackageKey, PackageTier};
use crate::error::{invalid_input_error, Error};

/// Longest custom disposition accepted, in hours.
pub const MAX_CUSTOM_HOURS: f64 = 24.0;

/// Resolves named packages and interpolates custom durations between them.
#[derive(Clone, Debug)]
pub struct PackageTierResolver {
    tariff: DispositionTariff,
}

impl PackageTierResolver {
    pub fn new(tariff: DispositionTariff) -> Self {
        Self { tariff }
    }

    pub fn resolve(
        &self,
        key: PackageKey,
        custom_hours: Option<f64>,
    ) -> Result<PackageTier, Error> {
        let tiers = &self.tariff.tiers;

        let rate = match (key, custom_hours) {
            (PackageKey::Custom, Some(hours)) => return self.resolve_custom(hours),
            (PackageKey::Custom, None) => {
                return Err(invalid_input_error("custom package requires a duration"))
            }
            (_, Some(_)) => {
                return Err(invalid_input_error(
                    "duration only applies to the custom package",
                ))
            }
            (PackageKey::Confort, None) => &tiers.confort,
            (PackageKey::Decouverte, None) => &tiers.decouverte,
            (PackageKey::Prestige, None) => &tiers.prestige,
        };

        Ok(PackageTier {
            key,
            duration_hours: rate.duration_hours,
            day_price: rate.day_price,
            night_price: rate.night_price,
            included_km: rate.included_km,
            extra_km_rate: rate.extra_km_rate,
        })
    }

    fn resolve_custom(&self, hours: f64) -> Result<PackageTier, Error> {
        if !hours.is_finite() || hours <= 0.0 {
            return Err(invalid_input_error("custom duration must be a positive number of hours"));
        }

        if hours > MAX_CUSTOM_HOURS {
            return Err(invalid_input_error(&format!(
                "custom duration cannot exceed {} hours",
                MAX_CUSTOM_HOURS
            )));
        }

        let precision = self.tariff.custom_price_precision;
        let included_km = (hours * self.tariff.custom_km_per_hour).round() as u32;

        Ok(PackageTier {
            key: PackageKey::Custom,
            duration_hours: hours,
            day_price: round_to(self.price_for(hours, |rate| rate.day_price), precision),
            night_price: round_to(self.price_for(hours, |rate| rate.night_price), precision),
            included_km,
            extra_km_rate: round_cents(self.km_rate_for(hours)),
        })
    }

    /// Scales the shortest tier below its duration, extends the longest
    /// tier's hourly rate past its duration, and interpolates linearly
    /// between bounding tiers in-between.
    fn price_for(&self, hours: f64, value: impl Fn(&TierRate) -> f64) -> f64 {
        let tiers = &self.tariff.tiers;
        let (first, last) = (&tiers.confort, &tiers.prestige);

        if hours <= first.duration_hours {
            return value(first) * hours / first.duration_hours;
        }

        if hours >= last.duration_hours {
            let hourly = value(last) / last.duration_hours;
            return value(last) + (hours - last.duration_hours) * hourly;
        }

        self.interpolate(hours, value)
    }

    /// Per-km overage rate; held flat outside the named tiers so it never
    /// rises with package size.
    fn km_rate_for(&self, hours: f64) -> f64 {
        let tiers = &self.tariff.tiers;

        if hours <= tiers.confort.duration_hours {
            return tiers.confort.extra_km_rate;
        }

        if hours >= tiers.prestige.duration_hours {
            return tiers.prestige.extra_km_rate;
        }

        self.interpolate(hours, |rate| rate.extra_km_rate)
    }

    fn interpolate(&self, hours: f64, value: impl Fn(&TierRate) -> f64) -> f64 {
        let tiers = &self.tariff.tiers;

        let (lower, upper) = if hours <= tiers.decouverte.duration_hours {
            (&tiers.confort, &tiers.decouverte)
        } else {
            (&tiers.decouverte, &tiers.prestige)
        };

        let ratio = (hours - lower.duration_hours) / (upper.duration_hours - lower.duration_hours);

        value(lower) + ratio * (value(upper) - value(lower))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> PackageTierResolver {
        PackageTierResolver::new(DispositionTariff::default())
    }

    fn custom(hours: f64) -> PackageTier {
        resolver().resolve(PackageKey::Custom, Some(hours)).unwrap()
    }

    #[test]
    fn named_tiers_use_reference_values() {
        let confort = resolver().resolve(PackageKey::Confort, None).unwrap();
        assert_eq!(
            (confort.day_price, confort.night_price, confort.included_km),
            (55.0, 70.0, 25)
        );

        let decouverte = resolver().resolve(PackageKey::Decouverte, None).unwrap();
        assert_eq!(decouverte.duration_hours, 4.0);
        assert_eq!(decouverte.extra_km_rate, 1.95);

        let prestige = resolver().resolve(PackageKey::Prestige, None).unwrap();
        assert_eq!(
            (prestige.day_price, prestige.night_price, prestige.included_km),
            (360.0, 450.0, 200)
        );
    }

    #[test]
    fn custom_is_continuous_at_named_tiers() {
        for key in [PackageKey::Confort, PackageKey::Decouverte, PackageKey::Prestige] {
            let named = resolver().resolve(key, None).unwrap();
            let custom = custom(named.duration_hours);

            assert_eq!(custom.day_price, named.day_price, "{}", key);
            assert_eq!(custom.night_price, named.night_price, "{}", key);
            assert_eq!(custom.included_km, named.included_km, "{}", key);
            assert_eq!(custom.extra_km_rate, named.extra_km_rate, "{}", key);
        }
    }

    #[test]
    fn six_hours_sits_halfway_between_decouverte_and_prestige() {
        let tier = custom(6.0);

        // 277.50 rounds to whole units
        assert_eq!(tier.day_price, 278.0);
        assert_eq!(tier.night_price, 348.0);
        assert_eq!(tier.included_km, 150);
        assert!(tier.extra_km_rate < 1.95 && tier.extra_km_rate > 1.8);
    }

    #[test]
    fn cent_precision_keeps_the_interpolated_price() {
        let mut tariff = DispositionTariff::default();
        tariff.custom_price_precision = 2;

        let tier = PackageTierResolver::new(tariff)
            .resolve(PackageKey::Custom, Some(6.0))
            .unwrap();

        assert_eq!(tier.day_price, 277.5);
    }

    #[test]
    fn short_custom_scales_confort() {
        let tier = custom(0.5);

        assert_eq!(tier.day_price, 28.0);
        assert_eq!(tier.night_price, 35.0);
        assert_eq!(tier.included_km, 13);
        assert_eq!(tier.extra_km_rate, 2.2);
    }

    #[test]
    fn long_custom_extends_prestige_hourly_rate() {
        let tier = custom(10.0);

        assert_eq!(tier.day_price, 450.0);
        assert_eq!(tier.night_price, 563.0);
        assert_eq!(tier.included_km, 250);
        assert_eq!(tier.extra_km_rate, 1.8);
    }

    #[test]
    fn custom_between_confort_and_decouverte() {
        let tier = custom(2.5);

        // 55 + 0.5 × 140
        assert_eq!(tier.day_price, 125.0);
        assert_eq!(tier.included_km, 63);
    }

    #[test]
    fn rejects_missing_or_non_positive_hours() {
        assert!(resolver()
            .resolve(PackageKey::Custom, None)
            .unwrap_err()
            .is_invalid_input());
        assert!(resolver()
            .resolve(PackageKey::Custom, Some(0.0))
            .unwrap_err()
            .is_invalid_input());
        assert!(resolver()
            .resolve(PackageKey::Custom, Some(f64::NAN))
            .unwrap_err()
            .is_invalid_input());
        assert!(resolver()
            .resolve(PackageKey::Confort, Some(3.0))
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn caps_custom_duration_at_a_day() {
        assert_eq!(custom(MAX_CUSTOM_HOURS).included_km, 600);

        for hours in [24.5, 1e12, f64::INFINITY] {
            let err = resolver()
                .resolve(PackageKey::Custom, Some(hours))
                .unwrap_err();

            assert!(err.is_invalid_input(), "{}", hours);
        }
    }
}
