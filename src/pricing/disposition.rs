use super::{round_cents, DispositionTariff, PackageTierResolver};
use crate::entities::{DispositionPricing, GeoLeg, PackageKey, TimeContext};
use crate::error::{invalid_input_error, Error, RoutingFailure};

/// Prices an hourly chauffeur-hire package.
#[derive(Clone, Debug)]
pub struct DispositionFareCalculator {
    tariff: DispositionTariff,
    tiers: PackageTierResolver,
}

impl DispositionFareCalculator {
    pub fn new(tariff: DispositionTariff) -> Self {
        let tiers = PackageTierResolver::new(tariff.clone());

        Self { tariff, tiers }
    }

    pub fn tariff(&self) -> &DispositionTariff {
        &self.tariff
    }

    pub fn tiers(&self) -> &PackageTierResolver {
        &self.tiers
    }

    /// `pickup_leg` is measured from the service hub to the pickup address.
    pub fn price(
        &self,
        key: PackageKey,
        custom_hours: Option<f64>,
        pickup_leg: Result<GeoLeg, RoutingFailure>,
        estimated_km: f64,
        context: &TimeContext,
    ) -> Result<DispositionPricing, Error> {
        if !estimated_km.is_finite() || estimated_km <= 0.0 {
            return Err(invalid_input_error(
                "estimated distance must be a positive number",
            ));
        }

        let tier = self.tiers.resolve(key, custom_hours)?;
        let rate_class = self.tariff.classifier.classify(context);
        let base_price = rate_class.select(tier.day_price, tier.night_price);

        let extra_km = (estimated_km - tier.included_km as f64).max(0.0);
        let extra_km_price = round_cents(extra_km * tier.extra_km_rate);

        let pickup_zone = self
            .tariff
            .pickup_zone
            .assess(pickup_leg.as_ref().map_err(|failure| *failure), rate_class)?;
        let pickup_fee = pickup_zone.fee;

        let final_price = round_cents(base_price + extra_km_price + pickup_fee);

        // Both shares are rounded from the total, so they may miss it by a cent.
        let deposit = round_cents(final_price * self.tariff.deposit_share);
        let balance = round_cents(final_price * (1.0 - self.tariff.deposit_share));

        Ok(DispositionPricing {
            included_km: tier.included_km,
            extra_km_rate: tier.extra_km_rate,
            package: tier,
            rate_class,
            base_price,
            estimated_km,
            extra_km,
            extra_km_price,
            pickup_zone,
            pickup_fee,
            final_price,
            deposit,
            balance,
        })
    }
}
