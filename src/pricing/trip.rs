use super::{round_cents, TripTariff};
use crate::entities::{GeoLeg, TimeContext, TripPricing};
use crate::error::{Error, RoutingFailure};

/// Prices a point-to-point trip.
#[derive(Clone, Debug)]
pub struct TripFareCalculator {
    tariff: TripTariff,
}

impl TripFareCalculator {
    pub fn new(tariff: TripTariff) -> Self {
        Self { tariff }
    }

    pub fn tariff(&self) -> &TripTariff {
        &self.tariff
    }

    /// `home_approach` is `None` when no home base is configured.
    pub fn price(
        &self,
        pickup_leg: &GeoLeg,
        home_approach: Option<Result<GeoLeg, RoutingFailure>>,
        context: &TimeContext,
    ) -> Result<TripPricing, Error> {
        pickup_leg.validate()?;

        let tariff = &self.tariff;
        let rate_class = tariff.classifier.classify(context);
        let rate_per_km = rate_class.select(tariff.day_rate_per_km, tariff.night_rate_per_km);

        let base_price = round_cents(pickup_leg.distance_km * rate_per_km);
        let trip_price = round_cents(base_price.max(tariff.minimum_fare));

        let approach = match home_approach {
            Some(leg) => {
                let leg = leg.as_ref().map_err(|failure| *failure);
                Some(tariff.approach_zone.assess(leg, rate_class)?)
            }
            None => None,
        };
        let approach_fee = approach.as_ref().map(|zone| zone.fee).unwrap_or(0.0);

        let traffic = tariff
            .traffic
            .details(pickup_leg.duration_min, pickup_leg.live_duration_min);
        let traffic_surcharge = traffic.as_ref().map(|t| t.surcharge).unwrap_or(0.0);

        let final_price = round_cents(trip_price + approach_fee + traffic_surcharge);

        Ok(TripPricing {
            distance_km: pickup_leg.distance_km,
            duration_min: pickup_leg.live_duration_min.unwrap_or(pickup_leg.duration_min),
            rate_class,
            rate_per_km,
            base_price,
            trip_price,
            approach_fee,
            approach,
            traffic_surcharge,
            traffic,
            final_price,
        })
    }
}
