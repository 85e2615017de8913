use super::{helpers::measure_leg, Engine};

use async_trait::async_trait;

use crate::{
    api::QuoteAPI,
    entities::{
        DispositionPricing, DispositionRequest, PricingRequest, Quote, QuoteDetails, TripPricing,
        TripRequest,
    },
    error::{configuration_missing_error, Error},
    pricing::Tariff,
};

#[async_trait]
impl QuoteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn create_quote(&self, request: PricingRequest) -> Result<Quote, Error> {
        let details = match request {
            PricingRequest::Trip(request) => QuoteDetails::Trip(self.price_trip(request).await?),
            PricingRequest::Disposition(request) => {
                QuoteDetails::Disposition(self.price_disposition(request).await?)
            }
        };

        let quote = Quote::new(details);

        tracing::info!(token = %quote.token, final_price = quote.final_price(), "quote created");

        Ok(quote)
    }

    fn tariff(&self) -> Tariff {
        self.tariff.clone()
    }
}

impl Engine {
    async fn price_trip(&self, request: TripRequest) -> Result<TripPricing, Error> {
        let context = request.validate()?;
        let departure = Some(context.departure());

        let trip = measure_leg(self, &request.pickup, &request.dropoff, departure);
        let approach = async {
            match &self.home_base {
                Some(home) => Some(measure_leg(self, home, &request.pickup, departure).await),
                None => None,
            }
        };

        let (trip, approach) = futures::join!(trip, approach);

        // only the trip's own leg is fatal
        let pickup_leg = trip?;

        self.trips.price(&pickup_leg, approach, &context)
    }

    async fn price_disposition(
        &self,
        request: DispositionRequest,
    ) -> Result<DispositionPricing, Error> {
        let context = request.validate()?;
        let service_hub = self
            .service_hub
            .as_deref()
            .ok_or_else(|| configuration_missing_error("FIACRE_SERVICE_HUB"))?;

        // reject unknown durations before calling out
        self.dispositions
            .tiers()
            .resolve(request.package, request.custom_hours)?;

        let pickup_leg = measure_leg(self, service_hub, &request.pickup, None).await;

        self.dispositions.price(
            request.package,
            request.custom_hours,
            pickup_leg,
            request.estimated_km,
            &context,
        )
    }
}
