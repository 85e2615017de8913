use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::entities::{GeoLeg, PricingRequest, Quote};
use crate::error::{Error, RoutingFailure};
use crate::pricing::Tariff;

/// Routing/distance collaborator.
#[async_trait]
pub trait RoutingAPI {
    /// `departure` is the local wall-clock departure, used for live traffic.
    async fn measure(
        &self,
        origin: &str,
        destination: &str,
        departure: Option<NaiveDateTime>,
    ) -> Result<GeoLeg, RoutingFailure>;
}

#[async_trait]
pub trait QuoteAPI {
    async fn create_quote(&self, request: PricingRequest) -> Result<Quote, Error>;

    fn tariff(&self) -> Tariff;
}

pub trait API: QuoteAPI {}
