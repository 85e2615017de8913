mod helpers;
mod quote_api;

use std::sync::Arc;
use std::time::Duration;

use crate::{
    api::{RoutingAPI, API},
    config::Settings,
    error::Error,
    pricing::{DispositionFareCalculator, Tariff, TripFareCalculator},
};

pub type DynRouting = Arc<dyn RoutingAPI + Send + Sync>;

pub struct Engine {
    routing: DynRouting,
    tariff: Tariff,
    trips: TripFareCalculator,
    dispositions: DispositionFareCalculator,
    home_base: Option<String>,
    service_hub: Option<String>,
    routing_timeout: Duration,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(settings: &Settings, tariff: Tariff, routing: DynRouting) -> Result<Self, Error> {
        tariff.validate()?;

        if settings.service_hub.is_none() {
            tracing::warn!("no service hub configured, dispositions will be refused");
        }

        Ok(Self {
            routing,
            trips: TripFareCalculator::new(tariff.trip.clone()),
            dispositions: DispositionFareCalculator::new(tariff.disposition.clone()),
            tariff,
            home_base: settings.home_base.clone(),
            service_hub: settings.service_hub.clone(),
            routing_timeout: settings.routing_timeout,
        })
    }
}

impl API for Engine {}
