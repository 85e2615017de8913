use super::Engine;

use chrono::NaiveDateTime;

use crate::{entities::GeoLeg, error::RoutingFailure};

/// Measures one leg, bounded by the configured routing timeout.
#[tracing::instrument(skip(engine))]
pub async fn measure_leg(
    engine: &Engine,
    origin: &str,
    destination: &str,
    departure: Option<NaiveDateTime>,
) -> Result<GeoLeg, RoutingFailure> {
    let measurement = engine.routing.measure(origin, destination, departure);

    match tokio::time::timeout(engine.routing_timeout, measurement).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout = ?engine.routing_timeout, "routing call timed out");
            Err(RoutingFailure::Timeout)
        }
    }
}
