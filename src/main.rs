use std::sync::Arc;

use fiacre::config::Settings;
use fiacre::engine::Engine;
use fiacre::error::Error;
use fiacre::external::google_maps::GoogleMaps;
use fiacre::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env()?;
    let tariff = settings.tariff()?;
    let routing = GoogleMaps::from_env(settings.timezone)?;

    let engine = Engine::new(&settings, tariff, Arc::new(routing))?;

    serve(engine, settings.bind_addr).await
}
