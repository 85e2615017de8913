use chrono_tz::Tz;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{configuration_invalid_error, Error};
use crate::pricing::Tariff;

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Clone, Debug)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// Where approach legs to trip pickups start. No approach fee when unset.
    pub home_base: Option<String>,
    /// Where pickup legs for dispositions start.
    pub service_hub: Option<String>,
    pub routing_timeout: Duration,
    /// Zone that request dates and times are expressed in.
    pub timezone: Tz,
    pub tariff_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            home_base: None,
            service_hub: None,
            routing_timeout: Duration::from_secs(15),
            timezone: chrono_tz::Europe::Paris,
            tariff_path: None,
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str, value: &str, expected: &str) -> Result<T, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| configuration_invalid_error(&format!("{} must be {}", name, expected)))
}

impl Settings {
    #[tracing::instrument]
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let mut settings = Self::default();

        if let Some(addr) = optional_var("FIACRE_BIND_ADDR") {
            settings.bind_addr = parse_var("FIACRE_BIND_ADDR", &addr, "host:port")?;
        }

        settings.home_base = optional_var("FIACRE_HOME_BASE");
        settings.service_hub = optional_var("FIACRE_SERVICE_HUB");

        if let Some(secs) = optional_var("FIACRE_ROUTING_TIMEOUT_SECS") {
            let secs = parse_var("FIACRE_ROUTING_TIMEOUT_SECS", &secs, "an integer")?;
            settings.routing_timeout = Duration::from_secs(secs);
        }

        if let Some(zone) = optional_var("FIACRE_TIMEZONE") {
            settings.timezone = parse_var("FIACRE_TIMEZONE", &zone, "an IANA time zone")?;
        }

        settings.tariff_path = optional_var("FIACRE_TARIFF_PATH").map(PathBuf::from);

        Ok(settings)
    }

    pub fn tariff(&self) -> Result<Tariff, Error> {
        match &self.tariff_path {
            Some(path) => Tariff::load(path),
            None => Ok(Tariff::default()),
        }
    }
}
