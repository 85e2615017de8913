use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;

use crate::{
    api::RoutingAPI,
    entities::GeoLeg,
    error::{configuration_missing_error, Error, RoutingFailure},
};

const DEFAULT_API_BASE: &str = "maps.googleapis.com";

/// Distance Matrix client.
#[derive(Clone, Debug)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    timezone: Tz,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MatrixResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MatrixRow {
    elements: Vec<MatrixElement>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MatrixElement {
    status: String,
    distance: Option<Measure>,
    duration: Option<Measure>,
    duration_in_traffic: Option<Measure>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Measure {
    value: f64,
}

impl GoogleMaps {
    pub fn new(api_base: String, api_key: String, timezone: Tz) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            api_key,
            timezone,
        }
    }

    pub fn from_env(timezone: Tz) -> Result<Self, Error> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| configuration_missing_error("GOOGLE_MAPS_API_KEY"))?;
        let api_base = env::var("GOOGLE_MAPS_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        Ok(Self::new(api_base, api_key, timezone))
    }

    /// Unix timestamp of a local departure. Ambiguous autumn times take the
    /// first occurrence and times skipped in spring move forward an hour.
    fn local_timestamp(&self, departure: NaiveDateTime) -> Option<i64> {
        self.timezone
            .from_local_datetime(&departure)
            .earliest()
            .or_else(|| {
                self.timezone
                    .from_local_datetime(&(departure + Duration::hours(1)))
                    .earliest()
            })
            .map(|instant| instant.timestamp())
    }

    /// Past departures are dropped since the provider only accepts live
    /// traffic for the future.
    fn departure_timestamp(&self, departure: NaiveDateTime) -> Option<i64> {
        let timestamp = self.local_timestamp(departure)?;

        (timestamp >= Utc::now().timestamp()).then(|| timestamp)
    }
}

#[async_trait]
impl RoutingAPI for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn measure(
        &self,
        origin: &str,
        destination: &str,
        departure: Option<NaiveDateTime>,
    ) -> Result<GeoLeg, RoutingFailure> {
        let url = format!("https://{}/maps/api/distancematrix/json", self.api_base);

        let mut request = self
            .client
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(&[("origins", origin)])
            .query(&[("destinations", destination)])
            .query(&[("units", "metric"), ("mode", "driving"), ("language", "fr")]);

        if let Some(timestamp) = departure.and_then(|d| self.departure_timestamp(d)) {
            request = request.query(&[("departure_time", timestamp)]);
        }

        let res = request.send().await.map_err(|err| {
            tracing::warn!(%err, "distance matrix request failed");
            if err.is_timeout() {
                RoutingFailure::Timeout
            } else {
                RoutingFailure::Upstream
            }
        })?;

        let status_code = res.status().as_u16();

        if status_code == 429 {
            return Err(RoutingFailure::RateLimited);
        } else if status_code != 200 {
            tracing::warn!(status_code, "distance matrix returned an error status");
            return Err(RoutingFailure::Upstream);
        }

        let data: MatrixResponse = res.json().await.map_err(|_| RoutingFailure::Upstream)?;

        leg_from_response(data)
    }
}

fn leg_from_response(data: MatrixResponse) -> Result<GeoLeg, RoutingFailure> {
    match data.status.as_str() {
        "OK" => {}
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => return Err(RoutingFailure::RateLimited),
        status => {
            tracing::warn!(status, error_message = ?data.error_message, "distance matrix failure");
            return Err(RoutingFailure::Upstream);
        }
    }

    let element = data
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next())
        .ok_or(RoutingFailure::Upstream)?;

    match element.status.as_str() {
        "OK" => {}
        "NOT_FOUND" => return Err(RoutingFailure::LocationsNotFound),
        "ZERO_RESULTS" => return Err(RoutingFailure::NoRoute),
        "MAX_ROUTE_LENGTH_EXCEEDED" => return Err(RoutingFailure::RouteTooLong),
        _ => return Err(RoutingFailure::Upstream),
    }

    let distance = element.distance.ok_or(RoutingFailure::Upstream)?;
    let duration = element.duration.ok_or(RoutingFailure::Upstream)?;

    let leg = GeoLeg::new(
        (distance.value / 1000.0).round(),
        (duration.value / 60.0).round(),
    );

    Ok(match element.duration_in_traffic {
        Some(live) => leg.with_live_duration((live.value / 60.0).round()),
        None => leg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> MatrixResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn rounds_to_whole_km_and_minutes() {
        let data = response(json!({
            "status": "OK",
            "rows": [{ "elements": [{
                "status": "OK",
                "distance": { "value": 12_480.0 },
                "duration": { "value": 1_170.0 },
                "duration_in_traffic": { "value": 1_530.0 },
            }]}],
        }));

        let leg = leg_from_response(data).unwrap();

        assert_eq!(leg.distance_km, 12.0);
        assert_eq!(leg.duration_min, 20.0);
        assert_eq!(leg.live_duration_min, Some(26.0));
    }

    #[test]
    fn maps_element_statuses() {
        for (status, failure) in [
            ("NOT_FOUND", RoutingFailure::LocationsNotFound),
            ("ZERO_RESULTS", RoutingFailure::NoRoute),
            ("MAX_ROUTE_LENGTH_EXCEEDED", RoutingFailure::RouteTooLong),
        ] {
            let data = response(json!({
                "status": "OK",
                "rows": [{ "elements": [{ "status": status }] }],
            }));

            assert_eq!(leg_from_response(data).unwrap_err(), failure);
        }
    }

    #[test]
    fn maps_top_level_statuses() {
        let limited = response(json!({ "status": "OVER_QUERY_LIMIT" }));
        assert_eq!(leg_from_response(limited).unwrap_err(), RoutingFailure::RateLimited);

        let denied = response(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
        }));
        assert_eq!(leg_from_response(denied).unwrap_err(), RoutingFailure::Upstream);
    }

    fn maps() -> GoogleMaps {
        GoogleMaps::new(DEFAULT_API_BASE.into(), "key".into(), chrono_tz::Europe::Paris)
    }

    fn local(date: (i32, u32, u32), hour: u32, minute: u32) -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn utc(date: (i32, u32, u32), hour: u32, minute: u32) -> i64 {
        Utc.from_utc_datetime(&local(date, hour, minute)).timestamp()
    }

    #[test]
    fn drops_past_departures() {
        assert_eq!(maps().departure_timestamp(local((2020, 1, 1), 10, 0)), None);
    }

    #[test]
    fn summer_departures_use_summer_time() {
        let sent = maps().departure_timestamp(local((2030, 7, 1), 10, 0));

        assert_eq!(sent, Some(1_909_123_200));
        assert_eq!(sent, Some(utc((2030, 7, 1), 8, 0)));
    }

    #[test]
    fn winter_departures_use_standard_time() {
        let sent = maps().local_timestamp(local((2024, 1, 15), 10, 0));

        assert_eq!(sent, Some(utc((2024, 1, 15), 9, 0)));
    }

    #[test]
    fn departures_in_the_spring_gap_move_forward() {
        // 02:30 does not exist on 2030-03-31 in Paris
        let sent = maps().local_timestamp(local((2030, 3, 31), 2, 30));

        assert_eq!(sent, Some(utc((2030, 3, 31), 1, 30)));
    }

    #[test]
    fn repeated_autumn_hour_takes_the_first_occurrence() {
        let sent = maps().local_timestamp(local((2030, 10, 27), 2, 30));

        assert_eq!(sent, Some(utc((2030, 10, 27), 0, 30)));
    }
}
