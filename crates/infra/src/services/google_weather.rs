use super::IWeatherApi;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, warn};
use wayfarer_domain::{ForecastHour, GeoPoint};

const WEATHER_API_URL: &str = "https://weather.googleapis.com/v1/forecast:getHourlyForecast";
const FORECAST_HOURS: u32 = 24;

/// Adapter for the Google Weather hourly forecast API
pub struct GoogleWeatherApi {
    client: Client,
    api_key: Option<String>,
}

impl GoogleWeatherApi {
    pub fn new(api_key: Option<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .expect("To create reqwest client"),
            api_key,
        }
    }
}

#[derive(Debug, Serialize)]
struct ForecastRequest {
    location: ForecastLocation,
    hours: u32,
}

#[derive(Debug, Serialize)]
struct ForecastLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastResponse {
    #[serde(default)]
    hourly_forecasts: Vec<ForecastHourRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastHourRaw {
    date_time: String,
    #[serde(default)]
    description: String,
}

impl ForecastHourRaw {
    fn into_forecast_hour(self) -> Option<ForecastHour> {
        let date_time = DateTime::parse_from_rfc3339(&self.date_time)
            .ok()?
            .with_timezone(&Utc);
        Some(ForecastHour {
            date_time,
            description: self.description,
        })
    }
}

#[async_trait::async_trait]
impl IWeatherApi for GoogleWeatherApi {
    async fn hourly_forecast(&self, location: &GeoPoint) -> Option<Vec<ForecastHour>> {
        let api_key = self.api_key.as_ref()?;

        let body = ForecastRequest {
            location: ForecastLocation {
                latitude: location.lat,
                longitude: location.lng,
            },
            hours: FORECAST_HOURS,
        };

        let res = match self
            .client
            .post(WEATHER_API_URL)
            .header("X-Goog-Api-Key", api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(e) => {
                error!("[Network Error] Google Weather API error: {:?}", e);
                return None;
            }
        };

        let data = match res.json::<ForecastResponse>().await {
            Ok(data) => data,
            Err(e) => {
                error!("[Unexpected Response] Google Weather API error: {:?}", e);
                return None;
            }
        };

        let hours: Vec<ForecastHour> = data
            .hourly_forecasts
            .into_iter()
            .filter_map(|raw| raw.into_forecast_hour())
            .collect();
        if hours.is_empty() {
            warn!(
                "Google Weather API returned no usable forecast hours for {}",
                location
            );
            return None;
        }
        Some(hours)
    }
}
