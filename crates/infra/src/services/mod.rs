mod expo_push;
mod google_maps;
mod google_weather;
mod location;

use crate::config::Config;
pub use expo_push::ExpoPushGateway;
pub use google_maps::{GoogleDirectionsApi, GooglePlacesApi};
pub use google_weather::GoogleWeatherApi;
pub use location::FixedLocationProvider;
use std::collections::HashMap;
use std::sync::Arc;
use wayfarer_domain::{ForecastHour, GeoPoint, PlaceCandidate, User};

#[async_trait::async_trait]
pub trait IDirectionsApi: Send + Sync {
    /// Travel time from `origin` to the place, or `None` on any failure.
    /// Callers degrade to a configured default instead of skipping.
    async fn travel_time_secs(&self, origin: &GeoPoint, destination_place_id: &str)
        -> Option<i64>;
}

#[async_trait::async_trait]
pub trait IPlacesApi: Send + Sync {
    async fn place_coordinates(&self, place_id: &str) -> Option<GeoPoint>;
    async fn text_search(
        &self,
        query: &str,
        location: &GeoPoint,
        radius_m: u32,
    ) -> Vec<PlaceCandidate>;
}

#[async_trait::async_trait]
pub trait IWeatherApi: Send + Sync {
    async fn hourly_forecast(&self, location: &GeoPoint) -> Option<Vec<ForecastHour>>;
}

#[async_trait::async_trait]
pub trait IPushGateway: Send + Sync {
    /// Delivery failures are logged, never surfaced: a failed push must
    /// not abort the calling rule's evaluation of other candidates.
    async fn send(&self, token: &str, title: &str, body: &str, data: HashMap<String, String>);
}

/// Where the user currently is. There is no real device location feed
/// yet, so the default implementation returns a fixed coordinate.
pub trait ICurrentLocationProvider: Send + Sync {
    fn current_location(&self, user: &User) -> GeoPoint;
}

#[derive(Clone)]
pub struct Services {
    pub directions: Arc<dyn IDirectionsApi>,
    pub places: Arc<dyn IPlacesApi>,
    pub weather: Arc<dyn IWeatherApi>,
    pub push: Arc<dyn IPushGateway>,
    pub location: Arc<dyn ICurrentLocationProvider>,
}

impl Services {
    pub fn create(config: &Config) -> Self {
        Self {
            directions: Arc::new(GoogleDirectionsApi::new(
                config.google_api_key.clone(),
                config.api_timeout_secs,
            )),
            places: Arc::new(GooglePlacesApi::new(
                config.google_api_key.clone(),
                config.api_timeout_secs,
            )),
            weather: Arc::new(GoogleWeatherApi::new(
                config.google_api_key.clone(),
                config.api_timeout_secs,
            )),
            push: Arc::new(ExpoPushGateway::new(config.api_timeout_secs)),
            location: Arc::new(FixedLocationProvider::default()),
        }
    }
}
