use crate::shared::usecase::UseCase;
use chrono::Duration;
use std::collections::HashMap;
use tracing::{info, warn};
use wayfarer_domain::Notification;
use wayfarer_infra::WayfarerContext;

/// Real-time weather tips.
///
/// Checks every outdoor item scheduled within the next few hours
/// against the hourly forecast at the place, and suggests a nearby
/// indoor alternative when rain is expected around the visit.
///
/// Unlike departure alerts there is no persisted guard, so a rainy
/// forecast produces a fresh tip on every cycle while the item stays in
/// the look-ahead window.
#[derive(Debug)]
pub struct SendWeatherTipsUseCase;

#[derive(Debug, Default)]
pub struct WeatherTipsSummary {
    /// Outdoor items in the window whose owner is opted in and reachable
    pub candidates: usize,
    pub pushes_sent: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum UseCaseError {
    #[error("Storage error: {0}")]
    StorageError(#[from] anyhow::Error),
}

#[async_trait::async_trait]
impl UseCase for SendWeatherTipsUseCase {
    type Response = WeatherTipsSummary;

    type Errors = UseCaseError;

    const NAME: &'static str = "SendWeatherTips";

    async fn execute(&mut self, ctx: &WayfarerContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.now().naive_utc();
        let today = now.date();
        let window_end = now + Duration::hours(ctx.config.weather_lookahead_hours);

        let mut summary = WeatherTipsSummary::default();

        let todays_items = ctx.repos.schedule_items.find_by_date(today).await?;
        for item in todays_items {
            if !item.is_outdoor() {
                continue;
            }
            let item_dt = match item.scheduled_datetime() {
                Some(dt) => dt,
                None => {
                    warn!(
                        "Schedule item: {} has a malformed scheduled time: {}",
                        item.id, item.scheduled_time
                    );
                    continue;
                }
            };
            if item_dt < now || item_dt > window_end {
                continue;
            }

            let itinerary = match ctx.repos.itineraries.find(&item.itinerary_id).await {
                Some(itinerary) => itinerary,
                None => continue,
            };
            let user = match ctx.repos.users.find(&itinerary.user_id).await {
                Some(user) => user,
                None => continue,
            };
            if !user.allow_real_time_tips {
                continue;
            }
            let token = match &user.fcm_token {
                Some(token) => token.clone(),
                None => continue,
            };
            summary.candidates += 1;

            let location = match ctx.services.places.place_coordinates(&item.place_id).await {
                Some(location) => location,
                None => {
                    warn!(
                        "Could not resolve coordinates for place: {}, skipping item: {}",
                        item.place_id, item.id
                    );
                    continue;
                }
            };
            let forecast = match ctx.services.weather.hourly_forecast(&location).await {
                Some(forecast) => forecast,
                None => continue,
            };

            let rain_expected = forecast.iter().any(|hour| {
                let distance = (hour.date_time.naive_utc() - item_dt).num_seconds().abs();
                distance < ctx.config.rain_window_secs && hour.mentions_rain()
            });
            if !rain_expected {
                continue;
            }

            let alternatives = ctx
                .services
                .places
                .text_search(
                    "indoor attraction",
                    &location,
                    ctx.config.indoor_search_radius_m,
                )
                .await;
            let alternative = alternatives
                .into_iter()
                .find(|candidate| candidate.place_id != item.place_id);
            let alternative = match alternative {
                Some(alternative) => alternative,
                None => continue,
            };

            info!(
                "Rain expected during '{}', tipping {} towards '{}'",
                item.place_name, user.email, alternative.name
            );
            let title = "☔️ Heads Up: Rain Expected!".to_string();
            let body = format!(
                "Rain is in the forecast for your visit to '{}'. Maybe check out '{}' instead?",
                item.place_name, alternative.name
            );
            let mut data = HashMap::new();
            data.insert("placeId".to_string(), alternative.place_id.clone());
            ctx.services.push.send(&token, &title, &body, data).await;

            ctx.repos
                .notifications
                .insert(&Notification::new(
                    user.id.clone(),
                    title,
                    body,
                    ctx.sys.now(),
                ))
                .await?;
            summary.pushes_sent += 1;
        }

        Ok(summary)
    }
}
