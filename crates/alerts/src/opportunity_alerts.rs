use crate::shared::usecase::UseCase;
use std::collections::{HashMap, HashSet};
use tracing::{info, warn};
use wayfarer_domain::{Notification, ScheduleItem, SentOpportunity};
use wayfarer_infra::WayfarerContext;

/// Opportunity alerts.
///
/// For every user with a trip active today, searches for highly-rated
/// places near their earliest planned stop of the day and suggests the
/// best one they have not seen before. "Seen" covers both places already
/// on any of the user's itineraries and places suggested on a previous
/// cycle, so repeated runs walk down the ranking instead of repeating
/// themselves.
#[derive(Debug)]
pub struct SendOpportunityAlertsUseCase;

#[derive(Debug, Default)]
pub struct OpportunityAlertsSummary {
    /// Users with an active trip, opted in and reachable by push
    pub candidates: usize,
    pub pushes_sent: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum UseCaseError {
    #[error("Storage error: {0}")]
    StorageError(#[from] anyhow::Error),
}

#[async_trait::async_trait]
impl UseCase for SendOpportunityAlertsUseCase {
    type Response = OpportunityAlertsSummary;

    type Errors = UseCaseError;

    const NAME: &'static str = "SendOpportunityAlerts";

    async fn execute(&mut self, ctx: &WayfarerContext) -> Result<Self::Response, Self::Errors> {
        let today = ctx.sys.now().naive_utc().date();

        let mut summary = OpportunityAlertsSummary::default();

        let active_trips = ctx.repos.itineraries.find_active_on(today).await?;
        let mut traveling_user_ids = HashSet::new();
        for trip in &active_trips {
            traveling_user_ids.insert(trip.user_id.clone());
        }

        for user_id in traveling_user_ids {
            let user = match ctx.repos.users.find(&user_id).await {
                Some(user) => user,
                None => continue,
            };
            if !user.allow_opportunity_alerts {
                continue;
            }
            let token = match &user.fcm_token {
                Some(token) => token.clone(),
                None => continue,
            };
            summary.candidates += 1;

            let mut planned_items = Vec::new();
            for trip in ctx.repos.itineraries.find_by_user(&user.id).await? {
                planned_items.extend(
                    ctx.repos
                        .schedule_items
                        .find_by_itinerary(&trip.id)
                        .await?,
                );
            }

            // The anchor is the user's earliest stop today. HH:MM sorts
            // lexicographically.
            let anchor: Option<&ScheduleItem> = planned_items
                .iter()
                .filter(|item| item.scheduled_date == today)
                .min_by(|a, b| a.scheduled_time.cmp(&b.scheduled_time));
            let anchor = match anchor {
                Some(anchor) => anchor,
                None => continue,
            };

            let anchor_location = match ctx
                .services
                .places
                .place_coordinates(&anchor.place_id)
                .await
            {
                Some(location) => location,
                None => {
                    warn!(
                        "Could not resolve coordinates for place: {}, skipping user: {}",
                        anchor.place_id, user.email
                    );
                    continue;
                }
            };

            let mut candidates = ctx
                .services
                .places
                .text_search(
                    &user.opportunity_search_query(),
                    &anchor_location,
                    ctx.config.opportunity_search_radius_m,
                )
                .await;
            candidates.sort_by(|a, b| {
                b.rating_or_zero()
                    .partial_cmp(&a.rating_or_zero())
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut seen_place_ids = ctx
                .repos
                .sent_opportunities
                .find_place_ids_by_user(&user.id)
                .await?;
            for item in &planned_items {
                seen_place_ids.insert(item.place_id.clone());
            }

            let suggestion = candidates.into_iter().find(|candidate| {
                !seen_place_ids.contains(&candidate.place_id)
                    && candidate.rating_or_zero() >= ctx.config.opportunity_min_rating
            });
            let suggestion = match suggestion {
                Some(suggestion) => suggestion,
                None => continue,
            };

            // Record the suggestion before pushing. The unique
            // (user, place) constraint then blocks a concurrent cycle
            // from pushing the same place twice.
            let guard = SentOpportunity::new(user.id.clone(), &suggestion.place_id, today);
            if let Err(e) = ctx.repos.sent_opportunities.insert(&guard).await {
                warn!(
                    "Opportunity for place: {} was already recorded for {}: {:?}",
                    suggestion.place_id, user.email, e
                );
                continue;
            }

            info!(
                "Suggesting '{}' to {}",
                suggestion.name, user.email
            );
            let title = "✨ Opportunity Nearby!".to_string();
            let body = format!(
                "A highly-rated spot, '{}', is near your current plans. Tap to see more.",
                suggestion.name
            );
            let mut data = HashMap::new();
            data.insert("placeId".to_string(), suggestion.place_id.clone());
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
