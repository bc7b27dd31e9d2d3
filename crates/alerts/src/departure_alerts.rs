use crate::shared::usecase::UseCase;
use chrono::Duration;
use std::collections::HashMap;
use tracing::{info, warn};
use wayfarer_domain::Notification;
use wayfarer_infra::WayfarerContext;

/// Smart departure alerts.
///
/// Scans today's not-yet-notified schedule items, keeps the ones whose
/// scheduled time falls inside the look-ahead window (both ends
/// inclusive), and pushes "Time for {place}" once the notify-at instant
/// has passed. `notify_at = scheduled - (travel time + buffer)`, where a
/// failed travel-time lookup degrades to a configured default.
///
/// The persisted `notification_sent` flag is latched right after the
/// push, so an item triggers at most one push ever, no matter how many
/// cycles observe it.
#[derive(Debug)]
pub struct SendDepartureAlertsUseCase;

#[derive(Debug, Default)]
pub struct DepartureAlertsSummary {
    /// Items inside the window belonging to an opted-in user with a token
    pub candidates: usize,
    pub pushes_sent: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum UseCaseError {
    #[error("Storage error: {0}")]
    StorageError(#[from] anyhow::Error),
}

#[async_trait::async_trait]
impl UseCase for SendDepartureAlertsUseCase {
    type Response = DepartureAlertsSummary;

    type Errors = UseCaseError;

    const NAME: &'static str = "SendDepartureAlerts";

    async fn execute(&mut self, ctx: &WayfarerContext) -> Result<Self::Response, Self::Errors> {
        let now = ctx.sys.now().naive_utc();
        let today = now.date();
        let window_end = now + Duration::minutes(ctx.config.departure_lookahead_mins);

        let mut summary = DepartureAlertsSummary::default();

        let upcoming_items = ctx
            .repos
            .schedule_items
            .find_unnotified_by_date(today)
            .await?;
        if upcoming_items.is_empty() {
            info!("No upcoming items found for departure alerts");
            return Ok(summary);
        }

        for item in upcoming_items {
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
            if !user.allow_smart_alerts {
                continue;
            }
            let token = match &user.fcm_token {
                Some(token) => token.clone(),
                None => continue,
            };
            summary.candidates += 1;

            let origin = ctx.services.location.current_location(&user);
            let travel_time_secs = ctx
                .services
                .directions
                .travel_time_secs(&origin, &item.place_id)
                .await
                .unwrap_or(ctx.config.default_travel_time_secs);
            let travel_time_mins = travel_time_secs / 60;

            let notify_at =
                item_dt - Duration::minutes(travel_time_mins + ctx.config.departure_buffer_mins);
            if now < notify_at {
                continue;
            }

            info!(
                "Sending departure alert for '{}' to {}",
                item.place_name, user.email
            );
            let title = format!("Time for {}", item.place_name);
            let body = format!(
                "Time to head out! It's a {}-minute ride. Tap for directions.",
                travel_time_mins
            );
            let mut data = HashMap::new();
            data.insert("screen".to_string(), "itinerary".to_string());
            data.insert("itineraryId".to_string(), itinerary.id.as_string());
            data.insert("itemId".to_string(), item.id.as_string());
            ctx.services.push.send(&token, &title, &body, data).await;

            // Latch the idempotency flag before moving on so that no
            // later cycle can re-evaluate this item.
            ctx.repos
                .schedule_items
                .mark_notification_sent(&item.id)
                .await?;
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::*;
    use crate::shared::usecase::execute;
    use std::sync::Arc;

    #[tokio::test]
    async fn fires_once_and_latches_the_idempotency_flag() {
        let test = setup_context(test_now());
        let fixtures = insert_user_with_trip(&test.ctx).await;
        // 20 minutes from now, travel 10 minutes, buffer 10 minutes:
        // notify_at is exactly now
        let item = insert_item(&test.ctx, &fixtures, "place-1", "Louvre", "10:20").await;
        test.directions.set_travel_time(Some(10 * 60));

        let res = execute(SendDepartureAlertsUseCase, &test.ctx)
            .await
            .expect("To run departure alerts");
        assert_eq!(res.candidates, 1);
        assert_eq!(res.pushes_sent, 1);

        let pushes = test.push.sent();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].title, "Time for Louvre");
        assert!(pushes[0].body.contains("10-minute ride"));
        assert_eq!(pushes[0].data.get("itemId"), Some(&item.id.as_string()));

        let stored = test
            .ctx
            .repos
            .schedule_items
            .find(&item.id)
            .await
            .expect("To find item");
        assert!(stored.notification_sent);

        // The push also produced an in-app audit record
        let notifications = test
            .ctx
            .repos
            .notifications
            .find_by_user(&fixtures.user.id)
            .await
            .expect("To find notifications");
        assert_eq!(notifications.len(), 1);

        // A second immediate run sends zero additional pushes
        let res = execute(SendDepartureAlertsUseCase, &test.ctx)
            .await
            .expect("To run departure alerts");
        assert_eq!(res.pushes_sent, 0);
        assert_eq!(test.push.sent().len(), 1);
    }

    #[tokio::test]
    async fn geo_failure_degrades_to_default_travel_time() {
        let test = setup_context(test_now());
        let fixtures = insert_user_with_trip(&test.ctx).await;
        insert_item(&test.ctx, &fixtures, "place-1", "Louvre", "10:20").await;
        // Directions lookup fails: the default of 15 minutes applies and
        // notify_at = 10:20 - 25min, already passed
        test.directions.set_travel_time(None);

        let res = execute(SendDepartureAlertsUseCase, &test.ctx)
            .await
            .expect("To run departure alerts");
        assert_eq!(res.pushes_sent, 1);
        assert!(test.push.sent()[0].body.contains("15-minute ride"));
    }

    #[tokio::test]
    async fn look_ahead_window_is_inclusive_at_both_ends() {
        let test = setup_context(test_now());
        let fixtures = insert_user_with_trip(&test.ctx).await;
        // Exactly at now + 90 minutes with an 80-minute ride:
        // notify_at = now, still a candidate and fires
        insert_item(&test.ctx, &fixtures, "place-1", "Louvre", "11:30").await;
        test.directions.set_travel_time(Some(80 * 60));

        let res = execute(SendDepartureAlertsUseCase, &test.ctx)
            .await
            .expect("To run departure alerts");
        assert_eq!(res.candidates, 1);
        assert_eq!(res.pushes_sent, 1);
        assert_eq!(test.push.sent().len(), 1);
    }

    #[tokio::test]
    async fn item_just_past_the_window_is_not_a_candidate() {
        let test = setup_context(test_now());
        let fixtures = insert_user_with_trip(&test.ctx).await;
        // One minute past the window end, even a huge travel time must
        // not make it a candidate
        insert_item(&test.ctx, &fixtures, "place-1", "Louvre", "11:31").await;
        test.directions.set_travel_time(Some(100 * 60));

        let res = execute(SendDepartureAlertsUseCase, &test.ctx)
            .await
            .expect("To run departure alerts");
        assert_eq!(res.candidates, 0);
        assert_eq!(res.pushes_sent, 0);
        assert!(test.push.sent().is_empty());
    }

    #[tokio::test]
    async fn candidate_not_yet_due_is_left_untouched() {
        let test = setup_context(test_now());
        let fixtures = insert_user_with_trip(&test.ctx).await;
        // 60 minutes out with a 10-minute ride: notify_at is 10:40,
        // so nothing fires on this cycle
        let item = insert_item(&test.ctx, &fixtures, "place-1", "Louvre", "11:00").await;
        test.directions.set_travel_time(Some(10 * 60));

        let res = execute(SendDepartureAlertsUseCase, &test.ctx)
            .await
            .expect("To run departure alerts");
        assert_eq!(res.candidates, 1);
        assert_eq!(res.pushes_sent, 0);
        assert!(test.push.sent().is_empty());

        let stored = test
            .ctx
            .repos
            .schedule_items
            .find(&item.id)
            .await
            .expect("To find item");
        assert!(!stored.notification_sent);
    }

    #[tokio::test]
    async fn opted_out_user_never_receives_departure_alerts() {
        let test = setup_context(test_now());
        let mut fixtures = insert_user_with_trip(&test.ctx).await;
        fixtures.user.allow_smart_alerts = false;
        test.ctx
            .repos
            .users
            .save(&fixtures.user)
            .await
            .expect("To save user");
        insert_item(&test.ctx, &fixtures, "place-1", "Louvre", "10:20").await;
        test.directions.set_travel_time(Some(10 * 60));

        let res = execute(SendDepartureAlertsUseCase, &test.ctx)
            .await
            .expect("To run departure alerts");
        assert_eq!(res.candidates, 0);
        assert_eq!(res.pushes_sent, 0);
        assert!(test.push.sent().is_empty());
    }

    #[tokio::test]
    async fn user_without_push_token_is_skipped() {
        let test = setup_context(test_now());
        let mut fixtures = insert_user_with_trip(&test.ctx).await;
        fixtures.user.fcm_token = None;
        test.ctx
            .repos
            .users
            .save(&fixtures.user)
            .await
            .expect("To save user");
        insert_item(&test.ctx, &fixtures, "place-1", "Louvre", "10:20").await;
        test.directions.set_travel_time(Some(10 * 60));

        let res = execute(SendDepartureAlertsUseCase, &test.ctx)
            .await
            .expect("To run departure alerts");
        assert_eq!(res.pushes_sent, 0);
        assert!(test.push.sent().is_empty());
    }

    #[tokio::test]
    async fn malformed_wall_clock_time_skips_the_item() {
        let test = setup_context(test_now());
        let fixtures = insert_user_with_trip(&test.ctx).await;
        let mut item = insert_item(&test.ctx, &fixtures, "place-1", "Louvre", "10:20").await;
        // Corrupt the persisted time directly, bypassing validation
        test.ctx
            .repos
            .schedule_items
            .delete(&item.id)
            .await
            .expect("To delete item");
        item.scheduled_time = "not-a-time".to_string();
        test.ctx
            .repos
            .schedule_items
            .insert(&item)
            .await
            .expect("To insert item");
        test.directions.set_travel_time(Some(10 * 60));

        let res = execute(SendDepartureAlertsUseCase, &test.ctx)
            .await
            .expect("To run departure alerts");
        assert_eq!(res.pushes_sent, 0);
        assert!(test.push.sent().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_propagates_to_the_cycle_handler() {
        let mut test = setup_context(test_now());
        test.ctx.repos.schedule_items =
            Arc::new(FailingScheduleItemRepo::wrapping(test.ctx.repos.clone()));

        assert!(execute(SendDepartureAlertsUseCase, &test.ctx)
            .await
            .is_err());
    }
}
