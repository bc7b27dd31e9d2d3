use crate::departure_alerts::SendDepartureAlertsUseCase;
use crate::opportunity_alerts::SendOpportunityAlertsUseCase;
use crate::shared::usecase::execute;
use crate::weather_tips::SendWeatherTipsUseCase;
use std::time::Duration;
use tracing::info;
use wayfarer_infra::WayfarerContext;

/// Runs the three alert rules once, in a fixed order. Each rule commits
/// its own state as it goes and a failing rule never blocks the rules
/// after it.
pub async fn run_alert_cycle(ctx: &WayfarerContext) {
    if let Ok(summary) = execute(SendDepartureAlertsUseCase, ctx).await {
        info!(
            "Departure alerts: {} candidates, {} pushes sent",
            summary.candidates, summary.pushes_sent
        );
    }
    if let Ok(summary) = execute(SendOpportunityAlertsUseCase, ctx).await {
        info!(
            "Opportunity alerts: {} candidates, {} pushes sent",
            summary.candidates, summary.pushes_sent
        );
    }
    if let Ok(summary) = execute(SendWeatherTipsUseCase, ctx).await {
        info!(
            "Weather tips: {} candidates, {} pushes sent",
            summary.candidates, summary.pushes_sent
        );
    }
}

/// Evaluates the alert rules on a fixed cadence until the process stops.
pub async fn run_forever(ctx: WayfarerContext) {
    info!(
        "Starting alert scheduler with an interval of {} seconds",
        ctx.config.scheduler_interval_secs
    );
    let mut interval =
        tokio::time::interval(Duration::from_secs(ctx.config.scheduler_interval_secs));
    loop {
        interval.tick().await;
        run_alert_cycle(&ctx).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::*;
    use std::sync::Arc;
    use wayfarer_domain::GeoPoint;

    #[tokio::test]
    async fn a_failing_rule_does_not_block_the_rules_after_it() {
        let mut test = setup_context(test_now());
        let fixtures = insert_user_with_trip(&test.ctx).await;
        insert_item(&test.ctx, &fixtures, "anchor-place", "Louvre", "09:00").await;
        test.places
            .set_coordinates(Some(GeoPoint::new(48.86, 2.33)));
        test.places
            .set_search_results(vec![place("garden-1", "Hidden Garden", Some(4.8))]);

        // Departure alerts read schedule items through a failing repo,
        // while opportunity alerts anchor on the itinerary instead
        test.ctx.repos.schedule_items =
            Arc::new(FailingScheduleItemRepo::wrapping(test.ctx.repos.clone()));

        run_alert_cycle(&test.ctx).await;

        let pushes = test.push.sent();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].title, "✨ Opportunity Nearby!");
    }

    #[tokio::test]
    async fn a_full_cycle_runs_every_rule() {
        let test = setup_context(test_now());
        let fixtures = insert_user_with_trip(&test.ctx).await;
        // Departure: due now. Weather: outdoor and rainy two hours out.
        insert_item(&test.ctx, &fixtures, "louvre-1", "Louvre", "10:20").await;
        insert_item_with_type(
            &test.ctx,
            &fixtures,
            "garden-1",
            "Luxembourg Gardens",
            Some("park".to_string()),
            "12:00",
        )
        .await;
        test.directions.set_travel_time(Some(10 * 60));
        test.places
            .set_coordinates(Some(GeoPoint::new(48.86, 2.33)));
        test.places
            .set_search_results(vec![place("bistro-1", "Corner Bistro", Some(4.8))]);
        test.weather.set_forecast(Some(vec![forecast_hour(
            test_now() + chrono::Duration::hours(2),
            "Light rain",
        )]));

        run_alert_cycle(&test.ctx).await;

        let titles: Vec<String> = test.push.sent().into_iter().map(|p| p.title).collect();
        assert_eq!(titles.len(), 3);
        assert!(titles.contains(&"Time for Louvre".to_string()));
        assert!(titles.contains(&"✨ Opportunity Nearby!".to_string()));
        assert!(titles.contains(&"☔️ Heads Up: Rain Expected!".to_string()));
    }
}
