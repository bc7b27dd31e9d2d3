mod departure_alerts;
mod job_schedulers;
mod opportunity_alerts;
mod shared;
mod weather_tips;

pub use departure_alerts::SendDepartureAlertsUseCase;
pub use job_schedulers::{run_alert_cycle, run_forever};
pub use opportunity_alerts::SendOpportunityAlertsUseCase;
pub use shared::usecase::{execute, UseCase};
pub use weather_tips::SendWeatherTipsUseCase;
