use chrono::{DateTime, Utc};

/// One hour of forecast data with a free-text description, e.g.
/// "Light rain showers".
#[derive(Debug, Clone)]
pub struct ForecastHour {
    pub date_time: DateTime<Utc>,
    pub description: String,
}

impl ForecastHour {
    pub fn mentions_rain(&self) -> bool {
        self.description.to_lowercase().contains("rain")
    }
}
