use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// API key shared by the Google Directions, Places and Weather
    /// adapters. When unset every adapter degrades to its failure value.
    pub google_api_key: Option<String>,
    /// Seconds between scheduler cycles
    pub scheduler_interval_secs: u64,
    /// How far ahead of "now" a schedule item must be to become a
    /// departure alert candidate. Both window ends are inclusive.
    pub departure_lookahead_mins: i64,
    /// Extra minutes subtracted on top of travel time when deriving the
    /// notify-at instant
    pub departure_buffer_mins: i64,
    /// Fallback when the directions lookup fails or is unconfigured
    pub default_travel_time_secs: i64,
    /// Minimum rating for a place to qualify as an opportunity
    pub opportunity_min_rating: f64,
    pub opportunity_search_radius_m: u32,
    pub indoor_search_radius_m: u32,
    /// How far ahead outdoor items are checked for rain risk
    pub weather_lookahead_hours: i64,
    /// Forecast hours within this distance of the scheduled time count
    /// towards rain risk
    pub rain_window_secs: i64,
    /// Timeout for every external HTTP call
    pub api_timeout_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        let google_api_key = match std::env::var("GOOGLE_PLACES_API_KEY") {
            Ok(key) if !key.is_empty() => Some(key),
            _ => {
                warn!(
                    "GOOGLE_PLACES_API_KEY environment variable is not set. \
                     Geo, places and weather lookups will degrade to their fallbacks."
                );
                None
            }
        };

        let default_interval = "900";
        let scheduler_interval_secs =
            std::env::var("SCHEDULER_INTERVAL_SECS").unwrap_or(default_interval.into());
        let scheduler_interval_secs = match scheduler_interval_secs.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                warn!(
                    "The given SCHEDULER_INTERVAL_SECS: {} is not valid, falling back to the default: {}.",
                    scheduler_interval_secs, default_interval
                );
                default_interval.parse::<u64>().unwrap()
            }
        };

        Self {
            google_api_key,
            scheduler_interval_secs,
            departure_lookahead_mins: 90,
            departure_buffer_mins: 10,
            default_travel_time_secs: 15 * 60,
            opportunity_min_rating: 4.5,
            opportunity_search_radius_m: 2000,
            indoor_search_radius_m: 3000,
            weather_lookahead_hours: 6,
            rain_window_secs: 2 * 60 * 60,
            api_timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
