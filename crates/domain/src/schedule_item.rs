use crate::itinerary::Itinerary;
use crate::shared::entity::{Entity, ID};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// Place categories considered outdoor for real-time weather tips.
pub const OUTDOOR_PLACE_TYPES: [&str; 5] = [
    "park",
    "zoo",
    "natural_feature",
    "tourist_attraction",
    "hiking",
];

#[derive(Error, Debug)]
pub enum ScheduleItemError {
    #[error("Scheduled time: {0} is not a valid HH:MM wall-clock time")]
    InvalidTime(String),
    #[error("Scheduled date: {date} is outside of the itinerary window {start} - {end}")]
    DateOutsideItinerary {
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// One planned visit to a place within an itinerary.
///
/// `notification_sent` is the idempotency guard for departure alerts:
/// it latches true once and is never reset.
#[derive(Debug, Clone)]
pub struct ScheduleItem {
    pub id: ID,
    pub itinerary_id: ID,
    pub place_id: String,
    pub place_name: String,
    pub place_type: Option<String>,
    pub place_address: Option<String>,
    pub place_rating: Option<f64>,
    pub scheduled_date: NaiveDate,
    /// Wall-clock time as "HH:MM"
    pub scheduled_time: String,
    pub duration_minutes: i32,
    pub notification_sent: bool,
}

impl ScheduleItem {
    /// Creates a schedule item after validating that the time parses as
    /// HH:MM and that the date falls inside the owning itinerary's window.
    pub fn new(
        itinerary: &Itinerary,
        place_id: impl Into<String>,
        place_name: impl Into<String>,
        place_type: Option<String>,
        scheduled_date: NaiveDate,
        scheduled_time: impl Into<String>,
        duration_minutes: i32,
    ) -> Result<Self, ScheduleItemError> {
        let scheduled_time = scheduled_time.into();
        if NaiveTime::parse_from_str(&scheduled_time, "%H:%M").is_err() {
            return Err(ScheduleItemError::InvalidTime(scheduled_time));
        }
        if !itinerary.is_active_on(scheduled_date) {
            return Err(ScheduleItemError::DateOutsideItinerary {
                date: scheduled_date,
                start: itinerary.start_date,
                end: itinerary.end_date,
            });
        }
        Ok(Self {
            id: Default::default(),
            itinerary_id: itinerary.id.clone(),
            place_id: place_id.into(),
            place_name: place_name.into(),
            place_type,
            place_address: None,
            place_rating: None,
            scheduled_date,
            scheduled_time,
            duration_minutes,
            notification_sent: false,
        })
    }

    /// The full scheduled timestamp, or `None` when the persisted
    /// wall-clock time is malformed.
    pub fn scheduled_datetime(&self) -> Option<NaiveDateTime> {
        NaiveTime::parse_from_str(&self.scheduled_time, "%H:%M")
            .ok()
            .map(|time| self.scheduled_date.and_time(time))
    }

    pub fn is_outdoor(&self) -> bool {
        match &self.place_type {
            Some(place_type) => {
                let place_type = place_type.to_lowercase();
                OUTDOOR_PLACE_TYPES
                    .iter()
                    .any(|outdoor| place_type.contains(outdoor))
            }
            None => false,
        }
    }
}

impl Entity<ID> for ScheduleItem {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
