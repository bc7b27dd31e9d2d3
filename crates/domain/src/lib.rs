mod itinerary;
mod notification;
mod opportunity;
mod place;
mod schedule_item;
mod shared;
mod user;
mod weather;

pub use itinerary::Itinerary;
pub use notification::Notification;
pub use opportunity::SentOpportunity;
pub use place::{GeoPoint, PlaceCandidate};
pub use schedule_item::{ScheduleItem, ScheduleItemError, OUTDOOR_PLACE_TYPES};
pub use shared::entity::{Entity, ID};
pub use user::User;
pub use weather::ForecastHour;
