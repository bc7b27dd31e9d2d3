mod inmemory;
mod postgres;

use chrono::NaiveDate;
pub use inmemory::InMemoryItineraryRepo;
pub use postgres::PostgresItineraryRepo;
use wayfarer_domain::{Itinerary, ID};

#[async_trait::async_trait]
pub trait IItineraryRepo: Send + Sync {
    async fn insert(&self, itinerary: &Itinerary) -> anyhow::Result<()>;
    async fn find(&self, itinerary_id: &ID) -> Option<Itinerary>;
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Itinerary>>;
    /// Itineraries whose inclusive `[start_date, end_date]` window covers `date`
    async fn find_active_on(&self, date: NaiveDate) -> anyhow::Result<Vec<Itinerary>>;
    async fn delete(&self, itinerary_id: &ID) -> Option<Itinerary>;
}
