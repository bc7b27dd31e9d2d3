mod inmemory;
mod postgres;

use chrono::NaiveDate;
pub use inmemory::InMemoryScheduleItemRepo;
pub use postgres::PostgresScheduleItemRepo;
use wayfarer_domain::{ScheduleItem, ID};

#[async_trait::async_trait]
pub trait IScheduleItemRepo: Send + Sync {
    async fn insert(&self, item: &ScheduleItem) -> anyhow::Result<()>;
    async fn find(&self, item_id: &ID) -> Option<ScheduleItem>;
    async fn find_by_itinerary(&self, itinerary_id: &ID) -> anyhow::Result<Vec<ScheduleItem>>;
    async fn find_by_date(&self, date: NaiveDate) -> anyhow::Result<Vec<ScheduleItem>>;
    /// Items scheduled on `date` whose departure alert has not fired yet
    async fn find_unnotified_by_date(&self, date: NaiveDate) -> anyhow::Result<Vec<ScheduleItem>>;
    /// Latches the `notification_sent` idempotency flag. One-way: there is
    /// deliberately no operation that resets it.
    async fn mark_notification_sent(&self, item_id: &ID) -> anyhow::Result<()>;
    async fn delete(&self, item_id: &ID) -> Option<ScheduleItem>;
}
