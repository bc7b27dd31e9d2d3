mod itinerary;
mod notification;
mod schedule_item;
mod sent_opportunity;
mod shared;
mod user;

use itinerary::{InMemoryItineraryRepo, PostgresItineraryRepo};
use notification::{InMemoryNotificationRepo, PostgresNotificationRepo};
use schedule_item::{InMemoryScheduleItemRepo, PostgresScheduleItemRepo};
use sent_opportunity::{InMemorySentOpportunityRepo, PostgresSentOpportunityRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use itinerary::IItineraryRepo;
pub use notification::INotificationRepo;
pub use schedule_item::IScheduleItemRepo;
pub use sent_opportunity::ISentOpportunityRepo;
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub users: Arc<dyn IUserRepo>,
    pub itineraries: Arc<dyn IItineraryRepo>,
    pub schedule_items: Arc<dyn IScheduleItemRepo>,
    pub sent_opportunities: Arc<dyn ISentOpportunityRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            itineraries: Arc::new(PostgresItineraryRepo::new(pool.clone())),
            schedule_items: Arc::new(PostgresScheduleItemRepo::new(pool.clone())),
            sent_opportunities: Arc::new(PostgresSentOpportunityRepo::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepo::new()),
            itineraries: Arc::new(InMemoryItineraryRepo::new()),
            schedule_items: Arc::new(InMemoryScheduleItemRepo::new()),
            sent_opportunities: Arc::new(InMemorySentOpportunityRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
        }
    }
}
