mod inmemory;
mod postgres;

pub use inmemory::InMemorySentOpportunityRepo;
pub use postgres::PostgresSentOpportunityRepo;
use std::collections::HashSet;
use wayfarer_domain::{SentOpportunity, ID};

#[async_trait::async_trait]
pub trait ISentOpportunityRepo: Send + Sync {
    /// Fails with a uniqueness violation when `(user, place)` was already
    /// recorded. That constraint is the only concurrency defense the
    /// opportunity rule has, so both implementations must enforce it.
    async fn insert(&self, opportunity: &SentOpportunity) -> anyhow::Result<()>;
    async fn find_place_ids_by_user(&self, user_id: &ID) -> anyhow::Result<HashSet<String>>;
}
