use crate::shared::entity::{Entity, ID};
use chrono::NaiveDate;

/// A durable fact that `(user, place)` was already suggested as an
/// opportunity. Insert-only, unique per `(user, place)`, and the reason
/// the opportunity rule never suggests the same place twice.
#[derive(Debug, Clone)]
pub struct SentOpportunity {
    pub id: ID,
    pub user_id: ID,
    pub place_id: String,
    pub sent_at: NaiveDate,
}

impl SentOpportunity {
    pub fn new(user_id: ID, place_id: impl Into<String>, sent_at: NaiveDate) -> Self {
        Self {
            id: Default::default(),
            user_id,
            place_id: place_id.into(),
            sent_at,
        }
    }
}

impl Entity<ID> for SentOpportunity {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
