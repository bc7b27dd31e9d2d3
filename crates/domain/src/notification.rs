use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};

/// In-app audit record written alongside every push.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: ID,
    pub user_id: ID,
    pub title: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: ID,
        title: impl Into<String>,
        body: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            title: title.into(),
            body: body.into(),
            is_read: false,
            created_at,
        }
    }
}

impl Entity<ID> for Notification {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
