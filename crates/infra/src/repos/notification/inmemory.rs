use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use wayfarer_domain::{Notification, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let mut notifications = find_by(&self.notifications, |notification| {
            notification.user_id == *user_id
        });
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn mark_read(&self, notification_id: &ID) -> Option<Notification> {
        let mut updated = find(notification_id, &self.notifications)?;
        updated.is_read = true;
        save(&updated, &self.notifications);
        Some(updated)
    }
}
