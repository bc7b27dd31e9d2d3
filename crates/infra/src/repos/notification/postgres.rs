use super::INotificationRepo;

use chrono::{DateTime, Utc};
use sqlx::{types::Uuid, FromRow, PgPool};
use wayfarer_domain::{Notification, ID};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    user_uid: Uuid,
    title: String,
    body: String,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl From<NotificationRaw> for Notification {
    fn from(raw: NotificationRaw) -> Self {
        Notification {
            id: raw.notification_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            body: raw.body,
            is_read: raw.is_read,
            created_at: raw.created_at,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, user_uid, title, body, is_read, created_at)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(*notification.id.inner_ref())
        .bind(*notification.user_id.inner_ref())
        .bind(&notification.title)
        .bind(&notification.body)
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.user_uid = $1
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(notifications.into_iter().map(|n| n.into()).collect())
    }

    async fn mark_read(&self, notification_id: &ID) -> Option<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE notification_uid = $1
            RETURNING *
            "#,
        )
        .bind(*notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|notification| notification.into())
    }
}
