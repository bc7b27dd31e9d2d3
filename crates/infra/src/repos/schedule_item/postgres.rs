use super::IScheduleItemRepo;

use chrono::NaiveDate;
use sqlx::{types::Uuid, FromRow, PgPool};
use wayfarer_domain::{ScheduleItem, ID};

pub struct PostgresScheduleItemRepo {
    pool: PgPool,
}

impl PostgresScheduleItemRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduleItemRaw {
    schedule_item_uid: Uuid,
    itinerary_uid: Uuid,
    place_id: String,
    place_name: String,
    place_type: Option<String>,
    place_address: Option<String>,
    place_rating: Option<f64>,
    scheduled_date: NaiveDate,
    scheduled_time: String,
    duration_minutes: i32,
    notification_sent: bool,
}

impl From<ScheduleItemRaw> for ScheduleItem {
    fn from(raw: ScheduleItemRaw) -> Self {
        ScheduleItem {
            id: raw.schedule_item_uid.into(),
            itinerary_id: raw.itinerary_uid.into(),
            place_id: raw.place_id,
            place_name: raw.place_name,
            place_type: raw.place_type,
            place_address: raw.place_address,
            place_rating: raw.place_rating,
            scheduled_date: raw.scheduled_date,
            scheduled_time: raw.scheduled_time,
            duration_minutes: raw.duration_minutes,
            notification_sent: raw.notification_sent,
        }
    }
}

#[async_trait::async_trait]
impl IScheduleItemRepo for PostgresScheduleItemRepo {
    async fn insert(&self, item: &ScheduleItem) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO schedule_items
            (schedule_item_uid, itinerary_uid, place_id, place_name, place_type,
             place_address, place_rating, scheduled_date, scheduled_time,
             duration_minutes, notification_sent)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(*item.id.inner_ref())
        .bind(*item.itinerary_id.inner_ref())
        .bind(&item.place_id)
        .bind(&item.place_name)
        .bind(&item.place_type)
        .bind(&item.place_address)
        .bind(item.place_rating)
        .bind(item.scheduled_date)
        .bind(&item.scheduled_time)
        .bind(item.duration_minutes)
        .bind(item.notification_sent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, item_id: &ID) -> Option<ScheduleItem> {
        sqlx::query_as::<_, ScheduleItemRaw>(
            r#"
            SELECT * FROM schedule_items AS s
            WHERE s.schedule_item_uid = $1
            "#,
        )
        .bind(*item_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|item| item.into())
    }

    async fn find_by_itinerary(&self, itinerary_id: &ID) -> anyhow::Result<Vec<ScheduleItem>> {
        let items = sqlx::query_as::<_, ScheduleItemRaw>(
            r#"
            SELECT * FROM schedule_items AS s
            WHERE s.itinerary_uid = $1
            ORDER BY s.scheduled_date, s.scheduled_time
            "#,
        )
        .bind(*itinerary_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(items.into_iter().map(|i| i.into()).collect())
    }

    async fn find_by_date(&self, date: NaiveDate) -> anyhow::Result<Vec<ScheduleItem>> {
        let items = sqlx::query_as::<_, ScheduleItemRaw>(
            r#"
            SELECT * FROM schedule_items AS s
            WHERE s.scheduled_date = $1
            ORDER BY s.scheduled_time
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(items.into_iter().map(|i| i.into()).collect())
    }

    async fn find_unnotified_by_date(&self, date: NaiveDate) -> anyhow::Result<Vec<ScheduleItem>> {
        let items = sqlx::query_as::<_, ScheduleItemRaw>(
            r#"
            SELECT * FROM schedule_items AS s
            WHERE s.scheduled_date = $1 AND s.notification_sent = FALSE
            ORDER BY s.scheduled_time
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(items.into_iter().map(|i| i.into()).collect())
    }

    async fn mark_notification_sent(&self, item_id: &ID) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE schedule_items
            SET notification_sent = TRUE
            WHERE schedule_item_uid = $1
            "#,
        )
        .bind(*item_id.inner_ref())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, item_id: &ID) -> Option<ScheduleItem> {
        sqlx::query_as::<_, ScheduleItemRaw>(
            r#"
            DELETE FROM schedule_items AS s
            WHERE s.schedule_item_uid = $1
            RETURNING *
            "#,
        )
        .bind(*item_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|item| item.into())
    }
}
