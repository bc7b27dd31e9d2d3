use super::IItineraryRepo;

use chrono::NaiveDate;
use sqlx::{types::Uuid, FromRow, PgPool};
use wayfarer_domain::{Itinerary, ID};

pub struct PostgresItineraryRepo {
    pool: PgPool,
}

impl PostgresItineraryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ItineraryRaw {
    itinerary_uid: Uuid,
    user_uid: Uuid,
    name: String,
    budget: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl From<ItineraryRaw> for Itinerary {
    fn from(raw: ItineraryRaw) -> Self {
        Itinerary {
            id: raw.itinerary_uid.into(),
            user_id: raw.user_uid.into(),
            name: raw.name,
            budget: raw.budget,
            start_date: raw.start_date,
            end_date: raw.end_date,
        }
    }
}

#[async_trait::async_trait]
impl IItineraryRepo for PostgresItineraryRepo {
    async fn insert(&self, itinerary: &Itinerary) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO itineraries
            (itinerary_uid, user_uid, name, budget, start_date, end_date)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(*itinerary.id.inner_ref())
        .bind(*itinerary.user_id.inner_ref())
        .bind(&itinerary.name)
        .bind(&itinerary.budget)
        .bind(itinerary.start_date)
        .bind(itinerary.end_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, itinerary_id: &ID) -> Option<Itinerary> {
        sqlx::query_as::<_, ItineraryRaw>(
            r#"
            SELECT * FROM itineraries AS i
            WHERE i.itinerary_uid = $1
            "#,
        )
        .bind(*itinerary_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|itinerary| itinerary.into())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Itinerary>> {
        let itineraries = sqlx::query_as::<_, ItineraryRaw>(
            r#"
            SELECT * FROM itineraries AS i
            WHERE i.user_uid = $1
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(itineraries.into_iter().map(|i| i.into()).collect())
    }

    async fn find_active_on(&self, date: NaiveDate) -> anyhow::Result<Vec<Itinerary>> {
        let itineraries = sqlx::query_as::<_, ItineraryRaw>(
            r#"
            SELECT * FROM itineraries AS i
            WHERE i.start_date <= $1 AND i.end_date >= $1
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(itineraries.into_iter().map(|i| i.into()).collect())
    }

    async fn delete(&self, itinerary_id: &ID) -> Option<Itinerary> {
        sqlx::query_as::<_, ItineraryRaw>(
            r#"
            DELETE FROM itineraries AS i
            WHERE i.itinerary_uid = $1
            RETURNING *
            "#,
        )
        .bind(*itinerary_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|itinerary| itinerary.into())
    }
}
