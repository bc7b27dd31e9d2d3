use super::ISentOpportunityRepo;

use sqlx::PgPool;
use std::collections::HashSet;
use wayfarer_domain::{SentOpportunity, ID};

pub struct PostgresSentOpportunityRepo {
    pool: PgPool,
}

impl PostgresSentOpportunityRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ISentOpportunityRepo for PostgresSentOpportunityRepo {
    async fn insert(&self, opportunity: &SentOpportunity) -> anyhow::Result<()> {
        // The unique constraint on (user_uid, place_id) makes a duplicate
        // insert fail here instead of creating a second row.
        sqlx::query(
            r#"
            INSERT INTO sent_opportunities
            (sent_opportunity_uid, user_uid, place_id, sent_at)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(*opportunity.id.inner_ref())
        .bind(*opportunity.user_id.inner_ref())
        .bind(&opportunity.place_id)
        .bind(opportunity.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_place_ids_by_user(&self, user_id: &ID) -> anyhow::Result<HashSet<String>> {
        let place_ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT s.place_id FROM sent_opportunities AS s
            WHERE s.user_uid = $1
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(place_ids.into_iter().collect())
    }
}
