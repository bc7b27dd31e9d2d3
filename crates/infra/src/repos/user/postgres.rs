use super::IUserRepo;

use sqlx::{
    types::{Json, Uuid},
    FromRow, PgPool,
};
use wayfarer_domain::{User, ID};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    email: String,
    full_name: Option<String>,
    fcm_token: Option<String>,
    allow_smart_alerts: bool,
    allow_opportunity_alerts: bool,
    allow_real_time_tips: bool,
    tourist_type: Json<Vec<String>>,
    preferred_activities: Json<Vec<String>>,
    preferred_cuisines: Json<Vec<String>>,
    preferred_dining: Json<Vec<String>>,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        User {
            id: raw.user_uid.into(),
            email: raw.email,
            full_name: raw.full_name,
            fcm_token: raw.fcm_token,
            allow_smart_alerts: raw.allow_smart_alerts,
            allow_opportunity_alerts: raw.allow_opportunity_alerts,
            allow_real_time_tips: raw.allow_real_time_tips,
            tourist_type: raw.tourist_type.0,
            preferred_activities: raw.preferred_activities.0,
            preferred_cuisines: raw.preferred_cuisines.0,
            preferred_dining: raw.preferred_dining.0,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users
            (user_uid, email, full_name, fcm_token, allow_smart_alerts,
             allow_opportunity_alerts, allow_real_time_tips, tourist_type,
             preferred_activities, preferred_cuisines, preferred_dining)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(*user.id.inner_ref())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.fcm_token)
        .bind(user.allow_smart_alerts)
        .bind(user.allow_opportunity_alerts)
        .bind(user.allow_real_time_tips)
        .bind(Json(&user.tourist_type))
        .bind(Json(&user.preferred_activities))
        .bind(Json(&user.preferred_cuisines))
        .bind(Json(&user.preferred_dining))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET email = $2,
                full_name = $3,
                fcm_token = $4,
                allow_smart_alerts = $5,
                allow_opportunity_alerts = $6,
                allow_real_time_tips = $7,
                tourist_type = $8,
                preferred_activities = $9,
                preferred_cuisines = $10,
                preferred_dining = $11
            WHERE user_uid = $1
            "#,
        )
        .bind(*user.id.inner_ref())
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.fcm_token)
        .bind(user.allow_smart_alerts)
        .bind(user.allow_opportunity_alerts)
        .bind(user.allow_real_time_tips)
        .bind(Json(&user.tourist_type))
        .bind(Json(&user.preferred_activities))
        .bind(Json(&user.preferred_cuisines))
        .bind(Json(&user.preferred_dining))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|user| user.into())
    }

    async fn delete(&self, user_id: &ID) -> Option<User> {
        sqlx::query_as::<_, UserRaw>(
            r#"
            DELETE FROM users AS u
            WHERE u.user_uid = $1
            RETURNING *
            "#,
        )
        .bind(*user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .map(|user| user.into())
    }
}
