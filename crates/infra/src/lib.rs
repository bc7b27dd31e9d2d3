mod config;
mod repos;
mod services;
mod system;

pub use config::Config;
pub use repos::Repos;
pub use repos::{
    IItineraryRepo, INotificationRepo, IScheduleItemRepo, ISentOpportunityRepo, IUserRepo,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct WayfarerContext {
    pub repos: Repos,
    pub services: Services,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl WayfarerContext {
    async fn create(params: ContextParams) -> Self {
        let repos = Repos::create_postgres(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let services = Services::create(&config);
        Self {
            repos,
            services,
            config,
            sys: Arc::new(RealSys {}),
        }
    }

    /// Context backed by in-memory repositories and unconfigured external
    /// adapters. Used by the test suites, which swap in their own fake
    /// services and clocks.
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        let services = Services::create(&config);
        Self {
            repos: Repos::create_inmemory(),
            services,
            config,
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> WayfarerContext {
    WayfarerContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
