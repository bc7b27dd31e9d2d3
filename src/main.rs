mod telemetry;

use telemetry::{get_subscriber, init_subscriber};
use wayfarer_alerts::run_forever;
use wayfarer_infra::{run_migration, setup_context};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("wayfarer_scheduler".into(), "info".into());
    init_subscriber(subscriber);

    run_migration().await?;

    let context = setup_context().await;
    run_forever(context).await;

    Ok(())
}
