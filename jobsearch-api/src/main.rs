use anyhow::Context;
use jobsearch_api::{config, domain::services::run_region_tree_refresh_worker, factory, router};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing_subscriber::{
    fmt::time::LocalTime, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobsearch_api=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_timer(LocalTime::rfc_3339()))
        .init();

    let settings = config::read_config().context("failed to read configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect_with(settings.database.with_db())
        .await
        .context("failed to connect to Postgres")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let app_state = factory::build_app_state(pool, &settings);

    if settings.application.rebuild_region_tree_on_startup {
        match app_state.region_service().rebuild_tree().await {
            Ok(stats) => tracing::info!(
                cities = stats.cities,
                districts = stats.districts,
                towns = stats.towns,
                "Region tree built"
            ),
            // Serving continues; the tree reads as empty until the next rebuild.
            Err(err) => tracing::error!("Failed to build region tree: {}", err),
        }
    }

    if let Some(interval) = settings.cache.refresh_interval() {
        tokio::spawn(run_region_tree_refresh_worker(
            app_state.region_service(),
            interval,
        ));
    }

    let app = router::create(app_state, &settings.application);

    let addr = format!("{}:{}", settings.application.host, settings.application.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
