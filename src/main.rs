use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use course_store_api::{
    app::build_app,
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    payments::StripeGateway,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,course_store_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    tracing::info!("connected to database");

    run_migrations(&orm).await?;

    let payments = Arc::new(StripeGateway::new(&config));
    tracing::info!(currency = %config.currency, "payment gateway configured");

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    let app = build_app(AppState::new(orm, config, payments));

    tracing::info!("listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
