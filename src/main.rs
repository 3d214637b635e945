use anyhow::Context;
use catalog_kernel::{settings::Settings, InitCtx};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load catalog settings")?;
    catalog_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        host = %settings.server.host,
        port = settings.server.port,
        "catalog-app bootstrap starting"
    );

    let registry = catalog_app::build_registry(&settings)?;
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("catalog-app bootstrap complete");

    let served = catalog_http::start_server(&registry, &settings).await;
    registry.stop_modules().await?;
    served
}
