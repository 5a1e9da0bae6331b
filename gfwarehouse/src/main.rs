use std::{fs::File, path::Path};

use gf_axum::{ApiApplication, config::AxumConfig, router, shutdown_signal, start_server};
use gf_memory::MemoryDb;
use gf_mongodb::Db;
use gfwarehouse::{
    AppConfig, Backend, Cli,
    impls::{WarehouseApp, signing_key},
};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Everything logs through `tracing`; RUST_LOG selects what is printed.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;
    let key = signing_key(&cli.secret)?;
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    match database.backend {
        Backend::Mongodb => {
            let db = Db::open(&database.mongodb).await?;
            let result = serve(&cli, server, WarehouseApp { db: db.clone(), key }).await;
            db.shutdown().await;
            result
        }
        Backend::Memory => {
            let db = MemoryDb::open(&database.memory);
            serve(&cli, server, WarehouseApp { db, key }).await
        }
    }
}

/// Serve `app` until ctrl-c, or dump its schema if one was requested.
async fn serve<T: ApiApplication>(cli: &Cli, server: AxumConfig, app: T) -> anyhow::Result<()> {
    if let Some(path) = &cli.schema {
        return write_schema(path, app, server);
    }

    start_server(server, app, shutdown_signal()).await?;
    Ok(())
}

fn write_schema<T: ApiApplication>(path: &Path, app: T, server: AxumConfig) -> anyhow::Result<()> {
    let (_, schema) = router(app, server);
    serde_json::to_writer_pretty(File::create(path)?, &*schema)?;
    tracing::info!(path = %path.display(), "wrote OpenAPI document");
    Ok(())
}
