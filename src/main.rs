use plantation_backend::{AppConfig, bootstrap, establish_connection};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!(code = e.code().as_code(), "startup failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> plantation_backend::Result<()> {
    let config = AppConfig::load()?;

    info!("Connecting to database...");
    let db = establish_connection(&config.database).await?;
    info!("Database connected");

    let admin = bootstrap(&db).await?;
    info!(role_id = admin.id, role = %admin, "store initialised");

    db.close().await?;
    Ok(())
}
