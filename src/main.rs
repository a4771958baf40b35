use anyhow::Result;
use log::info;

use listkeeper::config::Config;
use listkeeper::logger;
use listkeeper::store::StoreProvider;
use listkeeper::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    logger::init(&config.logging)?;

    let stores = StoreProvider::from_config(&config).await?;
    let app = web::router(stores);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "listening on http://{addr} with the {} backend",
        config.storage.backend
    );
    axum::serve(listener, app).await?;

    Ok(())
}
