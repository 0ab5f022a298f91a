use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use crmserver::api_router::configure_api_routes;
use crmserver::erp::{ComarchClient, ErpClient};
use crmserver::shared::config::AppConfig;
use crmserver::shared::state::AppState;
use crmserver::shared::utils::{create_conn, run_migrations};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::load()?;

    let pool = create_conn(&config.database.url, config.database.max_connections)?;
    {
        let mut conn = pool.get()?;
        run_migrations(&mut conn)?;
    }

    let erp: Option<Arc<dyn ErpClient>> = match ComarchClient::from_config(&config.erp) {
        Some(client) => {
            info!("ERP integration enabled against {:?}", config.erp.base_url);
            Some(Arc::new(client))
        }
        None => {
            info!("ERP integration not configured, running CRM only");
            None
        }
    };

    let state = Arc::new(AppState {
        conn: pool,
        config: config.clone(),
        erp,
    });

    let app = configure_api_routes().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    info!("listening on {}", config.server.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
