//! Service entry point

use groundwork_service::database::create_pool;
use groundwork_service::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    // The skeleton registers no entities; downstream services add theirs
    // through register_entities! before build().
    let model = ModelBuilder::new().build();

    let auth = JwtAuth::new(&config.jwt)?;

    let db = match &config.database {
        Some(db_config) => {
            let pool = create_pool(db_config).await?;
            if db_config.ensure_created {
                model.ensure_created(&pool).await?;
            }
            Some(pool)
        }
        None => {
            tracing::info!("No database configured, running storage-free");
            None
        }
    };

    let state = AppState::new(config.clone(), model, db);
    let app = routes::app(&config, auth).with_state(state);

    Server::new(config).serve(app).await
}
