use anyhow::Context;

use sakila_api::{
    config::Config, database, observability::init_tracing, routes::router, server::Server,
    state::AppState, store::PgCatalog,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    init_tracing(&config)?;

    let pool = database::create_pool(&config.database)
        .await
        .context("failed to connect to the database")?;

    if config.database.run_migrations {
        database::run_migrations(&pool)
            .await
            .context("failed to apply migrations")?;
    }
    if config.database.seed {
        database::seed_languages(&pool)
            .await
            .context("failed to seed languages")?;
    }

    let state = AppState::new(config.clone(), PgCatalog::new(pool));
    let app = router(state);

    Server::new(config).serve(app).await?;

    Ok(())
}
