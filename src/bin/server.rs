use tracing::info;
use watch_our_movies::db::run_migrations;
use watch_our_movies::telemetry::init_tracing;
use watch_our_movies::{configuration::get_config, set_env, web::Application};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    set_env()?;
    let settings = get_config()?;
    init_tracing();

    info!("Starting watch-our-movies");
    run_migrations(&settings.database).await?;

    let server = Application::build(&settings).await?;
    server.serve_forever().await?;

    info!("Server exited");
    Ok(())
}
