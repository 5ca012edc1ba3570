use std::path::Path;

pub mod configuration;
pub mod db;
pub mod logic;
pub mod telemetry;
pub mod tmdb;
pub mod web;

pub fn set_env() -> Result<(), dotenv::Error> {
    let env_file = Path::new(".env");
    if env_file.exists() {
        dotenv::from_filename(".env")?;
    }
    Ok(())
}
