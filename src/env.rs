use dotenvy::dotenv;
use log::{debug, info};
use std::{env as stdenv, path::Path};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "4000";

/// Loads `.env` from the working directory if there is one.
pub fn load_env_file() {
    let current_dir = stdenv::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
    let env_path = current_dir.join(".env");

    if dotenv().is_err() {
        debug!("no .env at {}, using the process environment", env_path.display());
    } else {
        info!(".env loading at: {}", env_path.display());
    }
}

pub fn load_env_var(key: &str, default: &str) -> String {
    stdenv::var(key).unwrap_or_else(|_| default.to_string())
}

/// `HOST:PORT` the server binds to.
pub fn bind_address() -> String {
    format!(
        "{}:{}",
        load_env_var("HOST", DEFAULT_HOST),
        load_env_var("PORT", DEFAULT_PORT)
    )
}
