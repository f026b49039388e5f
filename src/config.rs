use std::{env, path::PathBuf};

const DEFAULT_DATA_PATH: &str = "data/behaviors.json";
const DEFAULT_PORT: u16 = 8080;

/// Startup settings read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(env::var("APP_DATA_PATH").ok(), env::var("PORT").ok())
    }

    fn from_vars(data_path: Option<String>, port: Option<String>) -> Self {
        let data_path = data_path
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));
        let port = port
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { data_path, port }
    }
}
