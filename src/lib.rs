pub mod app;
pub mod config;
pub mod errors;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod service;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;
pub mod vocab;

pub use app::router;
pub use config::Config;
pub use service::BehaviorService;
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
