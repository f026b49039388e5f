use crate::service::BehaviorService;
use crate::storage::FileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<Mutex<BehaviorService<FileStore>>>,
}

impl AppState {
    pub fn new(service: BehaviorService<FileStore>) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }
}
