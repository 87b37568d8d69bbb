use crate::config::Settings;
use crate::upstream::NhlApi;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn NhlApi>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(api: Arc<dyn NhlApi>, settings: Settings) -> Self {
        Self {
            api,
            settings: Arc::new(settings),
        }
    }
}
