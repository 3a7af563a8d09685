use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::actions::ApiClient;
use crate::config::{Config, RuntimeConfig};
use crate::cues::AlertCues;
use crate::view::{AnimationRegistry, DashboardView};

#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub config_path: String,
    pub runtime_config: Arc<RwLock<RuntimeConfig>>,
    pub view: Arc<Mutex<DashboardView>>,
    pub animations: Arc<Mutex<AnimationRegistry>>,
    pub cues: Arc<AlertCues>,
    pub api: ApiClient,
}

impl AppContext {
    pub fn new(
        config: Config,
        config_path: impl Into<String>,
        api: ApiClient,
        cues: AlertCues,
    ) -> Self {
        Self {
            runtime_config: Arc::new(RwLock::new(RuntimeConfig::from_config(&config))),
            view: Arc::new(Mutex::new(DashboardView::from_config(&config))),
            animations: Arc::new(Mutex::new(AnimationRegistry::default())),
            cues: Arc::new(cues),
            api,
            config_path: config_path.into(),
            config,
        }
    }

    /// Swaps in new runtime settings and returns the previous ones.
    pub async fn update_runtime_config(&self, runtime_config: RuntimeConfig) -> RuntimeConfig {
        let mut current = self.runtime_config.write().await;
        std::mem::replace(&mut *current, runtime_config)
    }

    #[cfg(test)]
    pub fn for_tests(config: Config) -> Self {
        use crate::config::NotificationPermission;

        let api = ApiClient::from_config(&config.server).expect("test api client should build");
        let cues = AlertCues::terminal(NotificationPermission::Denied);
        Self::new(config, "config.toml", api, cues)
    }
}
