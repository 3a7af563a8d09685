mod defaults;
mod io;
mod schema;
mod validate;

pub use io::{config_path_from_env, load_config};
pub use schema::{Alerts, Config, NotificationPermission, RuntimeConfig, Server, Timing};
pub use validate::ConfigError;
