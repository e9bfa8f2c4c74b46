use std::time::Duration;

use config::{
    Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState,
};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct ScreenSettings {
    pub status_display_ms: u64,
}

impl ScreenSettings {
    pub fn status_display_duration(&self) -> Duration {
        Duration::from_millis(self.status_display_ms)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    pub screen: ScreenSettings,
    pub logging: LoggingSettings,
}

impl AppSettings {
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Self::builder()?
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name("appsettings.local").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("screen.status_display_ms", 4000_i64)?
            .set_default("logging.level", "info")
    }
}
