use safiri_session::MonitorConfig;
use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub monitor: MonitorSettings,
    pub widget: WidgetSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitorSettings {
    pub initial_delay_ms: u64,
    pub poll_interval_ms: u64,
}

impl MonitorSettings {
    pub fn to_monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetSettings {
    pub display_name: String,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Environment-specific file is optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `SAFIRI__SERVER__PORT=9000`
            .add_source(config::Environment::with_prefix("SAFIRI").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_settings_conversion() {
        let settings = MonitorSettings {
            initial_delay_ms: 1000,
            poll_interval_ms: 500,
        };
        let monitor = settings.to_monitor_config();
        assert_eq!(monitor.initial_delay, Duration::from_millis(1000));
        assert_eq!(monitor.poll_interval, Duration::from_millis(500));
    }
}
