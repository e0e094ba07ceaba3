use tracing_subscriber::EnvFilter;
use webui_deploy_core::Env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Log level (e.g., "info", "debug", "trace"). `RUST_LOG` takes precedence.
    pub level: String,
    pub format: LogFormat,
}

impl LogConfig {
    pub fn from_env(env: &Env) -> Self {
        let format = match env.get_or("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self {
            level: env.get_or("LOG_LEVEL", "info").to_string(),
            format,
        }
    }

    /// Install the global subscriber. Lines go to stdout with timestamps.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false);
        match self.format {
            LogFormat::Json => builder.json().init(),
            LogFormat::Text => builder.init(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info_text() {
        let config = LogConfig::from_env(&Env::default());
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn reads_level_and_format() {
        let env = Env::from_pairs([("LOG_LEVEL", "debug"), ("LOG_FORMAT", "JSON")]);
        let config = LogConfig::from_env(&env);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
    }
}
