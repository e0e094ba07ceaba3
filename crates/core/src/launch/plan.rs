use crate::runtime::config::RuntimeConfig;
use crate::runtime::secret::WEBUI_SECRET_KEY;

/// A fully resolved command line plus the variables layered over the
/// inherited environment.
#[derive(Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl LaunchPlan {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        let s = &config.settings;

        let mut args = vec![
            s.app.clone(),
            "--host".into(),
            s.host.clone(),
            "--port".into(),
            s.port.to_string(),
        ];
        args.extend(config.server_args.to_args());
        args.extend(
            ["--forwarded-allow-ips", "*", "--log-level", "info", "--access-log"]
                .map(String::from),
        );

        let mut env = vec![
            ("HOST".to_string(), s.host.clone()),
            ("PORT".to_string(), s.port.to_string()),
            ("DATABASE_POOL_SIZE".to_string(), s.pool_size.clone()),
            (
                "DATABASE_POOL_MAX_OVERFLOW".to_string(),
                s.pool_max_overflow.clone(),
            ),
            ("VECTOR_DB".to_string(), s.vector_db.clone()),
        ];
        if config.secret.is_generated() {
            env.push((WEBUI_SECRET_KEY.to_string(), config.secret.value().to_string()));
        }

        Self {
            program: s.server_bin.clone(),
            args,
            env,
        }
    }

    /// The command line as a single loggable string.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Debug for LaunchPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env_keys: Vec<&str> = self.env.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("LaunchPlan")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("env", &env_keys)
            .finish()
    }
}
