//! Startup sequence: validate the connection string, derive the runtime
//! config, then hand the process over to the application server.

use std::convert::Infallible;
use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use thiserror::Error;

use crate::connection::validate::{validate, ValidationError};
use crate::connection::DATABASE_URL;
use crate::env::Env;
use crate::launch::exec::{launch, LaunchError};
use crate::launch::plan::LaunchPlan;
use crate::runtime::args::ServerArgs;
use crate::runtime::config::{ConfigError, RuntimeConfig, ServerSettings};
use crate::runtime::integrations;
use crate::runtime::secret::SecretKey;

/// Steps of the startup sequence. `Failed` and `Exec` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    ValidatingConnection,
    ConfiguringRuntime,
    ProvisioningSecret,
    SelectingArguments,
    Exec,
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Init => "init",
            Phase::ValidatingConnection => "validating_connection",
            Phase::ConfiguringRuntime => "configuring_runtime",
            Phase::ProvisioningSecret => "provisioning_secret",
            Phase::SelectingArguments => "selecting_arguments",
            Phase::Exec => "exec",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

fn enter(phase: Phase) {
    tracing::debug!(%phase, "entering startup phase");
}

/// Derive the runtime config from the environment and the launcher's own
/// command-line arguments.
pub fn prepare(env: &Env, cli_args: Vec<String>) -> Result<RuntimeConfig, ConfigError> {
    prepare_with_rng(env, cli_args, &mut OsRng)
}

/// [`prepare`] with an explicit random source for secret generation.
pub fn prepare_with_rng<R: RngCore + CryptoRng>(
    env: &Env,
    cli_args: Vec<String>,
    rng: &mut R,
) -> Result<RuntimeConfig, ConfigError> {
    enter(Phase::ConfiguringRuntime);
    let settings = ServerSettings::from_env(env)?;
    tracing::info!(
        "Runtime: listen={} workers={} pool_size={} pool_max_overflow={} vector_db={}",
        settings.addr(),
        settings.workers,
        settings.pool_size,
        settings.pool_max_overflow,
        settings.vector_db,
    );

    let integrations = integrations::detect(env);
    for name in &integrations {
        tracing::info!("{name} API key configured");
    }

    enter(Phase::ProvisioningSecret);
    let secret = SecretKey::provision(env, rng);
    match secret.source() {
        Some(var) => tracing::info!("Secret key already configured via {var}"),
        None => tracing::info!("No secret key configured; generated a new one for this start"),
    }

    enter(Phase::SelectingArguments);
    let server_args = ServerArgs::select(
        cli_args,
        settings.workers,
        &settings.event_loop,
        settings.keep_alive,
    );
    if server_args.is_user_supplied() {
        tracing::info!("Using server arguments from the command line");
    } else {
        tracing::info!("No server arguments given; using defaults");
    }

    Ok(RuntimeConfig {
        settings,
        secret,
        integrations,
        server_args,
    })
}

/// Run every step up to, but not including, the exec.
pub fn plan(env: &Env, cli_args: Vec<String>) -> Result<LaunchPlan, StartupError> {
    enter(Phase::Init);

    enter(Phase::ValidatingConnection);
    let descriptor = validate(env.get(DATABASE_URL))?;
    tracing::info!("Database: {descriptor}");
    for line in descriptor.diagnostics() {
        if line.is_warning() {
            tracing::warn!("{}", line.message);
        } else {
            tracing::info!("{}", line.message);
        }
    }

    let config = prepare(env, cli_args)?;
    Ok(LaunchPlan::from_config(&config))
}

/// Full startup sequence. Only returns on failure; any error means the
/// application never started.
pub fn run(env: &Env, cli_args: Vec<String>) -> Result<Infallible, StartupError> {
    let result = plan(env, cli_args).and_then(|plan| {
        enter(Phase::Exec);
        tracing::info!("Starting: {}", plan.command_line());
        Ok(launch(plan)?)
    });

    if let Err(err) = &result {
        tracing::error!(phase = %Phase::Failed, "{err}");
    }
    result
}
