use std::convert::Infallible;
use std::process::Command;

use thiserror::Error;

use super::plan::LaunchPlan;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to execute '{program}': {source}")]
    Exec {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl LaunchPlan {
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.envs(self.env.iter().map(|(k, v)| (k, v)));
        cmd
    }
}

/// Replace the current process with the planned command.
///
/// Returns only if the exec itself fails; on success the caller's process
/// image is gone and nothing after this call runs.
#[cfg(unix)]
pub fn launch(plan: LaunchPlan) -> Result<Infallible, LaunchError> {
    use std::os::unix::process::CommandExt;

    let source = plan.command().exec();
    Err(LaunchError::Exec {
        program: plan.program,
        source,
    })
}

/// No exec on this platform: run the command to completion and exit with its
/// status so the hosting platform still sees the application's result.
#[cfg(not(unix))]
pub fn launch(plan: LaunchPlan) -> Result<Infallible, LaunchError> {
    let status = plan
        .command()
        .status()
        .map_err(|source| LaunchError::Exec {
            program: plan.program.clone(),
            source,
        })?;
    std::process::exit(status.code().unwrap_or(1))
}
