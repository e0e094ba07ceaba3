use std::time::Duration;

use clap::Parser;

/// Checks DATABASE_URL before a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "webui-verify-db")]
#[command(version)]
pub struct Options {
    /// Also connect and check for the vector extension
    #[arg(long)]
    pub connect: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Connect timeout in seconds
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

impl Options {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
