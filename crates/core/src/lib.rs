pub mod connection;
pub mod env;
pub mod launch;
pub mod runtime;
pub mod supervisor;

pub use connection::descriptor::{ConnectionDescriptor, Diagnostic, DiagnosticLevel};
pub use connection::validate::{validate, ValidationError};
pub use env::Env;
pub use launch::exec::{launch, LaunchError};
pub use launch::plan::LaunchPlan;
pub use runtime::config::{ConfigError, RuntimeConfig};
pub use supervisor::{prepare, run, Phase, StartupError};
