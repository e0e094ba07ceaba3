/// Turning a runtime config into the application process.
pub mod exec;
pub mod plan;
