/// Connection-string checks run before the application is allowed to start.
pub mod descriptor;
pub mod validate;

/// Scheme every `DATABASE_URL` must carry.
pub const EXPECTED_SCHEME: &str = "postgresql";

/// Environment variable holding the connection string.
pub const DATABASE_URL: &str = "DATABASE_URL";
