/// Runtime configuration derived from the environment at startup.
pub mod args;
pub mod config;
pub mod integrations;
pub mod secret;
