mod config;

use webui_deploy_core::Env;

fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    let env = Env::from_process();
    config::LogConfig::from_env(&env).init();

    tracing::info!("Preparing WebUI startup");

    // Everything after the program name belongs to the application server.
    let cli_args: Vec<String> = std::env::args().skip(1).collect();

    match webui_deploy_core::run(&env, cli_args) {
        Ok(never) => match never {},
        Err(e) => Err(anyhow::anyhow!("Startup aborted: {e}")),
    }
}
