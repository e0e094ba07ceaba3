mod cli;
mod probe;
mod report;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use webui_deploy_core::connection::DATABASE_URL;
use webui_deploy_core::{validate, Env};

use crate::cli::Options;
use crate::report::Report;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience)
    let _ = dotenvy::dotenv();

    // Report lines own stdout; library logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let opts = Options::parse();

    let env = Env::from_process();
    let report = verify(&env, &opts).await;

    if opts.json {
        println!("{}", report.render_json()?);
    } else {
        println!("{}", report.render_plain());
    }

    if report.has_failures() {
        anyhow::bail!("database verification failed");
    }
    Ok(())
}

async fn verify(env: &Env, opts: &Options) -> Report {
    let mut report = Report::default();

    let descriptor = match validate(env.get(DATABASE_URL)) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            report.fail(e.to_string());
            return report;
        }
    };
    report.ok(format!("Connection string: {descriptor}"));
    report.extend_diagnostics(descriptor.diagnostics());

    if !opts.connect {
        return report;
    }

    // Validation passed, so the variable is present.
    let url = env.get(DATABASE_URL).unwrap_or_default();
    match probe::probe(url, opts.timeout()).await {
        Ok(result) => {
            report.ok(format!("Server: {}", result.server_version));
            match result.vector_extension {
                Some(version) => report.ok(format!("vector extension installed ({version})")),
                None => report.warn("vector extension not installed; run CREATE EXTENSION vector"),
            }
        }
        Err(e) => report.fail(e.to_string()),
    }

    report
}
