mod logging;
mod state;

use keycloak_setup_domain::{BootstrapReport, ConfigurationPort, EnvConfigurationAdapter};
use tracing::info;

use crate::state::SetupState;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EnvConfigurationAdapter::new()?;
    logging::init(config.get_logging_config());

    let state = SetupState::new(&config).await?;
    let report = state
        .bootstrap_service
        .run(config.get_realm_definitions())
        .await?;

    log_completion(&report);
    Ok(())
}

fn log_completion(report: &BootstrapReport) {
    info!(
        created = report.created.len(),
        skipped = report.skipped.len(),
        "Setup Complete!"
    );
}
