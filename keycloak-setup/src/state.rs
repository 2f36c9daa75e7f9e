use keycloak_setup_domain::{
    ConfigurationPort, DomainResult, KeycloakAdminAuthenticator, KeycloakRestAdapter,
    RealmBootstrapService,
};
use std::sync::Arc;
use tracing::info;

/// Everything the run needs, wired once at startup
pub struct SetupState {
    pub bootstrap_service: RealmBootstrapService,
}

impl SetupState {
    /// Authenticate against the admin realm and wire the bootstrap service.
    /// Fails before any realm is touched when the server is unreachable or
    /// the admin credentials are rejected.
    pub async fn new(config: &dyn ConfigurationPort) -> DomainResult<Self> {
        config.validate()?;

        let keycloak = config.get_keycloak_config();
        info!(
            "Connecting to Keycloak at {} as {}",
            keycloak.base_url(),
            keycloak.admin_username
        );

        let authenticator =
            KeycloakAdminAuthenticator::new(keycloak.clone(), config.get_http_config())?;
        let keycloak_admin = authenticator.connect().await?;

        let repository = Arc::new(KeycloakRestAdapter::new(keycloak_admin));
        let bootstrap_service = RealmBootstrapService::new(repository);

        Ok(Self { bootstrap_service })
    }
}
