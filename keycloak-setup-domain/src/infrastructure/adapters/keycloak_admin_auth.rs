use keycloak::{KeycloakAdmin, KeycloakAdminToken};
use tracing::{debug, instrument};

use crate::application::ports::config::{HttpConfig, KeycloakConfig};
use crate::domain::errors::*;

const PASSWORD_GRANT: &str = "password";

/// Authenticates against the admin realm and hands out admin API clients
pub struct KeycloakAdminAuthenticator {
    config: KeycloakConfig,
    client: reqwest::Client,
}

impl KeycloakAdminAuthenticator {
    pub fn new(config: KeycloakConfig, http: &HttpConfig) -> DomainResult<Self> {
        let client = build_http_client(http)?;
        Ok(Self::new_with_client(config, client))
    }

    pub fn new_with_client(config: KeycloakConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Acquire an admin token with the resource-owner password grant
    #[instrument(skip(self), fields(realm = %self.config.admin_realm, client_id = %self.config.admin_client_id))]
    pub async fn acquire_token(&self) -> DomainResult<KeycloakAdminToken> {
        debug!("Requesting admin token from {}", self.config.get_auth_url());

        KeycloakAdminToken::acquire_custom_realm(
            self.config.base_url(),
            &self.config.admin_username,
            &self.config.admin_password,
            &self.config.admin_realm,
            &self.config.admin_client_id,
            PASSWORD_GRANT,
            &self.client,
        )
        .await
        .map_err(|e| DomainError::AuthenticationFailed {
            reason: format!(
                "Could not obtain admin token for user {} in realm {}: {e}",
                self.config.admin_username, self.config.admin_realm
            ),
        })
    }

    /// Authenticate and build an admin client sharing this authenticator's
    /// HTTP connection pool.
    pub async fn connect(&self) -> DomainResult<KeycloakAdmin<KeycloakAdminToken>> {
        let token = self.acquire_token().await?;
        Ok(KeycloakAdmin::new(
            self.config.base_url(),
            token,
            self.client.clone(),
        ))
    }
}

/// Build the HTTP client used for every admin call
pub fn build_http_client(http: &HttpConfig) -> DomainResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(http.get_timeout())
        .connect_timeout(http.get_connect_timeout())
        .pool_max_idle_per_host(http.max_idle_connections)
        .user_agent(http.user_agent.clone())
        .build()
        .map_err(|e| DomainError::Configuration {
            message: format!("Failed to build HTTP client: {e}"),
        })
}
