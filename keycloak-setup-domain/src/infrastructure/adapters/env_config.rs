use crate::application::ports::{
    AppConfig, ConfigurationPort, HttpConfig, KeycloakConfig, LoggingConfig,
};
use crate::domain::entities::RealmDefinition;
use crate::domain::errors::DomainResult;

/// Environment-based configuration adapter
pub struct EnvConfigurationAdapter {
    config: AppConfig,
}

impl EnvConfigurationAdapter {
    pub fn new() -> DomainResult<Self> {
        let config = AppConfig::from_env()?;
        Ok(Self { config })
    }
}

impl ConfigurationPort for EnvConfigurationAdapter {
    fn get_keycloak_config(&self) -> &KeycloakConfig {
        &self.config.keycloak
    }

    fn get_http_config(&self) -> &HttpConfig {
        &self.config.http
    }

    fn get_logging_config(&self) -> &LoggingConfig {
        &self.config.logging
    }

    fn get_realm_definitions(&self) -> &[RealmDefinition] {
        &self.config.realms
    }

    fn validate(&self) -> DomainResult<()> {
        self.config.validate()
    }
}
