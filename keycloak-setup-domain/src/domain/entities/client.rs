use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

pub const OPENID_CONNECT_PROTOCOL: &str = "openid-connect";
pub const CLIENT_SECRET_AUTHENTICATOR: &str = "client-secret";

/// OAuth2 / OpenID Connect client registered inside a provisioned realm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub client_id: String,
    pub redirect_uris: Vec<String>,
    pub enabled: bool,
    pub surrogate_auth_required: bool,
    pub always_display_in_console: bool,
    pub client_authenticator_type: String,
    pub not_before: i32,
    pub bearer_only: bool,
    pub consent_required: bool,
    pub standard_flow_enabled: bool,
    pub implicit_flow_enabled: bool,
    pub direct_access_grants_enabled: bool,
    pub service_accounts_enabled: bool,
    pub public_client: bool,
    pub frontchannel_logout: bool,
    pub protocol: String,
    pub full_scope_allowed: bool,
    pub authorization_services_enabled: bool,
}

impl Client {
    /// Create the confidential client every provisioned realm gets.
    ///
    /// The flag bundle is fixed: confidential with a client secret, standard
    /// flow and direct access grants on, implicit flow off, service accounts
    /// and authorization services on, full scope allowed.
    pub fn confidential(client_id: String, redirect_url: String) -> DomainResult<Self> {
        Self::validate_client_id(&client_id)?;

        Ok(Self {
            client_id,
            redirect_uris: vec![redirect_url],
            enabled: true,
            surrogate_auth_required: false,
            always_display_in_console: false,
            client_authenticator_type: CLIENT_SECRET_AUTHENTICATOR.to_string(),
            not_before: 0,
            bearer_only: false,
            consent_required: false,
            standard_flow_enabled: true,
            implicit_flow_enabled: false,
            direct_access_grants_enabled: true,
            service_accounts_enabled: true,
            public_client: false,
            frontchannel_logout: false,
            protocol: OPENID_CONNECT_PROTOCOL.to_string(),
            full_scope_allowed: true,
            authorization_services_enabled: true,
        })
    }

    /// Validate client ID according to business rules
    pub fn validate_client_id(client_id: &str) -> DomainResult<()> {
        if client_id.is_empty() {
            return Err(DomainError::Validation {
                field: "client_id".to_string(),
                message: "Client ID cannot be empty".to_string(),
            });
        }

        if client_id.chars().count() > 255 {
            return Err(DomainError::Validation {
                field: "client_id".to_string(),
                message: "Client ID cannot exceed 255 characters".to_string(),
            });
        }

        if client_id.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation {
                field: "client_id".to_string(),
                message: format!("Client ID '{client_id}' cannot contain whitespace"),
            });
        }

        Ok(())
    }
}
