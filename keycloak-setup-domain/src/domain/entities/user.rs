use super::common::*;
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SERVICE_ADMIN_USERNAME: &str = "consent-service-admin-user";
pub const SERVICE_ADMIN_PASSWORD: &str = "welcome";
pub const REALM_MANAGEMENT_CLIENT: &str = "realm-management";
pub const MANAGE_USERS_ROLE: &str = "manage-users";
pub const OFFLINE_ACCESS_ROLE: &str = "offline_access";
pub const UMA_AUTHORIZATION_ROLE: &str = "uma_authorization";

/// User created inside a provisioned realm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub enabled: bool,
    pub email_verified: bool,
    pub credentials: Vec<Credential>,
    pub realm_roles: Vec<String>,
    /// client id -> role names
    pub client_roles: BTreeMap<String, Vec<String>>,
}

impl User {
    /// Create a new enabled user with no credentials or roles
    pub fn new(username: String) -> DomainResult<Self> {
        Self::validate_username(&username)?;

        Ok(Self {
            username,
            enabled: true,
            email_verified: false,
            credentials: Vec::new(),
            realm_roles: Vec::new(),
            client_roles: BTreeMap::new(),
        })
    }

    /// The administrative user services use to manage users of the realm.
    pub fn service_admin() -> DomainResult<Self> {
        let mut user = Self::new(SERVICE_ADMIN_USERNAME.to_string())?;
        user.add_credential(Credential::password(SERVICE_ADMIN_PASSWORD.to_string(), false));
        user.grant_realm_role(OFFLINE_ACCESS_ROLE);
        user.grant_realm_role(UMA_AUTHORIZATION_ROLE);
        user.grant_client_role(REALM_MANAGEMENT_CLIENT, MANAGE_USERS_ROLE);
        Ok(user)
    }

    /// Validate username according to business rules
    pub fn validate_username(username: &str) -> DomainResult<()> {
        if username.is_empty() {
            return Err(DomainError::Validation {
                field: "username".to_string(),
                message: "Username cannot be empty".to_string(),
            });
        }

        if username.chars().count() > 255 {
            return Err(DomainError::Validation {
                field: "username".to_string(),
                message: "Username cannot exceed 255 characters".to_string(),
            });
        }

        if !username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '_' || c == '-' || c == '@')
        {
            return Err(DomainError::Validation {
                field: "username".to_string(),
                message: "Username contains invalid characters".to_string(),
            });
        }

        Ok(())
    }

    pub fn add_credential(&mut self, credential: Credential) {
        self.credentials.push(credential);
    }

    pub fn grant_realm_role(&mut self, role: impl Into<String>) {
        let role = role.into();
        if !self.realm_roles.contains(&role) {
            self.realm_roles.push(role);
        }
    }

    pub fn grant_client_role(&mut self, client_id: impl Into<String>, role: impl Into<String>) {
        let role = role.into();
        let roles = self.client_roles.entry(client_id.into()).or_default();
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
}
