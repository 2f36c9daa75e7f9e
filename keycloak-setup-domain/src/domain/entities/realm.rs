use super::{client::Client, user::User};
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Realm names the bootstrapper must never create or touch
pub const RESERVED_REALM_NAMES: [&str; 3] = ["master", "admin", "security-admin-console"];

/// Declarative description of a realm to provision: its name, the redirect
/// URL shared by its clients, and the client ids to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmDefinition {
    pub realm: String,
    pub redirect_url: String,
    pub client_ids: Vec<String>,
}

impl RealmDefinition {
    pub fn new<I, S>(realm: impl Into<String>, redirect_url: impl Into<String>, client_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            realm: realm.into(),
            redirect_url: redirect_url.into(),
            client_ids: client_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// The realms provisioned when no realm file is configured
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "central-registry",
                "http://localhost:9003",
                ["ncg", "gateway", "10000005", "10000002"],
            ),
            Self::new("consent-manager", "http://localhost:9004", ["consent-manager"]),
        ]
    }

    pub fn validate(&self) -> DomainResult<()> {
        Realm::validate_realm_name(&self.realm)?;
        Self::validate_redirect_url(&self.redirect_url)?;

        if self.client_ids.is_empty() {
            return Err(DomainError::Validation {
                field: "client_ids".to_string(),
                message: format!("Realm '{}' must define at least one client", self.realm),
            });
        }

        let mut seen = HashSet::new();
        for client_id in &self.client_ids {
            Client::validate_client_id(client_id)?;
            if !seen.insert(client_id.as_str()) {
                return Err(DomainError::Validation {
                    field: "client_ids".to_string(),
                    message: format!(
                        "Client '{client_id}' is listed more than once for realm '{}'",
                        self.realm
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn validate_redirect_url(redirect_url: &str) -> DomainResult<()> {
        if redirect_url.is_empty() {
            return Err(DomainError::Validation {
                field: "redirect_url".to_string(),
                message: "Redirect URL cannot be empty".to_string(),
            });
        }

        if !redirect_url.starts_with("http://") && !redirect_url.starts_with("https://") {
            return Err(DomainError::Validation {
                field: "redirect_url".to_string(),
                message: format!("Redirect URL '{redirect_url}' must start with http:// or https://"),
            });
        }

        Ok(())
    }

    /// Validate a whole list of definitions, including realm name uniqueness.
    pub fn validate_all(definitions: &[Self]) -> DomainResult<()> {
        let mut seen = HashSet::new();
        for definition in definitions {
            definition.validate()?;
            if !seen.insert(definition.realm.as_str()) {
                return Err(DomainError::AlreadyExists {
                    entity_type: "Realm definition".to_string(),
                    identifier: definition.realm.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Realm submitted for creation, with its clients and users nested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Realm {
    pub realm: String,
    pub enabled: bool,
    pub clients: Vec<Client>,
    pub users: Vec<User>,
}

impl Realm {
    /// Create a new, enabled realm without clients or users
    pub fn new(realm: String) -> DomainResult<Self> {
        Self::validate_realm_name(&realm)?;

        Ok(Self {
            realm,
            enabled: true,
            clients: Vec::new(),
            users: Vec::new(),
        })
    }

    /// Build the realm described by `definition`: one confidential client per
    /// client id, all sharing the redirect URL, plus the service admin user.
    pub fn from_definition(definition: &RealmDefinition) -> DomainResult<Self> {
        definition.validate()?;

        let mut realm = Self::new(definition.realm.clone())?;
        for client_id in &definition.client_ids {
            realm.add_client(Client::confidential(
                client_id.clone(),
                definition.redirect_url.clone(),
            )?)?;
        }
        realm.add_user(User::service_admin()?)?;
        Ok(realm)
    }

    /// Validate realm name according to business rules
    pub fn validate_realm_name(realm: &str) -> DomainResult<()> {
        if realm.is_empty() {
            return Err(DomainError::Validation {
                field: "realm".to_string(),
                message: "Realm name cannot be empty".to_string(),
            });
        }

        if realm.chars().count() < 2 {
            return Err(DomainError::Validation {
                field: "realm".to_string(),
                message: "Realm name must be at least 2 characters long".to_string(),
            });
        }

        if realm.chars().count() > 36 {
            return Err(DomainError::Validation {
                field: "realm".to_string(),
                message: "Realm name cannot exceed 36 characters".to_string(),
            });
        }

        if !realm
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::Validation {
                field: "realm".to_string(),
                message:
                    "Realm name can only contain alphanumeric characters, hyphens, and underscores"
                        .to_string(),
            });
        }

        if RESERVED_REALM_NAMES.contains(&realm) {
            return Err(DomainError::Validation {
                field: "realm".to_string(),
                message: format!("Realm name '{realm}' is reserved"),
            });
        }

        Ok(())
    }

    pub fn add_client(&mut self, client: Client) -> DomainResult<()> {
        if self.find_client(&client.client_id).is_some() {
            return Err(DomainError::AlreadyExists {
                entity_type: "Client".to_string(),
                identifier: format!("{} in realm {}", client.client_id, self.realm),
            });
        }
        self.clients.push(client);
        Ok(())
    }

    pub fn add_user(&mut self, user: User) -> DomainResult<()> {
        if self.users.iter().any(|u| u.username == user.username) {
            return Err(DomainError::AlreadyExists {
                entity_type: "User".to_string(),
                identifier: format!("{} in realm {}", user.username, self.realm),
            });
        }
        self.users.push(user);
        Ok(())
    }

    pub fn find_client(&self, client_id: &str) -> Option<&Client> {
        self.clients.iter().find(|c| c.client_id == client_id)
    }

    pub fn client_ids(&self) -> Vec<&str> {
        self.clients.iter().map(|c| c.client_id.as_str()).collect()
    }
}
