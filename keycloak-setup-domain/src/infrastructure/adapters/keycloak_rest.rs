use async_trait::async_trait;
use keycloak::types::*;
use keycloak::{KeycloakAdmin, KeycloakTokenSupplier};
use std::sync::Arc;
use tracing::debug;

use crate::application::ports::repository::*;
use crate::domain::{entities::*, errors::*};

/// Keycloak REST API adapter implementing the KeycloakRepository port
pub struct KeycloakRestAdapter<TS: KeycloakTokenSupplier> {
    admin: Arc<KeycloakAdmin<TS>>,
}

impl<TS: KeycloakTokenSupplier + Sync + Send> KeycloakRestAdapter<TS> {
    pub fn new(admin: KeycloakAdmin<TS>) -> Self {
        Self {
            admin: Arc::new(admin),
        }
    }
}

#[async_trait]
impl<TS: KeycloakTokenSupplier + Send + Sync> KeycloakRepository for KeycloakRestAdapter<TS> {
    async fn list_realm_names(&self) -> DomainResult<Vec<String>> {
        let keycloak_realms = self
            .admin
            .get(Some(true))
            .await
            .map_err(|e| DomainError::keycloak(format!("Failed to list realms: {e}")))?;

        let names: Vec<String> = keycloak_realms
            .into_iter()
            .filter_map(|realm| realm.realm.map(|name| name.to_string()))
            .collect();

        debug!("Keycloak reports {} realms", names.len());
        Ok(names)
    }

    async fn create_realm(&self, realm: &Realm) -> DomainResult<()> {
        let keycloak_realm = convert_realm_to_keycloak(realm);

        self.admin
            .post(keycloak_realm)
            .await
            .map_err(|e| {
                DomainError::keycloak(format!("Failed to create realm {}: {e}", realm.realm))
            })?;

        Ok(())
    }
}

// Conversion methods between domain entities and Keycloak types

pub(crate) fn convert_realm_to_keycloak(realm: &Realm) -> RealmRepresentation {
    let mut keycloak_realm = RealmRepresentation::default();

    keycloak_realm.realm = Some(realm.realm.clone().into());
    keycloak_realm.enabled = Some(realm.enabled);
    keycloak_realm.clients = Some(realm.clients.iter().map(convert_client_to_keycloak).collect());
    keycloak_realm.users = Some(realm.users.iter().map(convert_user_to_keycloak).collect());

    keycloak_realm
}

pub(crate) fn convert_client_to_keycloak(client: &Client) -> ClientRepresentation {
    let mut keycloak_client = ClientRepresentation::default();

    keycloak_client.client_id = Some(client.client_id.clone().into());
    keycloak_client.redirect_uris = Some(client.redirect_uris.iter().map(|u| u.clone().into()).collect());
    keycloak_client.enabled = Some(client.enabled);
    keycloak_client.surrogate_auth_required = Some(client.surrogate_auth_required);
    keycloak_client.always_display_in_console = Some(client.always_display_in_console);
    keycloak_client.client_authenticator_type = Some(client.client_authenticator_type.clone().into());
    keycloak_client.not_before = Some(client.not_before);

    // Convert boolean flags
    keycloak_client.bearer_only = Some(client.bearer_only);
    keycloak_client.consent_required = Some(client.consent_required);
    keycloak_client.standard_flow_enabled = Some(client.standard_flow_enabled);
    keycloak_client.implicit_flow_enabled = Some(client.implicit_flow_enabled);
    keycloak_client.direct_access_grants_enabled = Some(client.direct_access_grants_enabled);
    keycloak_client.service_accounts_enabled = Some(client.service_accounts_enabled);
    keycloak_client.public_client = Some(client.public_client);
    keycloak_client.frontchannel_logout = Some(client.frontchannel_logout);
    keycloak_client.full_scope_allowed = Some(client.full_scope_allowed);
    keycloak_client.authorization_services_enabled = Some(client.authorization_services_enabled);

    keycloak_client.protocol = Some(client.protocol.clone().into());

    keycloak_client
}

pub(crate) fn convert_user_to_keycloak(user: &User) -> UserRepresentation {
    let mut keycloak_user = UserRepresentation::default();

    keycloak_user.username = Some(user.username.clone().into());
    keycloak_user.enabled = Some(user.enabled);
    keycloak_user.email_verified = Some(user.email_verified);
    keycloak_user.credentials = Some(user.credentials.iter().map(convert_credential_to_keycloak).collect());

    if !user.realm_roles.is_empty() {
        keycloak_user.realm_roles = Some(user.realm_roles.iter().map(|r| r.clone().into()).collect());
    }

    if !user.client_roles.is_empty() {
        keycloak_user.client_roles = Some(
            user.client_roles
                .iter()
                .map(|(client, roles)| (client.clone(), roles.clone()))
                .collect(),
        );
    }

    keycloak_user
}

pub(crate) fn convert_credential_to_keycloak(credential: &Credential) -> CredentialRepresentation {
    let mut keycloak_credential = CredentialRepresentation::default();

    keycloak_credential.type_ = Some(credential.type_.clone().into());
    keycloak_credential.value = Some(credential.value.clone().into());
    keycloak_credential.temporary = Some(credential.temporary);

    keycloak_credential
}

#[cfg(test)]
mod tests {
    use super::*;

    fn central_registry() -> Realm {
        Realm::from_definition(&RealmDefinition::defaults()[0]).unwrap()
    }

    #[test]
    fn realm_representation_nests_clients_and_users() {
        let representation = convert_realm_to_keycloak(&central_registry());

        assert_eq!(representation.realm.as_deref(), Some("central-registry"));
        assert_eq!(representation.enabled, Some(true));

        let client_ids: Vec<String> = representation
            .clients
            .unwrap_or_default()
            .into_iter()
            .filter_map(|c| c.client_id.map(|id| id.to_string()))
            .collect();
        assert_eq!(client_ids, vec!["ncg", "gateway", "10000005", "10000002"]);
        assert_eq!(representation.users.map(|u| u.len()), Some(1));
    }

    #[test]
    fn client_representation_is_confidential() {
        let client = Client::confidential("ncg".to_string(), "http://localhost:9003".to_string()).unwrap();
        let representation = convert_client_to_keycloak(&client);

        assert_eq!(representation.public_client, Some(false));
        assert_eq!(representation.bearer_only, Some(false));
        assert_eq!(representation.standard_flow_enabled, Some(true));
        assert_eq!(representation.implicit_flow_enabled, Some(false));
        assert_eq!(representation.direct_access_grants_enabled, Some(true));
        assert_eq!(representation.service_accounts_enabled, Some(true));
        assert_eq!(representation.full_scope_allowed, Some(true));
        assert_eq!(representation.authorization_services_enabled, Some(true));
        assert_eq!(representation.consent_required, Some(false));
        assert_eq!(representation.frontchannel_logout, Some(false));
        assert_eq!(representation.surrogate_auth_required, Some(false));
        assert_eq!(representation.always_display_in_console, Some(false));
        assert_eq!(representation.not_before, Some(0));
        assert_eq!(representation.protocol.as_deref(), Some("openid-connect"));
        assert_eq!(representation.client_authenticator_type.as_deref(), Some("client-secret"));
        assert_eq!(
            representation.redirect_uris,
            Some(vec!["http://localhost:9003".to_string()])
        );
    }

    #[test]
    fn user_representation_carries_roles_and_password() {
        let representation = convert_user_to_keycloak(&User::service_admin().unwrap());

        assert_eq!(representation.username.as_deref(), Some("consent-service-admin-user"));
        assert_eq!(representation.enabled, Some(true));
        assert_eq!(representation.email_verified, Some(false));
        assert_eq!(
            representation.realm_roles,
            Some(vec!["offline_access".to_string(), "uma_authorization".to_string()])
        );

        let client_roles = representation.client_roles.unwrap();
        assert_eq!(client_roles.len(), 1);
        assert_eq!(client_roles["realm-management"], vec!["manage-users".to_string()]);

        let credentials = representation.credentials.unwrap();
        assert_eq!(credentials.len(), 1);
        assert_eq!(credentials[0].type_.as_deref(), Some("password"));
        assert_eq!(credentials[0].value.as_deref(), Some("welcome"));
        assert_eq!(credentials[0].temporary, Some(false));
    }

    #[test]
    fn realm_representation_serializes_to_admin_api_json() {
        let json = serde_json::to_value(convert_realm_to_keycloak(&central_registry())).unwrap();

        assert_eq!(json["realm"], "central-registry");
        assert_eq!(json["enabled"], true);
        assert_eq!(json["clients"][0]["clientId"], "ncg");
        assert_eq!(json["clients"][0]["publicClient"], false);
        assert_eq!(json["users"][0]["clientRoles"]["realm-management"][0], "manage-users");
        assert_eq!(json["users"][0]["credentials"][0]["type"], "password");
    }
}
