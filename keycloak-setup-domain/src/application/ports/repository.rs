use crate::domain::{entities::*, errors::*};
use async_trait::async_trait;

/// Port to the identity provider's admin API
#[async_trait]
pub trait KeycloakRepository: Send + Sync {
    /// Names of every realm currently present on the server
    async fn list_realm_names(&self) -> DomainResult<Vec<String>>;

    /// Create a realm together with its nested clients and users
    async fn create_realm(&self, realm: &Realm) -> DomainResult<()>;
}
