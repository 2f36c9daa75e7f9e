use crate::{
    application::ports::*,
    domain::{entities::*, errors::DomainResult},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// What `ensure_realm` did for a single realm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealmOutcome {
    Created,
    AlreadyExists,
}

/// Summary of a bootstrap run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

impl BootstrapReport {
    fn record(&mut self, realm: &str, outcome: RealmOutcome) {
        match outcome {
            RealmOutcome::Created => self.created.push(realm.to_string()),
            RealmOutcome::AlreadyExists => self.skipped.push(realm.to_string()),
        }
    }
}

/// Provisions realms that do not exist yet. Existing realms are left
/// untouched, even when their clients or users differ from the definition.
#[derive(Clone)]
pub struct RealmBootstrapService {
    repository: Arc<dyn KeycloakRepository>,
}

impl RealmBootstrapService {
    pub fn new(repository: Arc<dyn KeycloakRepository>) -> Self {
        Self { repository }
    }

    /// Ensure every definition's realm exists, one after another.
    ///
    /// All definitions are validated before the first admin call, so a bad
    /// entry aborts the run without touching the server. Any admin API error
    /// stops the run; realms created before it stay in place.
    #[instrument(skip(self, definitions), fields(realms = definitions.len()))]
    pub async fn run(&self, definitions: &[RealmDefinition]) -> DomainResult<BootstrapReport> {
        RealmDefinition::validate_all(definitions)?;

        let mut report = BootstrapReport::default();
        for definition in definitions {
            let outcome = self.ensure_realm(definition).await?;
            report.record(&definition.realm, outcome);
        }

        debug!(
            "Bootstrap finished: {} created, {} skipped",
            report.created.len(),
            report.skipped.len()
        );
        Ok(report)
    }

    /// Create the realm described by `definition` unless a realm with that
    /// name already exists.
    #[instrument(skip(self, definition), fields(realm = %definition.realm))]
    pub async fn ensure_realm(&self, definition: &RealmDefinition) -> DomainResult<RealmOutcome> {
        let realm = Realm::from_definition(definition)?;

        let existing = self.repository.list_realm_names().await?;
        if existing.iter().any(|name| *name == realm.realm) {
            info!("Realm with name [{}] already exists. Moving on..", realm.realm);
            return Ok(RealmOutcome::AlreadyExists);
        }

        debug!(
            "Creating realm '{}' with clients {:?}",
            realm.realm,
            realm.client_ids()
        );
        self.repository.create_realm(&realm).await?;

        info!("Created Realm [{}]", realm.realm);
        Ok(RealmOutcome::Created)
    }
}
