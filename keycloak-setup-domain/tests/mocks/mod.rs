use async_trait::async_trait;
use keycloak_setup_domain::{
    application::ports::repository::KeycloakRepository,
    domain::{
        entities::*,
        errors::{DomainError, DomainResult},
    },
};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Admin API calls seen by the mock, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    ListRealms,
    CreateRealm(String),
}

/// Mock repository implementation for testing
#[derive(Clone)]
pub struct MockKeycloakRepository {
    pub existing_realms: Arc<Mutex<Vec<String>>>,
    pub created_realms: Arc<Mutex<Vec<Realm>>>,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
    pub fail_list: Arc<Mutex<bool>>,
    /// Fail the create call for this realm name
    pub fail_create_for: Arc<Mutex<Option<String>>>,
}

impl MockKeycloakRepository {
    pub fn new() -> Self {
        // Every Keycloak server ships with the master realm
        Self::with_realms(&["master"])
    }

    pub fn with_realms(names: &[&str]) -> Self {
        Self {
            existing_realms: Arc::new(Mutex::new(names.iter().map(|n| n.to_string()).collect())),
            created_realms: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_list: Arc::new(Mutex::new(false)),
            fail_create_for: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_fail_list(&self, fail: bool) {
        *self.fail_list.lock().unwrap() = fail;
    }

    pub fn set_fail_create_for(&self, realm: &str) {
        *self.fail_create_for.lock().unwrap() = Some(realm.to_string());
    }

    pub fn created(&self) -> Vec<Realm> {
        self.created_realms.lock().unwrap().clone()
    }

    pub fn created_names(&self) -> Vec<String> {
        self.created().into_iter().map(|r| r.realm).collect()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn realm_names(&self) -> Vec<String> {
        self.existing_realms.lock().unwrap().clone()
    }
}

#[async_trait]
impl KeycloakRepository for MockKeycloakRepository {
    async fn list_realm_names(&self) -> DomainResult<Vec<String>> {
        self.calls.lock().unwrap().push(RecordedCall::ListRealms);

        if *self.fail_list.lock().unwrap() {
            return Err(DomainError::ExternalService {
                service: "mock-keycloak".to_string(),
                message: "Connection refused".to_string(),
            });
        }

        Ok(self.realm_names())
    }

    async fn create_realm(&self, realm: &Realm) -> DomainResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(RecordedCall::CreateRealm(realm.realm.clone()));

        if self.fail_create_for.lock().unwrap().as_deref() == Some(realm.realm.as_str()) {
            return Err(DomainError::ExternalService {
                service: "mock-keycloak".to_string(),
                message: format!("Rejected realm {}", realm.realm),
            });
        }

        let mut existing = self.existing_realms.lock().unwrap();
        if existing.contains(&realm.realm) {
            // Keycloak answers 409 Conflict for duplicate realms
            return Err(DomainError::ExternalService {
                service: "mock-keycloak".to_string(),
                message: format!("Conflict: realm {} exists", realm.realm),
            });
        }

        existing.push(realm.realm.clone());
        self.created_realms.lock().unwrap().push(realm.clone());
        Ok(())
    }
}

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Route events on the current thread into this sink until the guard drops
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
