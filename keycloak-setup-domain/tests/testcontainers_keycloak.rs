use std::time::Duration;
use testcontainers::{
    core::IntoContainerPort, runners::AsyncRunner, ContainerAsync, GenericImage, ImageExt,
};

use keycloak_setup_domain::application::ports::config::KeycloakConfig;

const KEYCLOAK_IMAGE: &str = "quay.io/keycloak/keycloak";
const KEYCLOAK_TAG: &str = "26.2";
const KEYCLOAK_PORT: u16 = 8080;

/// Disposable Keycloak server with its connection details
pub struct KeycloakTestContainer {
    _container: ContainerAsync<GenericImage>,
    pub base_url: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl KeycloakTestContainer {
    /// Admin connection settings pointing at this container
    pub fn keycloak_config(&self) -> KeycloakConfig {
        KeycloakConfig {
            url: self.base_url.clone(),
            admin_username: self.admin_username.clone(),
            admin_password: self.admin_password.clone(),
            ..KeycloakConfig::default()
        }
    }

    pub fn realm_url(&self, realm: &str) -> String {
        format!("{}/realms/{}", self.base_url, realm)
    }
}

/// Start a fresh Keycloak server and wait until the master realm answers
pub async fn start_keycloak() -> KeycloakTestContainer {
    println!("Starting Keycloak container (this may take a while)...");

    let container = GenericImage::new(KEYCLOAK_IMAGE, KEYCLOAK_TAG)
        .with_exposed_port(KEYCLOAK_PORT.tcp())
        .with_env_var("KC_BOOTSTRAP_ADMIN_USERNAME", "admin")
        .with_env_var("KC_BOOTSTRAP_ADMIN_PASSWORD", "admin")
        // Reduce memory usage for testing
        .with_env_var("JAVA_OPTS_KC_HEAP", "-XX:InitialRAMPercentage=1 -XX:MaxRAMPercentage=5")
        .with_cmd(vec!["start-dev", "--http-relative-path=/"])
        .start()
        .await
        .expect("Failed to start Keycloak container");

    let host_port = container
        .get_host_port_ipv4(KEYCLOAK_PORT)
        .await
        .expect("Keycloak port should be mapped");
    let base_url = format!("http://localhost:{host_port}");

    let keycloak = KeycloakTestContainer {
        _container: container,
        base_url,
        admin_username: "admin".to_string(),
        admin_password: "admin".to_string(),
    };

    wait_for_realm(&keycloak.realm_url("master"), 60)
        .await
        .expect("Keycloak did not become ready");
    println!("Keycloak started at: {}", keycloak.base_url);

    keycloak
}

/// Poll a realm endpoint until it answers with a success status
pub async fn wait_for_realm(
    realm_url: &str,
    max_attempts: u32,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let client = reqwest::Client::new();

    for attempt in 1..=max_attempts {
        match client.get(realm_url).send().await {
            Ok(response) if response.status().is_success() => return Ok(()),
            Ok(response) => {
                println!("Keycloak not ready: {} (attempt {attempt})", response.status());
            }
            Err(e) => {
                println!("Keycloak not reachable: {e} (attempt {attempt})");
            }
        }
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    Err(format!("Keycloak not ready after {max_attempts} attempts").into())
}
