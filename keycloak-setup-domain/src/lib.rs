/*!
# Keycloak Setup Domain

Domain layer for bootstrapping Keycloak realms using hexagonal architecture
principles.

This crate provides:
- Domain models for the realms, OAuth2 clients and admin users to provision
- Port definitions for the admin API and configuration
- The realm bootstrap service, which creates missing realms and skips existing ones
- Infrastructure adapters backed by the `keycloak` admin client

## Architecture

```text
┌─────────────────────────────────────────────────────────────┐
│                    Primary Adapter                          │
├─────────────────────────────────────────────────────────────┤
│              keycloak-setup (one-shot binary)               │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                Application Layer                            │
├─────────────────────────────────────────────────────────────┤
│  • RealmBootstrapService                                    │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                 Domain Layer (Ports)                        │
├─────────────────────────────────────────────────────────────┤
│  • KeycloakRepository       • ConfigurationPort             │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│              Infrastructure Layer (Adapters)                │
├─────────────────────────────────────────────────────────────┤
│  • KeycloakRestAdapter      • EnvConfigurationAdapter       │
│  • KeycloakAdminAuthenticator                               │
└─────────────────────────────────────────────────────────────┘
```

## Usage

```rust,no_run
use std::sync::Arc;
use keycloak_setup_domain::{
    AppConfig, KeycloakAdminAuthenticator, KeycloakRestAdapter, RealmBootstrapService,
};

# async fn example() -> Result<(), Box<dyn std::error::Error>> {
let config = AppConfig::from_env()?;
let admin = KeycloakAdminAuthenticator::new(config.keycloak.clone(), &config.http)?
    .connect()
    .await?;

let service = RealmBootstrapService::new(Arc::new(KeycloakRestAdapter::new(admin)));
let report = service.run(&config.realms).await?;
println!("created {:?}, skipped {:?}", report.created, report.skipped);
# Ok(())
# }
```
*/

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::ports::*;
pub use application::services::*;
pub use domain::entities::*;
pub use domain::errors::*;
pub use infrastructure::adapters::*;
