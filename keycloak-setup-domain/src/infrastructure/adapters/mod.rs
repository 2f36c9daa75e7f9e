pub mod env_config;
pub mod keycloak_admin_auth;
pub mod keycloak_rest;

pub use env_config::*;
pub use keycloak_admin_auth::*;
pub use keycloak_rest::*;
