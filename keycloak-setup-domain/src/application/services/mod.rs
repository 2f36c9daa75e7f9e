pub mod realm_bootstrap;

pub use realm_bootstrap::*;
