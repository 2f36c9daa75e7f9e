pub mod client;
pub mod common;
pub mod realm;
pub mod user;

pub use client::*;
pub use common::*;
pub use realm::*;
pub use user::*;
