use serde::{Deserialize, Serialize};

pub const PASSWORD_CREDENTIAL_TYPE: &str = "password";

/// Credentials for authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub type_: String,
    pub value: String,
    pub temporary: bool,
}

impl Credential {
    pub fn password(value: String, temporary: bool) -> Self {
        Self {
            type_: PASSWORD_CREDENTIAL_TYPE.to_string(),
            value,
            temporary,
        }
    }
}
