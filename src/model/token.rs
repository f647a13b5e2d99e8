use serde::{Deserialize, Serialize};

pub const API_VERSION_HEADER: &str = "API-Version";
pub const API_VERSION: &str = "3.0";
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// An access token and its type as issued by the authorization server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn new(access_token: String, token_type: String) -> Self {
        Self {
            access_token,
            token_type,
        }
    }

    pub fn bearer(access_token: String) -> Self {
        Self::new(access_token, DEFAULT_TOKEN_TYPE.to_string())
    }

    /// Headers sent with every authenticated request.
    pub fn auth_headers(&self) -> Vec<(String, String)> {
        vec![
            (API_VERSION_HEADER.to_string(), API_VERSION.to_string()),
            (
                "Authorization".to_string(),
                format!("{} {}", self.token_type, self.access_token),
            ),
        ]
    }
}
