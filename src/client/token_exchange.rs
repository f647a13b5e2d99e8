use serde_json::Value;
use tracing::debug;

use super::fetcher::{read_body, transport_error, truncate_body};
use crate::config::OAuthClientConfig;
use crate::error::{ImportError, ImportResult};
use crate::model::token::DEFAULT_TOKEN_TYPE;
use crate::model::AccessToken;
use crate::parse::str_at;

/// Turns an authorization grant into an access token.
pub trait TokenExchangeAdapter {
    fn exchange(&self, code: &str) -> ImportResult<AccessToken>;
}

/// A token obtained elsewhere; the grant is ignored.
pub struct StaticToken(pub AccessToken);

impl TokenExchangeAdapter for StaticToken {
    fn exchange(&self, _code: &str) -> ImportResult<AccessToken> {
        Ok(self.0.clone())
    }
}

/// Standard `authorization_code` grant against the provider's token endpoint.
pub struct OAuth2CodeExchange {
    config: OAuthClientConfig,
    agent: ureq::Agent,
}

impl OAuth2CodeExchange {
    pub fn new(config: OAuthClientConfig, agent: ureq::Agent) -> Self {
        Self { config, agent }
    }
}

impl TokenExchangeAdapter for OAuth2CodeExchange {
    fn exchange(&self, code: &str) -> ImportResult<AccessToken> {
        let url = self.config.token_url();
        debug!(host = %self.config.auth_host, "exchanging authorization code");

        let response = self
            .agent
            .post(&url)
            .send_form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .map_err(|e| match e {
                ureq::Error::Status(status, resp) => ImportError::TokenExchange(format!(
                    "HTTP {}: {}",
                    status,
                    truncate_body(&resp.into_string().unwrap_or_default())
                )),
                other => transport_error(&url, other),
            })?;

        let json: Value = serde_json::from_str(&read_body(response.into_reader())?)?;
        access_token_from_response(&json)
    }
}

/// Reads `access_token` and `token_type` from a token endpoint response.
pub fn access_token_from_response(json: &Value) -> ImportResult<AccessToken> {
    if let Some(error) = str_at(json, &["error"]) {
        return Err(ImportError::TokenExchange(error));
    }
    let access_token = str_at(json, &["access_token"])
        .ok_or_else(|| ImportError::TokenExchange("No access_token in response".into()))?;
    let token_type = str_at(json, &["token_type"]).unwrap_or_else(|| DEFAULT_TOKEN_TYPE.into());
    Ok(AccessToken::new(access_token, token_type))
}
