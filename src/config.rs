use std::env;
use std::time::Duration;

use crate::error::{ImportError, ImportResult};

const DEFAULT_MAX_RESULTS: u32 = 100;
const DEFAULT_CONTACTS_HOST: &str = "www.google.com";
const DEFAULT_CONTACTS_PATH: &str = "/m8/feeds/contacts/default/full";
const DEFAULT_PROFILE_HOST: &str = "www.googleapis.com";
const DEFAULT_PROFILE_PATH: &str = "/oauth2/v1/userinfo";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_AUTH_HOST: &str = "accounts.google.com";
const DEFAULT_TOKEN_PATH: &str = "/o/oauth2/token";

/// Where and how much to import.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    pub max_results: u32,
    pub contacts_host: String,
    pub contacts_path: String,
    pub profile_host: String,
    pub profile_path: String,
    pub timeout: Duration,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            contacts_host: DEFAULT_CONTACTS_HOST.to_string(),
            contacts_path: DEFAULT_CONTACTS_PATH.to_string(),
            profile_host: DEFAULT_PROFILE_HOST.to_string(),
            profile_path: DEFAULT_PROFILE_PATH.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ImportConfig {
    /// Defaults overridden by `CONTACTS_*` / `PROFILE_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_results: env::var("CONTACTS_MAX_RESULTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_results),
            contacts_host: env::var("CONTACTS_HOST").unwrap_or(defaults.contacts_host),
            contacts_path: env::var("CONTACTS_PATH").unwrap_or(defaults.contacts_path),
            profile_host: env::var("PROFILE_HOST").unwrap_or(defaults.profile_host),
            profile_path: env::var("PROFILE_PATH").unwrap_or(defaults.profile_path),
            timeout: env::var("CONTACTS_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }
}

/// OAuth2 client credentials used to exchange an authorization code.
#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub auth_host: String,
    pub token_path: String,
}

impl OAuthClientConfig {
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            auth_host: DEFAULT_AUTH_HOST.to_string(),
            token_path: DEFAULT_TOKEN_PATH.to_string(),
        }
    }

    pub fn from_env() -> ImportResult<Self> {
        Ok(Self::new(
            required_var("CONTACTS_CLIENT_ID")?,
            required_var("CONTACTS_CLIENT_SECRET")?,
            required_var("CONTACTS_REDIRECT_URI")?,
        ))
    }

    pub fn token_url(&self) -> String {
        format!("https://{}{}", self.auth_host, self.token_path)
    }
}

fn required_var(name: &str) -> ImportResult<String> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ImportError::Config(name.to_string()))
}
