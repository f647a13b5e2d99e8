use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::client::{AuthenticatedFetcher, FetchRequest, TokenExchangeAdapter};
use crate::config::ImportConfig;
use crate::error::ImportResult;
use crate::model::{AccessToken, Contact, CurrentUser};
use crate::normalize::contact_normalizer::{feed_entries, normalize_feed};
use crate::normalize::{current_user, dedup_contacts};

pub const MAX_RESULTS_PARAM: &str = "maxResults";
pub const FORMAT_PARAM: &str = "format";
pub const FORMAT_JSON: &str = "json";

/// What a single import produced.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub user: Option<CurrentUser>,
    pub contacts: Vec<Contact>,
    #[serde(skip)]
    pub stats: ImportStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub entries: usize,
    pub unnamed: usize,
    pub duplicates: usize,
    pub contacts: usize,
}

/// Fetches the profile and the contacts feed for one account and normalizes them.
pub struct ImportOrchestrator<F> {
    fetcher: F,
    config: ImportConfig,
}

impl<F: AuthenticatedFetcher> ImportOrchestrator<F> {
    pub fn new(fetcher: F, config: ImportConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// Exchanges `code` for a token, then imports.
    pub fn import_with_grant(
        &self,
        exchange: &dyn TokenExchangeAdapter,
        code: &str,
    ) -> ImportResult<ImportOutcome> {
        let token = exchange.exchange(code)?;
        self.import(&token)
    }

    /// Profile first, then contacts. A failed request aborts the import.
    pub fn import(&self, token: &AccessToken) -> ImportResult<ImportOutcome> {
        let user = self.fetch_current_user(token)?;

        let body = self.fetcher.fetch(&self.contacts_request(token))?;
        let (contacts, stats) = contacts_from_response(&body)?;

        info!(
            entries = stats.entries,
            unnamed = stats.unnamed,
            duplicates = stats.duplicates,
            contacts = stats.contacts,
            "imported contacts"
        );
        Ok(ImportOutcome {
            user,
            contacts,
            stats,
        })
    }

    pub fn fetch_current_user(&self, token: &AccessToken) -> ImportResult<Option<CurrentUser>> {
        let body = self.fetcher.fetch(&self.profile_request(token))?;
        current_user(Some(body.as_str()), token)
    }

    pub fn profile_request(&self, token: &AccessToken) -> FetchRequest {
        FetchRequest::new(&self.config.profile_host, &self.config.profile_path)
            .headers(token.auth_headers())
    }

    pub fn contacts_request(&self, token: &AccessToken) -> FetchRequest {
        FetchRequest::new(&self.config.contacts_host, &self.config.contacts_path)
            .query(MAX_RESULTS_PARAM, self.config.max_results.to_string())
            .query(FORMAT_PARAM, FORMAT_JSON)
            .headers(token.auth_headers())
    }
}

/// Normalizes and deduplicates a contacts feed body.
pub fn contacts_from_response(body: &str) -> ImportResult<(Vec<Contact>, ImportStats)> {
    let json: Value = serde_json::from_str(body)?;
    let entries = feed_entries(&json).len();
    let named = normalize_feed(&json);
    let unnamed = entries - named.len();
    let before = named.len();
    let contacts = dedup_contacts(named);
    let stats = ImportStats {
        entries,
        unnamed,
        duplicates: before - contacts.len(),
        contacts: contacts.len(),
    };
    Ok((contacts, stats))
}
