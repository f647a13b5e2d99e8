use std::cell::RefCell;
use std::collections::VecDeque;

use contact_import::client::{AuthenticatedFetcher, FetchRequest, StaticToken};
use contact_import::config::ImportConfig;
use contact_import::error::{ImportError, ImportResult};
use contact_import::import::*;
use contact_import::model::AccessToken;
use serde_json::json;

/// Answers requests from a queue and remembers what was asked.
struct FakeFetcher {
    responses: RefCell<VecDeque<ImportResult<String>>>,
    requests: RefCell<Vec<FetchRequest>>,
}

impl FakeFetcher {
    fn new(responses: Vec<ImportResult<String>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<FetchRequest> {
        self.requests.borrow().clone()
    }
}

impl AuthenticatedFetcher for FakeFetcher {
    fn fetch(&self, request: &FetchRequest) -> ImportResult<String> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ImportError::Other("no response queued".into())))
    }
}

fn token() -> AccessToken {
    AccessToken::new("secret-token".into(), "Bearer".into())
}

fn profile_body() -> String {
    json!({
        "id": "1234567890",
        "email": "me@example.com",
        "name": "Me Myself",
        "given_name": "Me",
        "family_name": "Myself",
        "gender": "female",
        "birthday": "0000-03-14"
    })
    .to_string()
}

fn contacts_body() -> String {
    json!({
        "feed": { "entry": [
            { "gd$name": { "gd$fullName": { "$t": "Jane Doe" } },
              "gd$email": [{ "rel": "http://schemas.google.com/g/2005#home", "address": "a@b.com" }] },
            { "gd$name": { "gd$fullName": { "$t": "Jane Again" } },
              "gd$email": [{ "address": "a@b.com" }] },
            { "gd$email": [{ "address": "nobody@example.com" }] },
            { "gd$phoneNumber": [{ "$t": "555-0100" }] },
            { "gd$name": { "gd$fullName": { "$t": "Bob" } } }
        ]}
    })
    .to_string()
}

// ==========================================================================
// REQUEST SHAPE TESTS
// ==========================================================================

#[test]
fn profile_then_contacts_with_auth_headers() {
    let fetcher = FakeFetcher::new(vec![Ok(profile_body()), Ok(contacts_body())]);
    let orchestrator = ImportOrchestrator::new(&fetcher, ImportConfig::default());
    orchestrator.import(&token()).unwrap();

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 2);

    let profile = &requests[0];
    assert_eq!(profile.host, "www.googleapis.com");
    assert_eq!(profile.path, "/oauth2/v1/userinfo");

    let contacts = &requests[1];
    assert_eq!(contacts.host, "www.google.com");
    assert_eq!(contacts.path, "/m8/feeds/contacts/default/full");
    assert_eq!(
        contacts.query,
        vec![
            ("maxResults".to_string(), "100".to_string()),
            ("format".to_string(), "json".to_string()),
        ]
    );

    for request in &requests {
        assert_eq!(request.header("API-Version"), Some("3.0"));
        assert_eq!(request.header("Authorization"), Some("Bearer secret-token"));
    }
}

#[test]
fn max_results_is_configurable() {
    let fetcher = FakeFetcher::new(vec![Ok(profile_body()), Ok("{}".into())]);
    let orchestrator =
        ImportOrchestrator::new(&fetcher, ImportConfig::default().with_max_results(25));
    orchestrator.import(&token()).unwrap();
    let contacts = &fetcher.requests()[1];
    assert_eq!(contacts.query[0], ("maxResults".to_string(), "25".to_string()));
}

// ==========================================================================
// OUTCOME TESTS
// ==========================================================================

#[test]
fn import_maps_user_and_dedups_contacts() {
    let fetcher = FakeFetcher::new(vec![Ok(profile_body()), Ok(contacts_body())]);
    let orchestrator = ImportOrchestrator::new(&fetcher, ImportConfig::default());
    let outcome = orchestrator.import(&token()).unwrap();

    let user = outcome.user.expect("user");
    assert_eq!(user.id.as_deref(), Some("1234567890"));
    assert_eq!(user.first_name.as_deref(), Some("Me"));
    assert_eq!(user.last_name.as_deref(), Some("Myself"));
    assert_eq!(
        user.profile_picture.as_deref(),
        Some("https://profiles.google.com/s2/photos/profile/1234567890")
    );
    assert_eq!(user.birthday.as_ref().map(|b| b.month.as_str()), Some("03"));
    assert_eq!(user.access_token, "secret-token");
    assert_eq!(user.token_type, "Bearer");

    let names: Vec<_> = outcome.contacts.iter().filter_map(|c| c.name.as_deref()).collect();
    assert_eq!(names, vec!["Jane Doe", "nobody", "Bob"]);

    assert_eq!(
        outcome.stats,
        ImportStats {
            entries: 5,
            unnamed: 1,
            duplicates: 1,
            contacts: 3,
        }
    );
}

#[test]
fn missing_profile_fields_are_empty() {
    let fetcher = FakeFetcher::new(vec![Ok(r#"{"id": "42"}"#.into()), Ok("{}".into())]);
    let orchestrator = ImportOrchestrator::new(&fetcher, ImportConfig::default());
    let user = orchestrator.import(&token()).unwrap().user.unwrap();
    assert_eq!(user.id.as_deref(), Some("42"));
    assert_eq!(user.email, None);
    assert_eq!(user.birthday, None);
}

#[test]
fn blank_profile_body_gives_no_user() {
    let fetcher = FakeFetcher::new(vec![Ok(String::new()), Ok(contacts_body())]);
    let orchestrator = ImportOrchestrator::new(&fetcher, ImportConfig::default());
    let outcome = orchestrator.import(&token()).unwrap();
    assert!(outcome.user.is_none());
    assert_eq!(outcome.contacts.len(), 3);
}

#[test]
fn empty_feed_is_not_an_error() {
    let fetcher = FakeFetcher::new(vec![Ok(profile_body()), Ok(r#"{"feed": {}}"#.into())]);
    let orchestrator = ImportOrchestrator::new(&fetcher, ImportConfig::default());
    let outcome = orchestrator.import(&token()).unwrap();
    assert!(outcome.contacts.is_empty());
    assert_eq!(outcome.stats.entries, 0);
}

#[test]
fn import_with_grant_uses_exchanged_token() {
    let fetcher = FakeFetcher::new(vec![Ok(profile_body()), Ok("{}".into())]);
    let orchestrator = ImportOrchestrator::new(&fetcher, ImportConfig::default());
    let exchange = StaticToken(AccessToken::new("granted".into(), "OAuth".into()));
    let outcome = orchestrator.import_with_grant(&exchange, "code-123").unwrap();
    assert_eq!(outcome.user.unwrap().access_token, "granted");
    assert_eq!(fetcher.requests()[0].header("Authorization"), Some("OAuth granted"));
}

// ==========================================================================
// FAILURE TESTS
// ==========================================================================

#[test]
fn transport_failure_on_profile_stops_import() {
    let fetcher = FakeFetcher::new(vec![Err(ImportError::HttpStatus {
        url: "https://www.googleapis.com/oauth2/v1/userinfo".into(),
        status: 401,
        body: "unauthorized".into(),
    })]);
    let orchestrator = ImportOrchestrator::new(&fetcher, ImportConfig::default());
    let err = orchestrator.import(&token()).unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(fetcher.requests().len(), 1);
}

#[test]
fn transport_failure_on_contacts_is_surfaced() {
    let fetcher = FakeFetcher::new(vec![
        Ok(profile_body()),
        Err(ImportError::Transport {
            url: "https://www.google.com/m8/feeds/contacts/default/full".into(),
            message: "connection reset".into(),
        }),
    ]);
    let orchestrator = ImportOrchestrator::new(&fetcher, ImportConfig::default());
    let err = orchestrator.import(&token()).unwrap_err();
    assert!(matches!(err, ImportError::Transport { .. }));
}

#[test]
fn malformed_contacts_body_is_a_json_error() {
    let fetcher = FakeFetcher::new(vec![Ok(profile_body()), Ok("<html>".into())]);
    let orchestrator = ImportOrchestrator::new(&fetcher, ImportConfig::default());
    let err = orchestrator.import(&token()).unwrap_err();
    assert!(matches!(err, ImportError::Json(_)));
}

#[test]
fn outcome_serializes_user_and_contacts() {
    let (contacts, _) = contacts_from_response(&contacts_body()).unwrap();
    let outcome = ImportOutcome {
        user: None,
        contacts,
        stats: ImportStats::default(),
    };
    let v = serde_json::to_value(&outcome).unwrap();
    assert!(v["user"].is_null());
    assert_eq!(v["contacts"].as_array().map(|a| a.len()), Some(3));
    assert!(v.get("stats").is_none());
}
