use std::io::Read;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{ImportError, ImportResult};

const ERROR_BODY_LIMIT: usize = 200;

/// One authenticated GET: `https://{host}{path}?{query}` with `headers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub host: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn new(host: &str, path: &str) -> Self {
        Self {
            host: host.to_string(),
            path: path.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn url(&self) -> String {
        format!("https://{}{}", self.host, self.path)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Issues authenticated GET requests and returns the raw body.
pub trait AuthenticatedFetcher {
    fn fetch(&self, request: &FetchRequest) -> ImportResult<String>;
}

impl<F: AuthenticatedFetcher + ?Sized> AuthenticatedFetcher for &F {
    fn fetch(&self, request: &FetchRequest) -> ImportResult<String> {
        (**self).fetch(request)
    }
}

/// Blocking HTTPS fetcher backed by a `ureq` agent.
pub struct UreqFetcher {
    agent: ureq::Agent,
}

impl UreqFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl AuthenticatedFetcher for UreqFetcher {
    fn fetch(&self, request: &FetchRequest) -> ImportResult<String> {
        let url = request.url();
        debug!(host = %request.host, path = %request.path, "GET");

        let mut call = self.agent.get(&url);
        for (key, value) in &request.query {
            call = call.query(key, value);
        }
        for (name, value) in &request.headers {
            call = call.set(name, value);
        }

        let response = call.call().map_err(|e| transport_error(&url, e))?;
        read_body(response.into_reader())
    }
}

/// Reads a whole response body. Unlike `Response::into_string` this has no
/// size cap, so large feeds come through.
pub fn read_body(mut reader: impl Read) -> ImportResult<String> {
    let mut body = String::new();
    reader.read_to_string(&mut body)?;
    Ok(body)
}

pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(ERROR_BODY_LIMIT).collect()
}

pub(crate) fn transport_error(url: &str, error: ureq::Error) -> ImportError {
    match error {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            warn!(url, status, "request failed");
            ImportError::HttpStatus {
                url: url.to_string(),
                status,
                body: truncate_body(&body),
            }
        }
        ureq::Error::Transport(t) => ImportError::Transport {
            url: url.to_string(),
            message: t.to_string(),
        },
    }
}
