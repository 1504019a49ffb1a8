// src/checker/http.rs
// =============================================================================
// Reachability probes over HTTP.
//
// Key functionality:
// - Probe: the seam between the classifier and the network, so tests (or
//   another transport) can answer probes without touching the network
// - HttpProber: HEAD requests through a shared reqwest Client, following
//   redirects up to the configured cap
// - categorize_error: turns a reqwest error into a short kind name
//   ("DnsError", "SslError", ...) for the report
// =============================================================================

use super::status::ProbeError;
use crate::config::Config;
use reqwest::Client;
use std::future::Future;

/// Answers "what HTTP status does this URL give?".
///
/// Implementations return the status code of the final response (after
/// redirects) or a ProbeError. The classifier enforces its own deadline on
/// top, so a probe that never finishes is still reported as a timeout.
pub trait Probe {
    fn probe(&self, url: &str) -> impl Future<Output = Result<u16, ProbeError>> + Send;
}

/// Probes URLs with HTTP HEAD requests.
///
/// Cloning is cheap: reqwest's Client is reference counted internally and
/// keeps one connection pool for every probe.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
}

impl HttpProber {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("md-lens/", env!("CARGO_PKG_VERSION")))
            .timeout(config.probe_timeout())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }
}

impl Probe for HttpProber {
    fn probe(&self, url: &str) -> impl Future<Output = Result<u16, ProbeError>> + Send {
        // HEAD: we only need the status line, not the body
        let request = self.client.head(url);

        async move {
            match request.send().await {
                Ok(response) => Ok(response.status().as_u16()),
                Err(e) => Err(categorize_error(&e)),
            }
        }
    }
}

// Categorizes different error types from reqwest
//
// The interesting detail (DNS failure, certificate problem) is usually a few
// levels down the source chain, so the whole chain is searched.
fn categorize_error(error: &reqwest::Error) -> ProbeError {
    if error.is_timeout() {
        return ProbeError::Timeout;
    }

    let chain = error_chain(error).to_lowercase();

    let name = if error.is_redirect() {
        "TooManyRedirects"
    } else if chain.contains("certificate") || chain.contains("ssl") || chain.contains("tls") {
        "SslError"
    } else if error.is_connect() {
        if chain.contains("dns") || chain.contains("resolve") || chain.contains("lookup") {
            "DnsError"
        } else {
            "ConnectionError"
        }
    } else if error.is_builder() {
        "InvalidUrl"
    } else if error.is_request() {
        "RequestError"
    } else {
        "HttpError"
    };

    ProbeError::Transport(name.to_string())
}

// Joins an error and all of its sources into one string
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut parts = vec![error.to_string()];
    let mut source = error.source();
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ")
}
