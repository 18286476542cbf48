//! Remote API Client
//!
//! HTTP bindings to the lost-and-found service, organized by endpoint.
//! Every call is bounded by a timeout; idempotent calls are retried a
//! bounded number of times with exponential backoff.

mod items;

use std::future::Future;
use std::time::Duration;

use futures::future::{self, Either};
use futures::pin_mut;
use gloo_timers::future::TimeoutFuture;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Whether an endpoint needs the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    Bearer,
    Public,
}

/// Every route of the service with its method and auth requirement.
/// This app only issues the reads; report and auth forms post from their
/// own pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    AllItems,
    RecentItems,
    RecentActivity,
    Search,
    ReportLost,
    ReportFound,
    Login,
    Register,
    ForgotPassword,
}

impl Endpoint {
    pub const ALL: [Endpoint; 9] = [
        Endpoint::AllItems,
        Endpoint::RecentItems,
        Endpoint::RecentActivity,
        Endpoint::Search,
        Endpoint::ReportLost,
        Endpoint::ReportFound,
        Endpoint::Login,
        Endpoint::Register,
        Endpoint::ForgotPassword,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::AllItems => "/items/getAllItems",
            Endpoint::RecentItems => "/items/recent",
            Endpoint::RecentActivity => "/items/activity/recent",
            Endpoint::Search => "/items/search",
            Endpoint::ReportLost => "/lost-items/report-lost",
            Endpoint::ReportFound => "/found-items/report-found",
            Endpoint::Login => "/auth/login",
            Endpoint::Register => "/auth/register",
            Endpoint::ForgotPassword => "/auth/forgot-password",
        }
    }

    pub fn method(&self) -> Method {
        match self {
            Endpoint::AllItems
            | Endpoint::RecentItems
            | Endpoint::RecentActivity
            | Endpoint::Search => Method::Get,
            _ => Method::Post,
        }
    }

    /// Item endpoints always carry the token, auth endpoints never do
    pub fn auth(&self) -> Auth {
        match self {
            Endpoint::Login | Endpoint::Register | Endpoint::ForgotPassword => Auth::Public,
            _ => Auth::Bearer,
        }
    }
}

/// Query component encoding: everything except unreserved characters
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn build_url(base_url: &str, endpoint: Endpoint, query: &[(&str, &str)]) -> String {
    let mut url = format!("{}{}", base_url.trim_end_matches('/'), endpoint.path());
    for (i, (key, value)) in query.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.extend(utf8_percent_encode(value, QUERY_ENCODE_SET));
    }
    url
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Delay before retry number `attempt` (1-based), doubling each time
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }

    pub fn should_retry(&self, attempt: u32, err: &AppError) -> bool {
        attempt < self.max_retries && err.is_retryable()
    }
}

fn millis(duration: Duration) -> u32 {
    duration.as_millis().min(u32::MAX as u128) as u32
}

/// Race `fut` against a timer
async fn with_timeout<F: Future>(fut: F, limit: Duration) -> Result<F::Output> {
    let timer = TimeoutFuture::new(millis(limit));
    pin_mut!(fut);
    pin_mut!(timer);
    match future::select(fut, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(AppError::Timeout(limit)),
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Session) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            retry: RetryPolicy::from_config(config),
            session,
        }
    }

    async fn send_once(&self, url: &str, token: Option<&str>) -> Result<Value> {
        let mut request = self.http.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = with_timeout(request.send(), self.timeout).await??;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                status: status.as_u16(),
            });
        }
        let body = with_timeout(response.text(), self.timeout).await??;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET `endpoint` and return the JSON body, retrying transient failures
    pub async fn get_json(&self, endpoint: Endpoint, query: &[(&str, &str)]) -> Result<Value> {
        debug_assert_eq!(endpoint.method(), Method::Get, "{:?} is not a read", endpoint);
        let token = match endpoint.auth() {
            Auth::Bearer => Some(self.session.require_token()?),
            Auth::Public => None,
        };
        let url = build_url(&self.base_url, endpoint, query);

        let mut attempt = 0;
        loop {
            match self.send_once(&url, token.as_deref()).await {
                Ok(body) => return Ok(body),
                Err(err) if self.retry.should_retry(attempt, &err) => {
                    attempt += 1;
                    let delay = self.retry.delay_for(attempt);
                    log::warn!(
                        "[API] {} failed ({}), retry {}/{} in {:?}",
                        endpoint.path(),
                        err,
                        attempt,
                        self.retry.max_retries,
                        delay
                    );
                    TimeoutFuture::new(millis(delay)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_policy_is_uniform() {
        for endpoint in Endpoint::ALL {
            let expected = if endpoint.path().starts_with("/auth/") {
                Auth::Public
            } else {
                Auth::Bearer
            };
            assert_eq!(endpoint.auth(), expected, "{:?}", endpoint);
        }
    }

    #[test]
    fn test_only_reads_are_get() {
        let gets: Vec<_> = Endpoint::ALL
            .into_iter()
            .filter(|endpoint| endpoint.method() == Method::Get)
            .collect();
        assert_eq!(
            gets,
            vec![Endpoint::AllItems, Endpoint::RecentItems, Endpoint::RecentActivity, Endpoint::Search]
        );
    }

    #[test]
    fn test_build_url_encodes_query() {
        let url = build_url("http://localhost:5000/api/", Endpoint::Search, &[("query", "black wallet & keys")]);
        assert_eq!(
            url,
            "http://localhost:5000/api/items/search?query=black%20wallet%20%26%20keys"
        );
        assert_eq!(
            build_url("http://x/api", Endpoint::AllItems, &[]),
            "http://x/api/items/getAllItems"
        );
    }

    #[test]
    fn test_retry_backoff_doubles() {
        let policy = RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_millis(300),
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(300));
        assert_eq!(policy.delay_for(2), Duration::from_millis(600));
        assert_eq!(policy.delay_for(3), Duration::from_millis(1200));
    }

    #[test]
    fn test_retry_is_bounded() {
        let policy = RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(10),
        };
        let err = AppError::Status { status: 503 };
        assert!(policy.should_retry(0, &err));
        assert!(policy.should_retry(1, &err));
        assert!(!policy.should_retry(2, &err));
        assert!(!policy.should_retry(0, &AppError::Status { status: 400 }));
    }
}
