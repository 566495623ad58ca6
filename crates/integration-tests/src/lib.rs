//! Integration tests for Hearthwood.
//!
//! The storefront router is driven in-process with `tower::ServiceExt::oneshot`,
//! so no server or network is needed:
//!
//! ```bash
//! cargo test -p hearthwood-integration-tests
//! ```
//!
//! [`TestClient`] keeps the session cookie between requests, which makes a
//! sequence of calls behave like one visitor's browser.

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use hearthwood_storefront::{AppState, StorefrontConfig, catalog::Catalog};
use tower::ServiceExt;

pub use hearthwood_storefront::middleware::session::SESSION_COOKIE_NAME as SESSION_COOKIE;

/// Storefront configuration for tests: no confirmation delay.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    let mut config = StorefrontConfig::default();
    config.checkout.confirmation_delay = Duration::ZERO;
    config
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// The `Location` header of a redirect.
    ///
    /// # Panics
    ///
    /// Panics if the header is missing.
    #[must_use]
    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .expect("response has no Location header")
    }

    /// Header value as a string, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// In-process HTTP client bound to a single visitor session.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Client for a storefront with the embedded catalog.
    ///
    /// # Panics
    ///
    /// Panics if the embedded catalog cannot be loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// Client for a storefront with the embedded catalog and `config`.
    ///
    /// # Panics
    ///
    /// Panics if the embedded catalog cannot be loaded.
    #[must_use]
    pub fn with_config(config: StorefrontConfig) -> Self {
        let catalog = Catalog::embedded().expect("embedded catalog loads");
        Self::with_state(AppState::new(config, catalog))
    }

    /// Client for a storefront with the given state.
    #[must_use]
    pub fn with_state(state: AppState) -> Self {
        Self {
            app: hearthwood_storefront::app(state),
            cookie: None,
        }
    }

    /// Another visitor of the same storefront (shares the session store, not
    /// the cookie).
    #[must_use]
    pub fn new_visitor(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: None,
        }
    }

    /// A second browser tab of this visitor (same session cookie).
    #[must_use]
    pub fn same_visitor(&self) -> Self {
        Self {
            app: self.app.clone(),
            cookie: self.cookie.clone(),
        }
    }

    /// Send a GET request.
    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    /// Send a url-encoded form POST.
    pub async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.send(Method::POST, uri, Some(body)).await
    }

    /// GET the target of a redirect.
    ///
    /// # Panics
    ///
    /// Panics if `response` is not a 303 redirect.
    pub async fn follow(&mut self, response: &TestResponse) -> TestResponse {
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{}", response.body);
        let location = response.location().to_string();
        self.get(&location).await
    }

    async fn send(&mut self, method: Method, uri: &str, form: Option<String>) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                request = request.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(form)
            }
            None => Body::empty(),
        };
        let request = request.body(body).expect("valid request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        if let Some(cookie) = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with(SESSION_COOKIE))
            .and_then(|value| value.split(';').next())
        {
            self.cookie = Some(cookie.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
