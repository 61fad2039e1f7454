//! API Client
//!
//! Single boundary between components and the Battle REST API. Owns the
//! session token, builds authenticated requests over `fetch`, and normalizes
//! server errors into one message-carrying kind.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::models::{Health, Item, TokenResponse, User};
use crate::session::Session;

/// Compile-time base URL override; empty means same-origin (dev server proxy).
const API_URL: &str = match option_env!("API_URL") {
    Some(url) => url,
    None => "",
};

/// Single error kind surfaced to components: a human-readable message built
/// from the server's `detail` field or a generic fallback. No distinction
/// between network failure, 4xx, and 5xx beyond the message text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

// ========================
// Request Options
// ========================

/// Options for a generic request. Body is pre-serialized; `headers` override
/// the defaults by name.
pub struct RequestOpts<'a> {
    pub method: &'a str,
    pub body: Option<String>,
    pub headers: Vec<(&'a str, &'a str)>,
}

impl Default for RequestOpts<'_> {
    fn default() -> Self {
        Self {
            method: "GET",
            body: None,
            headers: Vec::new(),
        }
    }
}

// ========================
// Request Body Structs
// ========================

#[derive(Serialize)]
struct RegisterBody<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CreateItemBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

/// Response before normalization. `body` is `None` for 204 No Content.
struct RawResponse {
    status: u16,
    ok: bool,
    body: Option<String>,
}

// ========================
// Client
// ========================

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self {
            base_url: base_url.into(),
            session,
        }
    }

    /// Client pointed at the compile-time `API_URL` (or same-origin).
    pub fn from_env(session: Session) -> Self {
        Self::new(API_URL, session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current bearer token, if one is held.
    pub fn token(&self) -> Option<String> {
        self.session.get()
    }

    /// Clears the session token. No server call.
    pub fn logout(&self) {
        self.session.set(None);
    }

    /// Generic authenticated request against `{base_url}{endpoint}`.
    ///
    /// JSON content type by default, caller headers merged on top, bearer
    /// auth attached iff a token is held. Non-2xx responses fail with the
    /// body's `detail` message or `HTTP <status>`; 204 resolves without
    /// touching the body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        opts: RequestOpts<'_>,
    ) -> Result<T, ApiError> {
        let raw = self.send(endpoint, opts).await?;
        if !raw.ok {
            let body = raw.body.as_deref().unwrap_or("");
            return Err(ApiError::new(error_message(raw.status, body)));
        }
        decode_body(raw.body.as_deref())
    }

    async fn send(&self, endpoint: &str, opts: RequestOpts<'_>) -> Result<RawResponse, ApiError> {
        let init = RequestInit::new();
        init.set_method(opts.method);
        if let Some(body) = &opts.body {
            init.set_body(&JsValue::from_str(body));
        }

        let url = format!("{}{}", self.base_url, endpoint);
        let request = Request::new_with_str_and_init(&url, &init)
            .map_err(|_| ApiError::new("Failed to build request"))?;
        let header_map = request.headers();
        for (name, value) in request_headers(&opts.headers, self.session.get().as_deref()) {
            header_map
                .set(&name, &value)
                .map_err(|_| ApiError::new("Failed to build request"))?;
        }

        let window = web_sys::window().ok_or_else(|| ApiError::new("No window available"))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|_| ApiError::new("Network request failed"))?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| ApiError::new("Network request failed"))?;

        let status = response.status();
        if status == 204 {
            return Ok(RawResponse {
                status,
                ok: response.ok(),
                body: None,
            });
        }
        let body = match response.text() {
            Ok(promise) => JsFuture::from(promise)
                .await
                .ok()
                .and_then(|text| text.as_string())
                .unwrap_or_default(),
            Err(_) => String::new(),
        };
        Ok(RawResponse {
            status,
            ok: response.ok(),
            body: Some(body),
        })
    }

    // ========================
    // Auth Endpoints
    // ========================

    /// Posts form-urlencoded credentials and stores the returned token.
    ///
    /// The only call that is not JSON; failures fall back to a generic login
    /// message rather than `HTTP <status>`.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let body = form_encode(&[("username", username), ("password", password)]);
        let opts = RequestOpts {
            method: "POST",
            body: Some(body),
            headers: vec![("Content-Type", "application/x-www-form-urlencoded")],
        };
        let raw = self.send("/auth/token", opts).await?;
        if !raw.ok {
            let detail = raw.body.as_deref().and_then(error_detail);
            return Err(ApiError::new(
                detail.unwrap_or_else(|| "Login failed".to_string()),
            ));
        }
        let token: TokenResponse = decode_body(raw.body.as_deref())?;
        self.session.set(Some(token.access_token.clone()));
        Ok(token)
    }

    /// Creates an account. Does not log the user in.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        let body = serde_json::to_string(&RegisterBody {
            email,
            username,
            password,
        })
        .map_err(|e| ApiError::new(e.to_string()))?;
        self.request(
            "/auth/register",
            RequestOpts {
                method: "POST",
                body: Some(body),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.request("/auth/me", RequestOpts::default()).await
    }

    // ========================
    // Item Endpoints
    // ========================

    pub async fn get_items(&self) -> Result<Vec<Item>, ApiError> {
        self.request("/items", RequestOpts::default()).await
    }

    pub async fn create_item(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Item, ApiError> {
        let body = serde_json::to_string(&CreateItemBody { title, description })
            .map_err(|e| ApiError::new(e.to_string()))?;
        self.request(
            "/items",
            RequestOpts {
                method: "POST",
                body: Some(body),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn delete_item(&self, id: i64) -> Result<(), ApiError> {
        self.request(
            &format!("/items/{id}"),
            RequestOpts {
                method: "DELETE",
                ..Default::default()
            },
        )
        .await
    }

    // ========================
    // Health Check
    // ========================

    pub async fn health(&self) -> Result<Health, ApiError> {
        self.request("/health", RequestOpts::default()).await
    }
}

// ========================
// Request/Response Helpers
// ========================

/// Headers for a generic request: JSON content type by default, caller
/// overrides merged by name, bearer auth appended iff a token is held.
fn request_headers(
    overrides: &[(&str, &str)],
    token: Option<&str>,
) -> Vec<(String, String)> {
    let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
    for (name, value) in overrides {
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
        headers.push((name.to_string(), value.to_string()));
    }
    if let Some(token) = token {
        headers.push(("Authorization".to_string(), format!("Bearer {token}")));
    }
    headers
}

/// `detail` field of a JSON error body, when the body parses as one.
fn error_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: Option<String>,
    }
    serde_json::from_str::<ErrorBody>(body).ok()?.detail
}

/// Message for a non-2xx response: the body's `detail`, or `HTTP <status>`.
fn error_message(status: u16, body: &str) -> String {
    error_detail(body).unwrap_or_else(|| format!("HTTP {status}"))
}

/// Decodes an optional response body. A missing body (204) decodes as JSON
/// null so unit-returning calls resolve instead of hitting a parse error.
fn decode_body<T: DeserializeOwned>(body: Option<&str>) -> Result<T, ApiError> {
    serde_json::from_str(body.unwrap_or("null"))
        .map_err(|e| ApiError::new(format!("Invalid response body: {e}")))
}

/// application/x-www-form-urlencoded encoding for the login body.
fn form_encode(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key, NON_ALPHANUMERIC),
                utf8_percent_encode(value, NON_ALPHANUMERIC)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_no_token_no_auth_header() {
        let headers = request_headers(&[], None);
        assert_eq!(header(&headers, "Content-Type"), Some("application/json"));
        assert_eq!(header(&headers, "Authorization"), None);
    }

    #[test]
    fn test_token_sets_bearer_header() {
        let headers = request_headers(&[], Some("tok-1"));
        assert_eq!(header(&headers, "Authorization"), Some("Bearer tok-1"));
    }

    #[test]
    fn test_caller_header_overrides_content_type() {
        let headers = request_headers(
            &[("Content-Type", "application/x-www-form-urlencoded")],
            None,
        );
        assert_eq!(
            header(&headers, "Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            headers
                .iter()
                .filter(|(n, _)| n.eq_ignore_ascii_case("content-type"))
                .count(),
            1
        );
    }

    #[test]
    fn test_error_detail_used_verbatim() {
        assert_eq!(
            error_message(400, r#"{"detail":"Username already registered"}"#),
            "Username already registered"
        );
    }

    #[test]
    fn test_non_json_body_falls_back_to_status() {
        assert_eq!(error_message(502, "<html>Bad Gateway</html>"), "HTTP 502");
    }

    #[test]
    fn test_json_body_without_detail_falls_back_to_status() {
        assert_eq!(error_message(422, r#"{"message":"nope"}"#), "HTTP 422");
    }

    #[test]
    fn test_missing_body_decodes_as_empty() {
        let result: Result<(), ApiError> = decode_body(None);
        assert!(result.is_ok());
    }

    #[test]
    fn test_body_decodes_into_model() {
        let item: Item = decode_body(Some(
            r#"{"id":1,"title":"Groceries","description":"Milk","owner_id":2}"#,
        ))
        .unwrap();
        assert_eq!(item.title, "Groceries");
    }

    #[test]
    fn test_garbage_body_is_an_error() {
        let result: Result<Item, ApiError> = decode_body(Some("not json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_form_encode_escapes_reserved_characters() {
        let body = form_encode(&[("username", "alice"), ("password", "p@ss w0rd&")]);
        assert_eq!(body, "username=alice&password=p%40ss%20w0rd%26");
    }
}
