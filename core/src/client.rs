//! Stateless HTTP request builder and response parser for the collection
//! endpoint.
//!
//! # Design
//! `TodoClient` holds only a base URL and carries no mutable state between
//! calls. Each remote operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. [`RemoteTodos`] glues the two halves to a
//! [`Transport`] for callers that want one async call per operation.

use url::Url;

use crate::config::parse_base_url;
use crate::error::{ApiError, ConfigError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{ErrorBody, Item, NewItem};

/// Synchronous, stateless client for the collection endpoint.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: Url,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self::from_url(parse_base_url(base_url)?))
    }

    pub fn from_url(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn build_list_items(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.endpoint(&["todos"]),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_add_item(&self, input: &NewItem) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.endpoint(&["todos"]),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_item(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.endpoint(&["todos", id]),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_items(&self, response: HttpResponse) -> Result<Vec<Item>, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_add_item(&self, response: HttpResponse) -> Result<Item, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// The body of a successful delete is ignored.
    pub fn parse_delete_item(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// Join path segments onto the base URL, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a base, so this only fails for inputs
        // `parse_base_url` already rejected.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.into()
    }
}

/// Map a non-2xx response to `ApiError::Http`, preferring the server's
/// `{"error": "..."}` message over the raw body.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = match serde_json::from_str::<ErrorBody>(&response.body) {
        Ok(body) => body.error,
        Err(_) if response.body.trim().is_empty() => format!("HTTP {}", response.status),
        Err(_) => format!("HTTP {}: {}", response.status, response.body.trim()),
    };
    Err(ApiError::Http {
        status: response.status,
        message,
    })
}

/// The three remote operations, each one async call over a [`Transport`].
#[derive(Debug, Clone)]
pub struct RemoteTodos<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> RemoteTodos<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list(&self) -> Result<Vec<Item>, ApiError> {
        let response = self.transport.execute(self.client.build_list_items()).await?;
        self.client.parse_list_items(response)
    }

    pub async fn add(&self, title: &str) -> Result<Item, ApiError> {
        let request = self.client.build_add_item(&NewItem {
            title: title.to_string(),
        })?;
        let response = self.transport.execute(request).await?;
        self.client.parse_add_item(response)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let response = self.transport.execute(self.client.build_delete_item(id)).await?;
        self.client.parse_delete_item(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000").unwrap()
    }

    #[test]
    fn build_list_items_produces_correct_request() {
        let req = client().build_list_items();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_add_item_produces_correct_request() {
        let input = NewItem {
            title: "Buy milk".to_string(),
        };
        let req = client().build_add_item(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/todos");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "title": "Buy milk" }));
    }

    #[test]
    fn build_delete_item_produces_correct_request() {
        let req = client().build_delete_item("123");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/todos/123");
        assert!(req.body.is_none());
    }

    #[test]
    fn delete_path_percent_encodes_the_id() {
        let req = client().build_delete_item("a/b c");
        assert_eq!(req.path, "http://localhost:3000/todos/a%2Fb%20c");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.build_list_items().path, "http://localhost:3000/todos");
    }

    #[test]
    fn base_path_is_preserved() {
        let client = TodoClient::new("http://localhost:3000/api/").unwrap();
        assert_eq!(client.build_list_items().path, "http://localhost:3000/api/todos");
    }

    #[test]
    fn parse_list_items_success() {
        let response = HttpResponse::new(200, r#"[{"id":"1","title":"Test","isChecked":true}]"#);
        let items = client().parse_list_items(response).unwrap();
        assert_eq!(items, vec![Item::new("1", "Test", true)]);
    }

    #[test]
    fn parse_add_item_accepts_any_2xx() {
        let response = HttpResponse::new(201, r#"{"id":"123","title":"New","isChecked":false}"#);
        let item = client().parse_add_item(response).unwrap();
        assert_eq!(item.id, "123");
    }

    #[test]
    fn parse_add_item_extracts_server_error_message() {
        let response = HttpResponse::new(500, r#"{"error":"Error message"}"#);
        let err = client().parse_add_item(response).unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                message: "Error message".to_string()
            }
        );
    }

    #[test]
    fn parse_error_without_json_body_falls_back_to_status() {
        let err = client().parse_list_items(HttpResponse::new(502, "")).unwrap_err();
        assert_eq!(err.message(), "HTTP 502");

        let err = client().parse_list_items(HttpResponse::new(503, "busy\n")).unwrap_err();
        assert_eq!(err.message(), "HTTP 503: busy");
    }

    #[test]
    fn parse_list_items_bad_json() {
        let err = client().parse_list_items(HttpResponse::new(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_delete_item_ignores_body() {
        assert!(client().parse_delete_item(HttpResponse::new(200, "")).is_ok());
        assert!(client().parse_delete_item(HttpResponse::new(200, "{}")).is_ok());
        assert!(client().parse_delete_item(HttpResponse::new(200, "garbage")).is_ok());
    }

    #[test]
    fn parse_delete_item_not_found() {
        let response = HttpResponse::new(404, r#"{"error":"todo not found"}"#);
        let err = client().parse_delete_item(response).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 404, .. }));
        assert_eq!(err.message(), "todo not found");
    }
}
