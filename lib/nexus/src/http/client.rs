use std::rc::Rc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use shared::envelope::ErrorBody;
use tokio::sync::broadcast;
use tracing::{debug, error, warn};

use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::cache::{PersistentCache, AUTH_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use crate::error::{ClientError, Result};

/// Global reactions the HTTP layer reports to whoever owns navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend rejected the current credentials with a 401. Cached
    /// credentials are already gone when this is delivered.
    Invalidated,
}

/// Single configured transport shared by every service.
///
/// Outbound, every request gets the cached bearer token. Inbound, a 401
/// evicts the cached credentials and emits [`SessionEvent::Invalidated`];
/// 403 and 5xx are only logged. Every failure is still returned to the
/// caller.
#[derive(Clone)]
pub struct ApiClient {
    transport: Rc<dyn Transport>,
    cache: PersistentCache,
    timeout: Duration,
    events: broadcast::Sender<SessionEvent>,
}

impl ApiClient {
    pub fn new(transport: Rc<dyn Transport>, cache: PersistentCache, timeout: Duration) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            transport,
            cache,
            timeout,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Vec<(String, String)>,
    ) -> Result<T> {
        self.make_request(Method::GET, endpoint, query, None::<()>)
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: Option<B>,
    ) -> Result<T> {
        self.make_request(Method::POST, endpoint, Vec::new(), body)
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, endpoint: &str, body: B) -> Result<T> {
        self.make_request(Method::PUT, endpoint, Vec::new(), Some(body))
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: B,
    ) -> Result<T> {
        self.make_request(Method::PATCH, endpoint, Vec::new(), Some(body))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.make_request(Method::DELETE, endpoint, Vec::new(), None::<()>)
            .await
    }

    async fn make_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        query: Vec<(String, String)>,
        body: Option<B>,
    ) -> Result<T> {
        let mut request = HttpRequest::new(method, endpoint, self.timeout);
        request.query = query;
        request.body = body.map(|b| serde_json::to_value(b)).transpose()?;
        request
            .headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        self.authorize(&mut request);

        debug!("Request: {} {}", request.method, request.path);
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(ClientError::Timeout) => {
                error!("Request to {} timed out", endpoint);
                return Err(ClientError::Timeout);
            }
            Err(e) => return Err(e),
        };
        self.handle_response(response)
    }

    /// Attaches the cached access token, if any. Reads local storage only.
    fn authorize(&self, request: &mut HttpRequest) {
        if let Some(token) = self.cache.get::<String>(AUTH_TOKEN_KEY) {
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {token}")));
        }
    }

    fn handle_response<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T> {
        let status = response.status;
        if response.is_success() {
            let text = response.body.trim();
            let text = if text.is_empty() { "null" } else { text };
            return serde_json::from_str(text).map_err(ClientError::from);
        }

        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.message);
        let error = ClientError::from_status(status, message);

        match &error {
            ClientError::Unauthorized { .. } => self.invalidate_credentials(),
            ClientError::Forbidden { .. } => warn!("Access forbidden"),
            ClientError::Server { .. } => error!("Server error occurred ({status})"),
            _ => debug!("Request failed with status {status}"),
        }
        Err(error)
    }

    fn invalidate_credentials(&self) {
        warn!("Credentials rejected, clearing cached session");
        self.cache.remove(AUTH_TOKEN_KEY);
        self.cache.remove(REFRESH_TOKEN_KEY);
        self.cache.remove(USER_KEY);
        // No subscriber just means nobody is routing yet.
        let _ = self.events.send(SessionEvent::Invalidated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{context_parts, Reply};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn attaches_bearer_token_when_cached() {
        let (transport, cache, client) = context_parts();
        transport.reply(Method::GET, "/categories", Reply::ok(json!(["rust"])));
        transport.reply(Method::GET, "/categories", Reply::ok(json!(["rust"])));

        let _: Value = client.get("/categories", Vec::new()).await.unwrap();
        cache.set(AUTH_TOKEN_KEY, "tok1");
        let _: Value = client.get("/categories", Vec::new()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].header("Authorization"), None);
        assert_eq!(requests[1].header("Authorization"), Some("Bearer tok1"));
        assert_eq!(requests[1].header("content-type"), Some("application/json"));
        assert_eq!(requests[1].timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn unauthorized_evicts_credentials_and_notifies() {
        let (transport, cache, client) = context_parts();
        cache.set(AUTH_TOKEN_KEY, "tok1");
        cache.set(REFRESH_TOKEN_KEY, "rtok1");
        cache.set(USER_KEY, &json!({ "id": "1" }));
        transport.reply(
            Method::GET,
            "/courses/c1",
            Reply::status(401, json!({ "message": "Token expired" })),
        );
        let mut events = client.subscribe();

        let error = client
            .get::<Value>("/courses/c1", Vec::new())
            .await
            .unwrap_err();

        assert!(error.is_unauthorized());
        assert_eq!(error.backend_message(), Some("Token expired"));
        assert!(!cache.contains(AUTH_TOKEN_KEY));
        assert!(!cache.contains(REFRESH_TOKEN_KEY));
        assert!(!cache.contains(USER_KEY));
        assert_eq!(events.try_recv().unwrap(), SessionEvent::Invalidated);
    }

    #[tokio::test]
    async fn forbidden_and_server_faults_leave_session_alone() {
        let (transport, cache, client) = context_parts();
        cache.set(AUTH_TOKEN_KEY, "tok1");
        transport.reply(Method::GET, "/a", Reply::status(403, json!({})));
        transport.reply(Method::GET, "/b", Reply::status(502, Value::Null));
        transport.reply(Method::GET, "/c", Reply::Timeout);
        let mut events = client.subscribe();

        let forbidden = client.get::<Value>("/a", Vec::new()).await.unwrap_err();
        let server = client.get::<Value>("/b", Vec::new()).await.unwrap_err();
        let timeout = client.get::<Value>("/c", Vec::new()).await.unwrap_err();

        assert!(matches!(forbidden, ClientError::Forbidden { message: None }));
        assert!(server.is_server_fault());
        assert_eq!(server.status(), Some(502));
        assert!(timeout.is_server_fault());
        assert!(cache.contains(AUTH_TOKEN_KEY));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn other_client_errors_carry_backend_message() {
        let (transport, _, client) = context_parts();
        transport.reply(
            Method::GET,
            "/courses/nope",
            Reply::status(404, json!({ "message": "Course not found", "success": false })),
        );

        let error = client
            .get::<Value>("/courses/nope", Vec::new())
            .await
            .unwrap_err();
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.backend_message(), Some("Course not found"));
    }

    #[tokio::test]
    async fn empty_success_body_decodes_as_null() {
        let (transport, _, client) = context_parts();
        transport.reply(Method::POST, "/auth/logout", Reply::raw(204, ""));

        let body: Option<Value> = client.post("/auth/logout", None::<()>).await.unwrap();
        assert_eq!(body, None);
    }
}
