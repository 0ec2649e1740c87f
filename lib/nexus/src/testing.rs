//! Scripted transport and JSON fixtures for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::oneshot;

use crate::cache::PersistentCache;
use crate::context::AppContext;
use crate::error::{ClientError, Result};
use crate::http::{ApiClient, HttpRequest, HttpResponse, Method, Transport};
use crate::storage::MemoryStorage;
use crate::ClientConfig;

const TIMESTAMP: &str = "2024-01-15T10:00:00Z";

pub enum Reply {
    /// Raw status and body.
    Raw(u16, String),
    Timeout,
    Offline,
}

impl Reply {
    /// 200 with `data` wrapped in the standard envelope.
    pub fn ok(data: Value) -> Self {
        Self::json(200, json!({ "data": data, "message": "", "success": true }))
    }

    /// Error status with `body` sent as is.
    pub fn status(status: u16, body: Value) -> Self {
        Self::json(status, body)
    }

    pub fn json(status: u16, body: Value) -> Self {
        Self::Raw(status, body.to_string())
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self::Raw(status, body.to_string())
    }

    fn into_result(self) -> Result<HttpResponse> {
        match self {
            Reply::Raw(status, body) => Ok(HttpResponse { status, body }),
            Reply::Timeout => Err(ClientError::Timeout),
            Reply::Offline => Err(ClientError::Network("connection refused".into())),
        }
    }
}

struct Scripted {
    reply: Reply,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
struct Inner {
    routes: HashMap<(Method, String), VecDeque<Scripted>>,
    requests: Vec<HttpRequest>,
}

/// Replies are queued per method and path and consumed in order. Anything
/// unscripted gets a 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Rc<RefCell<Inner>>,
}

impl MockTransport {
    pub fn reply(&self, method: Method, path: &str, reply: Reply) {
        self.push(method, path, Scripted { reply, gate: None });
    }

    /// Queues a reply that is held back until the returned sender fires.
    pub fn gate(&self, method: Method, path: &str, reply: Reply) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.push(
            method,
            path,
            Scripted {
                reply,
                gate: Some(gate),
            },
        );
        release
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.borrow().requests.clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.inner
            .borrow()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.inner
            .borrow_mut()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }
}

#[async_trait(?Send)]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let key = (request.method.clone(), request.path.clone());
        let scripted = {
            let mut inner = self.inner.borrow_mut();
            inner.requests.push(request);
            inner.routes.get_mut(&key).and_then(VecDeque::pop_front)
        };

        let Some(Scripted { reply, gate }) = scripted else {
            return Ok(HttpResponse {
                status: 404,
                body: json!({ "message": format!("no route for {} {}", key.0, key.1) })
                    .to_string(),
            });
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        reply.into_result()
    }
}

pub fn context_parts() -> (MockTransport, PersistentCache, ApiClient) {
    let transport = MockTransport::default();
    let cache = PersistentCache::new(Rc::new(MemoryStorage::new()));
    let client = ApiClient::new(
        Rc::new(transport.clone()),
        cache.clone(),
        Duration::from_secs(10),
    );
    (transport, cache, client)
}

pub fn context(storage: MemoryStorage) -> (MockTransport, AppContext) {
    let transport = MockTransport::default();
    let ctx = AppContext::builder()
        .config(ClientConfig::default())
        .storage(storage)
        .transport(transport.clone())
        .build()
        .expect("test context");
    (transport, ctx)
}

pub fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "email": "ada@example.com",
        "firstName": "Ada",
        "lastName": "Lovelace",
        "role": "STUDENT",
        "createdAt": TIMESTAMP,
        "updatedAt": TIMESTAMP,
    })
}

pub fn auth_payload(id: &str) -> Value {
    json!({
        "user": user_json(id),
        "token": format!("tok{id}"),
        "refreshToken": format!("rtok{id}"),
    })
}

pub fn course_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Course {id}"),
        "description": "Learn things",
        "price": 49.0,
        "duration": 120,
        "level": "BEGINNER",
        "category": "rust",
        "instructor": {
            "id": "i1",
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
        },
        "rating": 4.5,
        "createdAt": TIMESTAMP,
        "updatedAt": TIMESTAMP,
    })
}

pub fn lesson_json(id: &str, order: u32) -> Value {
    json!({
        "id": id,
        "title": format!("Lesson {id}"),
        "duration": 15,
        "order": order,
    })
}

pub fn enrollment_json(id: &str, course_id: &str) -> Value {
    json!({
        "id": id,
        "userId": "1",
        "courseId": course_id,
        "enrolledAt": TIMESTAMP,
        "lastAccessedAt": TIMESTAMP,
    })
}

pub fn page_json(ids: &[&str], page: u32, limit: u32, total: u64) -> Value {
    let total_pages = if limit == 0 {
        0
    } else {
        total.div_ceil(u64::from(limit))
    };
    json!({
        "data": ids.iter().map(|id| course_json(id)).collect::<Vec<_>>(),
        "pagination": {
            "page": page,
            "limit": limit,
            "total": total,
            "totalPages": total_pages,
        },
    })
}
