#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use postboard_api::auth::{AuthError, IdentityProvider};
use postboard_api::database::models::{Comment, Entity, Post};
use postboard_api::database::{DatabaseError, Repo, RepoError, StoreHealth};
use postboard_api::routes;
use postboard_api::services::CrudService;
use postboard_api::state::AppState;

pub const OWNER_TOKEN: &str = "u1-token";
pub const OTHER_TOKEN: &str = "u2-token";
pub const BAD_SHAPE_TOKEN: &str = "bad-shape";
pub const REVOKED_TOKEN: &str = "revoked";
pub const OFFLINE_TOKEN: &str = "offline";
pub const ODD_EMAIL_TOKEN: &str = "u3-token";
pub const GOOD_CODE: &str = "good-code";

/// In-memory store standing in for PostgreSQL
pub struct MemoryRepo<T> {
    rows: Mutex<BTreeMap<i32, T>>,
    next_id: AtomicI32,
    set_id: fn(&mut T, i32),
}

impl<T> MemoryRepo<T> {
    pub fn new(set_id: fn(&mut T, i32)) -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
            set_id,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl<T: Entity> Repo<T> for MemoryRepo<T> {
    async fn get_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.rows.lock().unwrap().values().cloned().collect())
    }

    async fn create(&self, mut entity: T) -> Result<T, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        (self.set_id)(&mut entity, id);
        self.rows.lock().unwrap().insert(id, entity.clone());
        Ok(entity)
    }

    async fn get_by_id(&self, id: i32) -> Result<T, RepoError> {
        self.rows.lock().unwrap().get(&id).cloned().ok_or(RepoError::NotFound)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&entity.id()) {
            Some(row) => {
                *row = entity.clone();
                Ok(entity)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete_by_id(&self, id: i32) -> Result<(), RepoError> {
        self.get_by_id(id).await?;
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }
}

/// Identity provider with canned answers keyed by token
pub struct StubIdentity;

#[async_trait]
impl IdentityProvider for StubIdentity {
    fn auth_code_url(&self, state: &str) -> String {
        format!("https://provider.test/consent?state={}", state)
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        if code == GOOD_CODE {
            Ok("access-123".to_string())
        } else {
            Err(AuthError::Exchange("invalid_grant".to_string()))
        }
    }

    async fn user_info(&self, token: &str) -> Result<Vec<u8>, AuthError> {
        let body = match token {
            OWNER_TOKEN => r#"{"id":"u1","email":"u1@example.com"}"#,
            OTHER_TOKEN => r#"{"id":"u2","email":"u2@example.com"}"#,
            ODD_EMAIL_TOKEN => r#"{"id":"u3","email":"u3-at-example"}"#,
            BAD_SHAPE_TOKEN => r#"{"id":1,"email":"u1@example.com"}"#,
            OFFLINE_TOKEN => return Err(AuthError::Transport("connection refused".to_string())),
            _ => r#"{"error":{"code":401,"message":"Invalid Credentials"}}"#,
        };
        Ok(body.as_bytes().to_vec())
    }
}

/// Store health that can be switched off mid-test
#[derive(Default)]
pub struct SwitchableStore {
    down: AtomicBool,
}

impl SwitchableStore {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

#[async_trait]
impl StoreHealth for SwitchableStore {
    async fn ping(&self) -> Result<(), DatabaseError> {
        if self.down.load(Ordering::SeqCst) {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
        } else {
            Ok(())
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub posts: Arc<MemoryRepo<Post>>,
    pub comments: Arc<MemoryRepo<Comment>>,
    pub store: Arc<SwitchableStore>,
}

pub fn test_app() -> TestApp {
    let posts = Arc::new(MemoryRepo::<Post>::new(|p, id| p.id = id));
    let comments = Arc::new(MemoryRepo::<Comment>::new(|c, id| c.id = id));
    let store = Arc::new(SwitchableStore::default());

    let state = AppState {
        posts: Arc::new(CrudService::<Post>::new(posts.clone())),
        comments: Arc::new(CrudService::<Comment>::new(comments.clone())),
        identity: Arc::new(StubIdentity),
        health: store.clone(),
        oauth_state: "test-state".to_string(),
    };

    TestApp {
        router: routes::app(state),
        posts,
        comments,
        store,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub struct RequestSpec<'a> {
    pub method: Method,
    pub uri: &'a str,
    pub token: Option<&'a str>,
    pub body: Option<String>,
    pub headers: Vec<(header::HeaderName, &'a str)>,
}

impl<'a> RequestSpec<'a> {
    pub fn new(method: Method, uri: &'a str) -> Self {
        Self {
            method,
            uri,
            token: None,
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn token(mut self, token: &'a str) -> Self {
        self.token = Some(token);
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.headers.push((header::CONTENT_TYPE, "application/json"));
        self.body = Some(body.to_string());
        self
    }

    pub fn raw(mut self, content_type: &'a str, body: &str) -> Self {
        self.headers.push((header::CONTENT_TYPE, content_type));
        self.body = Some(body.to_string());
        self
    }

    pub fn header(mut self, name: header::HeaderName, value: &'a str) -> Self {
        self.headers.push((name, value));
        self
    }
}

pub async fn send(app: &TestApp, req: RequestSpec<'_>) -> TestResponse {
    let mut builder = Request::builder().method(req.method).uri(req.uri);
    if let Some(token) = req.token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    for (name, value) in req.headers {
        builder = builder.header(name, value);
    }
    let request = builder
        .body(req.body.map(Body::from).unwrap_or_else(Body::empty))
        .expect("valid request");

    let response = app.router.clone().oneshot(request).await.expect("infallible router");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body")
        .to_vec();

    TestResponse { status, headers, body }
}
