//! Integration test harness for the storage deposit service.
//!
//! [`TestApp`] drives the full router in-process with `oneshot` requests,
//! in-memory repositories and an in-memory session store. It keeps a tiny
//! cookie jar so consecutive requests share a session.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p deposit-integration-tests
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use tokio::sync::Mutex;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use deposit_web::AppState;
use deposit_web::db::{MemoryAdminRepository, MemoryIntakeRepository};
use deposit_web::middleware::{SESSION_COOKIE_NAME, session};
use deposit_web::notify::{NotificationSink, Notifier, NotifyError};

/// Password of the admin account seeded by [`TestApp::with_admin`].
pub const ADMIN_PASSWORD: &str = "admin123";

/// A notifier that records messages and optionally fails.
#[derive(Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
    pub attempts: AtomicUsize,
    pub fail: bool,
}

impl RecordingNotifier {
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotifyError::Request("connection refused".to_string()));
        }
        self.messages.lock().await.push(message.to_string());
        Ok(())
    }
}

/// A response with its body collected.
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

impl TestResponse {
    async fn from_response(response: Response<Body>) -> Self {
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        Self {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("JSON body")
    }
}

/// The router plus handles on its in-memory dependencies.
pub struct TestApp {
    pub router: Router,
    pub intakes: Arc<MemoryIntakeRepository>,
    pub admins: Arc<MemoryAdminRepository>,
    cookie: Mutex<Option<String>>,
}

impl TestApp {
    /// App with notifications disabled and no admin account.
    pub fn new() -> Self {
        Self::with_notifications(NotificationSink::disabled())
    }

    /// App using the given notification sink.
    pub fn with_notifications(notifications: NotificationSink) -> Self {
        let intakes = Arc::new(MemoryIntakeRepository::new());
        let admins = Arc::new(MemoryAdminRepository::new());
        let state = AppState::builder()
            .intakes(intakes.clone())
            .admins(admins.clone())
            .notifications(notifications)
            .build();

        let session_layer = session::configure(SessionManagerLayer::new(MemoryStore::default()), false);
        let router = deposit_web::app(state).layer(session_layer);

        Self {
            router,
            intakes,
            admins,
            cookie: Mutex::new(None),
        }
    }

    /// App with the default `admin` account seeded.
    pub async fn with_admin() -> Self {
        let app = Self::new();
        app.seed_admin().await;
        app
    }

    pub async fn seed_admin(&self) {
        let state = AppState::builder().admins(self.admins.clone()).build();
        state
            .auth_service()
            .seed_default_admin_if_absent("admin", ADMIN_PASSWORD)
            .await
            .expect("seed admin");
    }

    /// Send a request, carrying and updating the session cookie.
    pub async fn send(&self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = self.cookie.lock().await.as_ref() {
            request.headers_mut().insert(
                header::COOKIE,
                cookie.parse().expect("valid cookie header"),
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("infallible router");

        let prefix = format!("{SESSION_COOKIE_NAME}=");
        for value in response.headers().get_all(header::SET_COOKIE) {
            let Ok(value) = value.to_str() else { continue };
            if let Some(pair) = value.split(';').next().filter(|p| p.starts_with(&prefix)) {
                *self.cookie.lock().await = Some(pair.to_string());
            }
        }

        TestResponse::from_response(response).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::get(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let body = fields
            .iter()
            .map(|(k, v)| {
                format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
            })
            .collect::<Vec<_>>()
            .join("&");
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .expect("request"),
        )
        .await
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> TestResponse {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
    }

    /// Log in as the seeded admin.
    pub async fn login(&self) -> TestResponse {
        self.post_form("/login", &[("username", "admin"), ("password", ADMIN_PASSWORD)])
            .await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete intake form, as posted by the calculator page.
#[must_use]
pub fn intake_fields(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("nombre_cliente", name.to_string()),
        ("email_cliente", format!("{}@example.com", name.to_lowercase())),
        ("telefono_cliente", "555-0100".to_string()),
        ("tipo_objeto", "furniture".to_string()),
        ("nombre_objeto", "sofa & chairs".to_string()),
        ("volumen", "2.0".to_string()),
        ("precio_calculado", "17000".to_string()),
        ("caja_recomendada", "large box".to_string()),
    ]
}

/// Borrow owned intake fields as `(&str, &str)` pairs.
#[must_use]
pub fn as_pairs<'a>(fields: &'a [(&'a str, String)]) -> Vec<(&'a str, &'a str)> {
    fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
}
