#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{COOKIE, HeaderName, LOCATION, SET_COOKIE};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use skis_gateway::config::{Config, MailConfig};

pub const VERIFIER: &str = "verifier@test.local";
pub const SENDER: &str = "gateway@test.local";
pub const API_KEY: &str = "re_test_key";

/// Captured calls to the mock email API.
#[derive(Clone)]
pub struct MockMail {
    pub addr: SocketAddr,
    sent: Arc<Mutex<Vec<Value>>>,
}

impl MockMail {
    pub fn url(&self) -> String {
        format!("http://{}/emails", self.addr)
    }

    /// Every request body received so far; `_authorization` holds the header.
    pub fn sent(&self) -> Vec<Value> {
        self.sent.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct MockMailState {
    sent: Arc<Mutex<Vec<Value>>>,
    status: StatusCode,
}

async fn mock_send(
    State(state): State<MockMailState>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    body["_authorization"] = json!(auth);
    state.sent.lock().unwrap().push(body);

    if state.status.is_success() {
        (state.status, Json(json!({ "id": "email_test_1" })))
    } else {
        (state.status, Json(json!({ "message": "rejected by mock provider" })))
    }
}

/// Start a stand-in for the Resend API that answers with `status`.
pub async fn spawn_mock_mail(status: StatusCode) -> MockMail {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/emails", post(mock_send))
        .with_state(MockMailState {
            sent: sent.clone(),
            status,
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock mail server");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock mail server failed");
    });

    MockMail { addr, sent }
}

pub struct TestOptions {
    pub database: bool,
    pub api_key: Option<&'static str>,
    pub mail_status: StatusCode,
    /// Send mail here instead of the mock server.
    pub mail_url: Option<&'static str>,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            database: true,
            api_key: Some(API_KEY),
            mail_status: StatusCode::OK,
            mail_url: None,
        }
    }
}

/// A running gateway with an optional dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: Option<PgPool>,
    pub client: Client,
    pub db_name: Option<String>,
    pub mail: MockMail,
}

pub struct Page {
    pub status: StatusCode,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
    pub body: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref().expect("test app has no database")
    }

    pub async fn get(&self, path: &str) -> Page {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        into_page(resp).await
    }

    /// GET with a cookie previously returned in `set-cookie`.
    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> Page {
        let pair = cookie.split(';').next().unwrap_or_default().to_string();
        let resp = self
            .client
            .get(self.url(path))
            .header(COOKIE, pair)
            .send()
            .await
            .expect("get request failed");
        into_page(resp).await
    }

    pub async fn post_form(&self, path: &str, data: &[(&str, &str)]) -> Page {
        let resp = self
            .client
            .post(self.url(path))
            .form(data)
            .send()
            .await
            .expect("post request failed");
        into_page(resp).await
    }

    /// Submit the company form and return the new submission id.
    pub async fn create_submission(&self, data: &[(&str, &str)]) -> Uuid {
        let page = self.post_form("/submit", data).await;
        assert_eq!(page.status, StatusCode::SEE_OTHER, "submit failed: {}", page.body);
        let location = page.location.expect("submit did not redirect");
        let id = location
            .strip_prefix("/qr/")
            .expect("submit redirected somewhere other than the QR page");
        Uuid::parse_str(id).expect("redirect id is not a uuid")
    }
}

async fn into_page(resp: reqwest::Response) -> Page {
    let status = resp.status();
    let location = header_str(&resp, LOCATION);
    let set_cookie = header_str(&resp, SET_COOKIE);
    let body = resp.text().await.unwrap_or_default();
    Page {
        status,
        location,
        set_cookie,
        body,
    }
}

fn header_str(resp: &reqwest::Response, name: HeaderName) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

pub fn acme_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("company_name", "Acme"),
        ("address", "1 Rd"),
        ("representative_name", "Jo"),
        ("email", "jo@x.com"),
        ("contact_number", "123"),
        ("amount", "500"),
    ]
}

/// Spawn the gateway with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    spawn(TestOptions::default()).await
}

pub async fn spawn_app_without_db() -> TestApp {
    spawn(TestOptions {
        database: false,
        ..TestOptions::default()
    })
    .await
}

pub async fn spawn(options: TestOptions) -> TestApp {
    let _ = dotenvy::dotenv();

    let (pool, db_name, database_url) = if options.database {
        let base_url = std::env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set for tests");
        let (pool, db_name, url) = create_test_database(&base_url).await;
        (Some(pool), Some(db_name), Some(url))
    } else {
        (None, None, None)
    };

    let mail = spawn_mock_mail(options.mail_status).await;

    let config = Config {
        database_url,
        secret_key: "test-secret-key".to_string(),
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 65_536,
        log_level: "warn".to_string(),
        mail: MailConfig {
            api_key: options.api_key.map(|k| k.to_string()),
            api_url: options.mail_url.map_or_else(|| mail.url(), |u| u.to_string()),
            from: SENDER.to_string(),
            verifier: VERIFIER.to_string(),
        },
    };

    let app = skis_gateway::build_app(pool.clone(), config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
        mail,
    }
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

async fn create_test_database(base_url: &str) -> (PgPool, String, String) {
    let db_name = format!("skis_test_{}", Uuid::now_v7().simple());

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(base_url))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.to_string());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    skis_gateway::db::init_schema(&pool)
        .await
        .expect("Failed to create schema in test database");

    (pool, db_name, test_url)
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let (Some(pool), Some(db_name)) = (app.pool, app.db_name) else {
        return;
    };
    pool.close().await;

    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}

/// Pull the QR `data:` URI out of a rendered page.
pub fn qr_data_url(html: &str) -> String {
    let start = html
        .find("data:image/png;base64,")
        .expect("page has no QR image");
    let rest = &html[start..];
    let end = rest.find('"').expect("unterminated src attribute");
    rest[..end].to_string()
}

/// Decode the text stored in a PNG QR `data:` URI.
pub fn decode_qr(data_url: &str) -> String {
    let b64 = data_url
        .strip_prefix("data:image/png;base64,")
        .expect("not a PNG data URI");
    let png = STANDARD.decode(b64).expect("invalid base64");
    let img = image::load_from_memory(&png)
        .expect("invalid PNG")
        .to_luma8();

    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        img.width() as usize,
        img.height() as usize,
        |x, y| img.get_pixel(x as u32, y as u32).0[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "expected exactly one QR code");
    let (_, content) = grids[0].decode().expect("QR code did not decode");
    content
}
