#![allow(dead_code)]

// tests/common/mod.rs
use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    lifeline_test_support::logging::init();
}

/// Fresh state with a fixed seed so join codes and draws repeat across runs.
pub fn seeded_state() -> AppState {
    build_state().with_rng_seed(7).build()
}

/// Status, headers and raw body of one response.
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|_| {
            panic!(
                "body should be JSON, got: {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn etag(&self) -> String {
        self.headers
            .get("etag")
            .and_then(|v| v.to_str().ok())
            .expect("ETag header should be present")
            .to_string()
    }
}

pub async fn send<S>(app: &S, req: Request) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await.to_vec();
    Reply {
        status,
        headers,
        body,
    }
}

pub async fn post_json<S>(app: &S, uri: &str, body: Value) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    send(app, req).await
}

pub async fn get<S>(app: &S, uri: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    send(app, test::TestRequest::get().uri(uri).to_request()).await
}
