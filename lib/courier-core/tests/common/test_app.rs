#![allow(
    clippy::missing_errors_doc,
    dead_code,
    missing_docs,
    clippy::expect_used
)]
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, RawQuery};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{error, info};

use courier_core::{Courier, CourierBuilder};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
}

/// One part of a multipart body, as parsed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedPart {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// The query string, as seen by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedQuery {
    pub raw: Option<String>,
    pub params: Vec<(String, String)>,
}

/// The headers of interest, as seen by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedHeaders {
    pub content_types: Vec<String>,
    pub custom: Option<String>,
}

#[derive(Debug, derive_more::Deref)]
pub struct TestApp {
    addr: SocketAddr,
    #[deref]
    courier: Courier,
}

impl TestApp {
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(Courier::builder()).await
    }

    pub async fn start_with(builder: CourierBuilder) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind test server")?;
        let addr = listener.local_addr().context("local address")?;
        info!(%addr, "launching server");

        tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, router()).await {
                error!(?error, "test server stopped");
            }
        });

        let courier = builder.with_base_url(format!("http://{addr}/api/")).build();
        Ok(Self { addr, courier })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

fn router() -> Router {
    let api = Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/empty", get(empty))
        .route("/broken", get(broken))
        .route("/headers", get(echo_headers).delete(echo_headers))
        .route("/echo", post(echo))
        .route("/upload", post(upload))
        .route("/slow", get(slow))
        .route("/files/{name}", get(get_file));

    Router::new().nest("/api", api)
}

fn user(id: u32) -> User {
    User {
        id,
        name: format!("user-{id}"),
    }
}

async fn list_users(
    RawQuery(raw): RawQuery,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<ReceivedQuery> {
    Json(ReceivedQuery { raw, params })
}

async fn create_user(Json(new_user): Json<NewUser>) -> (StatusCode, Json<User>) {
    let created = User {
        id: 7,
        name: new_user.name,
    };
    (StatusCode::CREATED, Json(created))
}

async fn get_user(Path(id): Path<u32>) -> Response {
    if id == 0 {
        let body = serde_json::json!({ "error": "user not found" });
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }
    Json(user(id)).into_response()
}

async fn update_user(Path(id): Path<u32>, Json(new_user): Json<NewUser>) -> Json<User> {
    Json(User {
        id,
        name: new_user.name,
    })
}

async fn delete_user(Path(id): Path<u32>) -> Response {
    if id == 1 {
        return (StatusCode::FORBIDDEN, "cannot delete the admin").into_response();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn empty() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn broken() -> Response {
    (
        [(CONTENT_TYPE, "application/json")],
        r#"{"id":"forty-two","name":"broken"}"#,
    )
        .into_response()
}

async fn echo_headers(headers: HeaderMap) -> Json<ReceivedHeaders> {
    let content_types = headers
        .get_all(CONTENT_TYPE)
        .iter()
        .map(|value| value.to_str().expect("ascii header").to_string())
        .collect();
    let custom = headers
        .get("x-custom")
        .map(|value| value.to_str().expect("ascii header").to_string());
    Json(ReceivedHeaders {
        content_types,
        custom,
    })
}

async fn echo(body: Bytes) -> Bytes {
    body
}

async fn upload(
    mut multipart: Multipart,
) -> Result<Json<Vec<ReceivedPart>>, (StatusCode, String)> {
    let mut parts = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| (StatusCode::BAD_REQUEST, error.to_string()))?
    {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|error| (StatusCode::BAD_REQUEST, error.to_string()))?;
        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            data: data.to_vec(),
        });
    }
    Ok(Json(parts))
}

async fn slow() -> Json<User> {
    tokio::time::sleep(Duration::from_secs(2)).await;
    Json(user(1))
}

async fn get_file(Path(name): Path<String>) -> Json<String> {
    Json(name)
}
