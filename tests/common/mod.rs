//! Shared harness: the full router over the in-memory store, so the suite
//! exercises the same routing, extractors and middleware as the binary
//! without a database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use canchas_server::auth::jwt::JwtConfig;
use canchas_server::catalog::Catalog;
use canchas_server::routes::create_routes;
use canchas_server::state::AppState;
use canchas_server::store::memory::MemoryStore;

pub fn build_test_app() -> Router {
    let store = Arc::new(MemoryStore::new());
    let state = AppState {
        canchas: store.clone(),
        reservas: store.clone(),
        usuarios: store,
        catalogo: Arc::new(Catalog::default()),
        jwt: Arc::new(JwtConfig {
            secret: "secreto-de-integracion-no-usar-en-produccion".into(),
            expiry_hours: 1,
        }),
    };
    create_routes(state)
}

/// Sends one request and returns `(status, body)`; the body is `Null` when
/// the response carried none.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request construida"),
        None => builder.body(Body::empty()).expect("request construida"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("la aplicación respondió");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("cuerpo leído")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("cuerpo JSON")
    };
    (status, body)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn patch(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::PATCH, uri, token, None).await
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, token, None).await
}

/// Registers a user through the API and returns their token.
pub async fn register(app: &Router, nombre: &str, email: &str, role: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/auth/register",
        None,
        json!({
            "nombre": nombre,
            "email": email,
            "password": "Secreta123",
            "role": role,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registro falló: {body}");
    body["data"]["token"].as_str().expect("token emitido").to_string()
}

pub async fn register_admin(app: &Router, email: &str) -> String {
    register(app, "Admin de prueba", email, "admin").await
}

pub async fn register_player(app: &Router, email: &str) -> String {
    register(app, "Jugador de prueba", email, "jugador").await
}

/// Creates an available court owned by `token` and returns its id.
pub async fn create_court(app: &Router, token: &str, nombre: &str, precio: i64) -> String {
    let (status, body) = post_json(
        app,
        "/api/canchas",
        Some(token),
        json!({
            "nombre": nombre,
            "tipo": "Fútbol",
            "precio": precio,
            "ubicacion": "Centro",
            "capacidad": 10,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "creación de cancha falló: {body}");
    body["data"]["id"].as_str().expect("id de cancha").to_string()
}

/// A bookable date: tomorrow, formatted `YYYY-MM-DD`.
pub fn tomorrow() -> String {
    (chrono::Local::now().date_naive() + chrono::Duration::days(1)).to_string()
}
