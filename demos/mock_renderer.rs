//! A stand-in for the external renderer.
//!
//! Answers every POST with markup built from the view data it receives.
//! `?format=json` answers with a JSON object instead, which the relay binds
//! key by key.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::{Query, Json};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};

async fn render(uri: Uri, Query(query): Query<HashMap<String, String>>, Json(data): Json<Value>) -> Response {
    let path = data["path"].as_str().unwrap_or(uri.path()).to_string();
    let markup = format!("<h1>Rendered {path}</h1><pre>{data}</pre>");

    if query.get("format").map(String::as_str) == Some("json") {
        Json(json!({ "content": markup, "title": format!("Rendered {path}") })).into_response()
    } else {
        markup.into_response()
    }
}

#[tokio::main]
async fn main() {
    let app = Router::new()
        .route("/", post(render))
        .route("/{*path}", post(render));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Mock renderer listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
