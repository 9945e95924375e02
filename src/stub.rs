use crate::constants::LOGIN_PAGE_PATH;
use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use hyper::Server;
use std::net::SocketAddr;

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "geocheck-stub",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Logging out sends the browser back to the login page. The application
/// answers with 302, so the status is set explicitly; axum's Redirect
/// helpers only produce 303/307/308.
async fn logout() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, LOGIN_PAGE_PATH)])
}

/// Login page the logout redirect lands on
async fn login_page() -> Html<&'static str> {
    Html("<!DOCTYPE html><html><body><h1>GeoSurvey Login</h1></body></html>")
}

/// The stub keeps no sessions, so the dashboard always bounces to login
async fn dashboard() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, LOGIN_PAGE_PATH)])
}

/// Routes mimicking the slice of the application the checks touch
pub fn create_stub_app() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/logout/", get(logout).post(logout))
        .route(LOGIN_PAGE_PATH, get(login_page))
        .route("/dashboard/", get(dashboard))
}

/// Start the stub application on the specified port
pub async fn start_stub_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_stub_app();

    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    println!("🚀 Stub application running on http://localhost:{port}");
    println!("💚 Health check: http://localhost:{port}/health");
    println!("🚪 Logout:       http://localhost:{port}/logout/");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
