//!
//! oceanside HTTP server
//! ---------------------
//! This module defines the Axum-based HTTP API for the hotel booking frontend.
//!
//! Responsibilities:
//! - Credential issuance and clearing over a cross-site cookie (/jwt, /logout).
//! - The access guard: cookie extraction plus signature/expiry verification,
//!   run as an extractor before any guarded handler body.
//! - Room, booking, and review endpoints delegating to the document store.
//! - CORS allow-list for the separately hosted frontend origins.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use axum::http::{header::CONTENT_TYPE, HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::AppError;
use crate::identity::{Claims, TokenIssuer, TOKEN_TTL};
use crate::storage::HotelStore;

pub mod bookings;
pub mod docjson;
pub mod reviews;
pub mod rooms;

const TOKEN_COOKIE: &str = "token";

/// Shared server state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: HotelStore,
    pub issuer: TokenIssuer,
}

/// Start the HTTP server: wire the store, verify database connectivity,
/// mount all routes, and serve until shutdown.
pub async fn run(config: Config) -> Result<()> {
    let store = HotelStore::connect(&config).await?;
    store.ping().await?;

    let issuer = TokenIssuer::new(config.access_token_secret.as_bytes(), TOKEN_TTL);
    let state = AppState { store, issuer };
    let app = router(state, &config.allowed_origins)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("oceanside server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Mount every route against the given state. Split out from [`run`] so tests
/// can drive the full router on an ephemeral listener.
pub fn router(state: AppState, allowed_origins: &[String]) -> Result<Router> {
    let origins = allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("invalid origin in allow-list: {o}"))
        })
        .collect::<Result<Vec<_>>>()?;
    // credentialed CORS requires an explicit origin list, never a wildcard
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    Ok(Router::new()
        .route("/", get(|| async { "OCEAN SIDE HOTEL SERVER IS RUNNING...." }))
        .route("/jwt", post(issue_credential))
        .route("/logout", post(logout))
        .route("/rooms", get(rooms::list_rooms))
        .route("/rooms/{id}", get(rooms::get_room))
        .route("/reviews", get(reviews::list_reviews).post(reviews::create_review))
        .route("/bookings", get(bookings::list_bookings).post(bookings::create_booking))
        .route(
            "/bookings/{id}",
            get(bookings::get_booking)
                .patch(bookings::update_booking)
                .delete(bookings::delete_booking),
        )
        .layer(cors)
        .with_state(state))
}

/// Pull a named cookie value out of the request headers.
fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie = headers.get("cookie")?;
    let s = cookie.to_str().ok()?;
    for part in s.split(';') {
        let p = part.trim();
        if let Some(eq) = p.find('=') {
            let (k, v) = p.split_at(eq);
            if k == name {
                return Some(v[1..].to_string());
            }
        }
    }
    None
}

/// Credential cookie for the cross-site frontend: HttpOnly keeps it away from
/// scripts, Secure + SameSite=None lets browsers send it across origins.
fn credential_cookie(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{}={}; HttpOnly; Secure; SameSite=None; Path=/",
        TOKEN_COOKIE, token
    ))
    .unwrap()
}

fn clear_credential_cookie() -> HeaderValue {
    HeaderValue::from_static(
        "token=; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; Secure; SameSite=None; Path=/",
    )
}

/// A request bearing a verified credential.
///
/// Extraction is the verification half of the access guard: a missing cookie
/// or a failing signature/expiry check terminates the request with 401 before
/// the handler body runs. Ownership checks stay in the handlers that need
/// them.
pub struct AuthenticatedUser {
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        info!("{} {}", parts.method, parts.uri);
        let Some(token) = parse_cookie(&parts.headers, TOKEN_COOKIE) else {
            return Err(AppError::unauthorized());
        };
        let claims = state.issuer.verify(&token).map_err(|e| {
            debug!("credential rejected: {}", e);
            AppError::unauthorized()
        })?;
        Ok(AuthenticatedUser { claims })
    }
}

/// Login payload: the identity email plus whatever else the frontend wants
/// embedded in the credential.
#[derive(Debug, Deserialize)]
struct CredentialRequest {
    email: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

async fn issue_credential(
    State(state): State<AppState>,
    Json(payload): Json<CredentialRequest>,
) -> Result<impl IntoResponse, AppError> {
    info!("credential requested email={}", payload.email);
    let token = state
        .issuer
        .issue(payload.email, payload.extra)
        .map_err(|e| AppError::internal(format!("failed to sign credential: {e}")))?;
    let mut headers = HeaderMap::new();
    headers.insert("Set-Cookie", credential_cookie(&token));
    Ok((StatusCode::OK, headers, Json(json!({ "success": true }))))
}

async fn logout() -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert("Set-Cookie", clear_credential_cookie());
    (StatusCode::OK, headers, Json(json!({ "success": true })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_map(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert("cookie", HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn cookie_parsing_matches_exact_name() {
        let h = header_map("token=abc.def.ghi; theme=dark");
        assert_eq!(parse_cookie(&h, "token").as_deref(), Some("abc.def.ghi"));
        assert_eq!(parse_cookie(&h, "theme").as_deref(), Some("dark"));
        assert_eq!(parse_cookie(&h, "missing"), None);
    }

    #[test]
    fn cookie_parsing_ignores_prefixed_names() {
        let h = header_map("atoken=zzz; token=real");
        assert_eq!(parse_cookie(&h, "token").as_deref(), Some("real"));
    }

    #[test]
    fn cookie_parsing_handles_absent_header() {
        assert_eq!(parse_cookie(&HeaderMap::new(), "token"), None);
    }

    #[test]
    fn issued_cookie_is_http_only_secure_cross_site() {
        let v = credential_cookie("tok");
        let s = v.to_str().unwrap();
        assert!(s.starts_with("token=tok;"), "got {s}");
        assert!(s.contains("HttpOnly"));
        assert!(s.contains("Secure"));
        assert!(s.contains("SameSite=None"));
        assert!(s.contains("Path=/"));
    }

    #[test]
    fn cleared_cookie_expires_immediately_with_empty_value() {
        let v = clear_credential_cookie();
        let s = v.to_str().unwrap();
        assert!(s.starts_with("token=;"), "got {s}");
        assert!(s.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
        assert!(s.contains("SameSite=None"));
    }
}
