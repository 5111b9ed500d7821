#![doc = include_str!("../README.md")]

pub mod limiter;

pub use limiter::{RateLimitConfig, RateLimited, RateLimiter};

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware as axum_mw,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use authgate::{AccessEngine, AccessRequest};
use authgate_core::{DerivedUser, ModeStore, Verdict};

/// Cookie the session token is read from when no Authorization header is
/// present.
pub const DEFAULT_COOKIE_NAME: &str = "sb-access-token";

// ─── Shared State ───────────────────────────────────────────────

/// State shared by the permission route and the guard middleware.
pub struct AdminAuthState {
    engine: AccessEngine,
    mode: Arc<dyn ModeStore>,
    cookie_name: String,
    limiter: RateLimiter,
}

// ─── AdminAuth Builder ──────────────────────────────────────────

/// The entry point for wiring authgate into an Axum application.
///
/// # Example
///
/// ```rust,ignore
/// use authgate_axum::AdminAuth;
///
/// let auth = AdminAuth::new(engine, mode_store);
/// let admin_routes = admin_routes.layer(axum::middleware::from_fn_with_state(
///     auth.state(),
///     authgate_axum::require_admin,
/// ));
/// let app = axum::Router::new()
///     .merge(auth.router())
///     .nest("/api/admin", admin_routes);
/// ```
pub struct AdminAuth {
    state: Arc<AdminAuthState>,
}

/// Tunables for the integration, with sensible defaults.
#[derive(Debug, Clone)]
pub struct AdminAuthOptions {
    /// Session cookie name (default `sb-access-token`).
    pub cookie_name: String,
    /// Rate limit applied to the permission route.
    pub rate_limit: RateLimitConfig,
}

impl Default for AdminAuthOptions {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl AdminAuthOptions {
    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    pub fn rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }
}

impl AdminAuth {
    pub fn new(engine: AccessEngine, mode: Arc<dyn ModeStore>) -> Self {
        Self::with_options(engine, mode, AdminAuthOptions::default())
    }

    pub fn with_options(
        engine: AccessEngine,
        mode: Arc<dyn ModeStore>,
        options: AdminAuthOptions,
    ) -> Self {
        Self {
            state: Arc::new(AdminAuthState {
                engine,
                mode,
                cookie_name: options.cookie_name,
                limiter: RateLimiter::new(options.rate_limit),
            }),
        }
    }

    pub fn state(&self) -> Arc<AdminAuthState> {
        self.state.clone()
    }

    /// Build the Axum `Router` with the permission endpoint.
    ///
    /// Routes are nested under `/api/admin/auth`.
    pub fn router(&self) -> Router {
        let routes = Router::new()
            .route("/permission", get(handle_permission))
            .layer(axum_mw::from_fn_with_state(
                self.state.clone(),
                rate_limit_middleware,
            ))
            .with_state(self.state.clone());

        Router::new().nest("/api/admin/auth", routes)
    }

    /// Build the router with permissive CORS.
    ///
    /// Allows all origins. For production, configure CORS manually.
    pub fn router_with_cors(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        self.router().layer(cors)
    }
}

// ─── Token Extraction ───────────────────────────────────────────

/// Extract the session token from `Authorization: Bearer <token>` or, failing
/// that, from the named cookie.
fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(auth) = headers.get("authorization") {
        if let Ok(val) = auth.to_str() {
            if let Some(token) = val.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    if let Some(cookie_header) = headers.get("cookie") {
        if let Ok(cookies) = cookie_header.to_str() {
            for cookie in cookies.split(';') {
                let cookie = cookie.trim();
                if let Some((name, value)) = cookie.split_once('=') {
                    if name.trim() == cookie_name {
                        return Some(value.to_string());
                    }
                }
            }
        }
    }

    None
}

// ─── Verdict → Response Mapping ─────────────────────────────────

fn permission_response(verdict: Verdict) -> Response {
    match verdict {
        Verdict::Authorized(user) => {
            let body = serde_json::json!({
                "authorized": true,
                "user": user,
            });
            (StatusCode::OK, Json(body)).into_response()
        }
        Verdict::Denied(reason) => {
            // Every denial is a 401 with the reason code; clients that need
            // to distinguish a backend outage look at the code.
            let body = serde_json::json!({
                "authorized": false,
                "error": reason.code(),
            });
            (StatusCode::UNAUTHORIZED, Json(body)).into_response()
        }
    }
}

// ─── Route Handlers ─────────────────────────────────────────────

/// GET /api/admin/auth/permission
///
/// Evaluates the caller and reports the verdict. The operating mode is read
/// exactly once, before the evaluation starts.
async fn handle_permission(
    State(state): State<Arc<AdminAuthState>>,
    headers: HeaderMap,
) -> Response {
    let token = extract_session_token(&headers, &state.cookie_name);
    let mode = state.mode.get();
    let verdict = state
        .engine
        .decide(&AccessRequest::new(token), mode)
        .await;
    permission_response(verdict)
}

// ─── Middleware ─────────────────────────────────────────────────

/// Admin guard middleware.
///
/// - denied: 401 with the reason
/// - authorized but not admin: 403
/// - authorized admin: the `DerivedUser` is attached to request extensions
pub async fn require_admin(
    State(state): State<Arc<AdminAuthState>>,
    mut req: axum::extract::Request,
    next: axum_mw::Next,
) -> Response {
    let token = extract_session_token(req.headers(), &state.cookie_name);
    let mode = state.mode.get();
    let verdict = state
        .engine
        .decide(&AccessRequest::new(token), mode)
        .await;

    let user = match verdict {
        Verdict::Authorized(user) => user,
        Verdict::Denied(reason) => {
            tracing::debug!(reason = reason.code(), "admin request denied");
            let body = serde_json::json!({ "error": reason.code() });
            return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        }
    };

    if !user.is_admin {
        tracing::debug!(email = %user.user.email, "admin request denied: not an admin");
        let body = serde_json::json!({ "error": "Insufficient permissions" });
        return (StatusCode::FORBIDDEN, Json(body)).into_response();
    }

    req.extensions_mut().insert::<DerivedUser>(user);
    next.run(req).await
}

/// Extract client IP from request headers for rate limiting.
fn extract_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or("unknown").trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Axum middleware for rate limiting.
async fn rate_limit_middleware(
    State(state): State<Arc<AdminAuthState>>,
    req: axum::extract::Request,
    next: axum_mw::Next,
) -> Response {
    let ip = extract_ip(req.headers());

    if let Err(limited) = state.limiter.check(&ip) {
        tracing::warn!(%ip, retry_after = limited.retry_after, "rate limit exceeded");
        let body = serde_json::json!({
            "error": "Too many requests. Please try again later.",
        });
        let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
        if let Ok(val) = limited.retry_after.to_string().parse() {
            response.headers_mut().insert("Retry-After", val);
        }
        return response;
    }

    next.run(req).await
}

// ─── Tests ──────────────────────────────────────────────────────
