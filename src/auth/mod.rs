//! Identity and the access gate.
//!
//! Sign-in is a single configured admin credential pair; a successful login
//! issues an HMAC-SHA256 signed session token carried in a cookie. The
//! access gate verifies the token on every request to a protected route —
//! no identity is cached across requests — and any non-empty verified
//! identity is authorized; there is no role or claim distinction.

mod session;

pub use session::{AuthError, SessionAuth, SESSION_COOKIE};

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::server::ErrorResponse;

/// An authenticated principal. Presence is the only signal the system
/// inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The signed-in email address
    pub subject: String,
}

/// The configured admin sign-in credential.
#[derive(Clone)]
pub struct AdminCredentials {
    email: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check a submitted credential pair in constant time.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        let email_ok: bool = self.email.as_bytes().ct_eq(email.as_bytes()).into();
        let password_ok: bool = self.password.as_bytes().ct_eq(password.as_bytes()).into();
        email_ok && password_ok
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Extract the session token from a request's Cookie header.
pub fn session_token(request: &Request) -> Option<String> {
    let cookies = request.headers().get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Access gate middleware for admin routes.
///
/// Each request re-runs the identity check from scratch. A missing cookie,
/// a bad token, or an expired token all resolve to Denied: page requests
/// are redirected to the sign-in route, anything else gets a 401. A
/// verified identity is attached to the request for the wrapped handler.
pub async fn access_gate(
    State(auth): State<SessionAuth>,
    mut request: Request,
    next: Next,
) -> Response {
    let verified = session_token(&request)
        .ok_or(AuthError::MissingToken)
        .and_then(|token| auth.verify(&token));

    match verified {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) => {
            debug!("access denied: {err}");
            if request.method() == Method::GET {
                Redirect::to("/login").into_response()
            } else {
                let body = ErrorResponse::new("unauthorized", "Sign in required");
                (StatusCode::UNAUTHORIZED, Json(body)).into_response()
            }
        }
    }
}
