//! Admin Session Extractor
//!
//! Put [`AdminSession`] in a handler's arguments to gate it behind the
//! admin login. Requests without a valid session never reach the handler;
//! they are redirected to the login page.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::session::{SESSION_COOKIE, read_cookie};
use crate::core::ServerState;
use crate::security_log;

/// An authenticated admin browser session
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Server-side session id (`sid` claim), logged with admin changes
    pub session_id: String,
}

impl FromRequestParts<ServerState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<AdminSession>() {
            return Ok(session.clone());
        }

        let Some(token) = read_cookie(&parts.headers, SESSION_COOKIE) else {
            security_log!("INFO", "admin_login_required", uri = parts.uri.to_string());
            return Err(AppError::AuthRequired);
        };

        match state.sessions.validate(token) {
            Ok(claims) => {
                let session = AdminSession {
                    session_id: claims.sid,
                };
                parts.extensions.insert(session.clone());
                Ok(session)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "admin_session_rejected",
                    error = e.to_string(),
                    uri = parts.uri.to_string()
                );
                Err(AppError::AuthRequired)
            }
        }
    }
}
