//! Admin login / logout

use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::api::render;
use crate::auth::SESSION_COOKIE;
use crate::auth::session::read_cookie;
use crate::core::ServerState;
use crate::i18n::{Lang, Translator, with_lang};
use crate::security_log;
use crate::utils::{AppError, AppResult};
use crate::utils::error::LOGIN_PATH;

#[derive(Template)]
#[template(path = "admin_login.html")]
struct LoginTemplate {
    i18n: Translator,
    path: &'static str,
    error_key: Option<&'static str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    password: String,
}

pub async fn login_form(lang: Lang) -> AppResult<Response> {
    Ok(render(LoginTemplate {
        i18n: Translator::new(lang),
        path: LOGIN_PATH,
        error_key: None,
    })?
    .into_response())
}

/// 校验共享密码，成功后下发会话 Cookie 并跳转到 /admin
pub async fn login(
    State(state): State<ServerState>,
    lang: Lang,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;

    if form.password != state.config.admin_password {
        security_log!("WARN", "admin_login_failed", lang = lang.code());
        let page = render(LoginTemplate {
            i18n: Translator::new(lang),
            path: LOGIN_PATH,
            error_key: Some("wrong_password"),
        })?;
        return Ok((StatusCode::UNAUTHORIZED, page).into_response());
    }

    let token = state
        .sessions
        .open()
        .map_err(|e| AppError::internal(e.to_string()))?;
    security_log!(
        "INFO",
        "admin_login_success",
        active_sessions = state.sessions.active_count()
    );

    Ok((
        [(header::SET_COOKIE, state.sessions.session_cookie(&token))],
        Redirect::to(&with_lang("/admin", lang)),
    )
        .into_response())
}

/// 吊销当前会话并清除 Cookie
pub async fn logout(
    State(state): State<ServerState>,
    lang: Lang,
    headers: HeaderMap,
) -> Response {
    if let Some(token) = read_cookie(&headers, SESSION_COOKIE)
        && let Some(sid) = state.sessions.close(token)
    {
        security_log!("INFO", "admin_logout", session_id = sid);
    }

    (
        [(header::SET_COOKIE, state.sessions.cleared_cookie())],
        Redirect::to(&with_lang(LOGIN_PATH, lang)),
    )
        .into_response()
}
