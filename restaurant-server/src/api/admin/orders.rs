//! Admin order list

use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::{Html, Redirect};

use super::DeleteForm;
use crate::api::render;
use crate::api::views::OrderView;
use crate::auth::AdminSession;
use crate::core::ServerState;
use crate::security_log;
use crate::i18n::{Lang, Translator, with_lang};
use crate::utils::AppResult;

const PATH: &str = "/admin/orders";

#[derive(Template)]
#[template(path = "admin_orders.html")]
struct OrdersTemplate {
    i18n: Translator,
    path: &'static str,
    orders: Vec<OrderView>,
}

pub async fn list(
    State(state): State<ServerState>,
    _session: AdminSession,
    lang: Lang,
) -> AppResult<Html<String>> {
    let orders = state
        .orders
        .find_newest_first()?
        .into_iter()
        .map(OrderView::from)
        .collect();

    render(OrdersTemplate {
        i18n: Translator::new(lang),
        path: PATH,
        orders,
    })
}

pub async fn delete(
    State(state): State<ServerState>,
    session: AdminSession,
    lang: Lang,
    form: Result<Form<DeleteForm>, FormRejection>,
) -> AppResult<Redirect> {
    let Form(form) = form?;
    if let Some(id) = form.target() {
        if state.orders.delete(id)? {
            security_log!(
                "INFO",
                "admin_record_deleted",
                collection = "orders",
                id = id.to_string(),
                session_id = session.session_id.clone()
            );
        }
    }
    Ok(Redirect::to(&with_lang(PATH, lang)))
}
