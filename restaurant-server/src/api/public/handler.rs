//! Public page handlers

use askama::Template;
use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::response::Html;
use shared::models::{Order, OrderCreate, Reservation, ReservationCreate};
use shared::util::record_id;

use crate::api::{form_or_default, render};
use crate::api::views::{MenuSection, group_by_category};
use crate::core::ServerState;
use crate::i18n::{Lang, Translator};
use crate::utils::AppResult;

#[derive(Template)]
#[template(path = "index.html")]
struct HomeTemplate {
    i18n: Translator,
    path: &'static str,
}

pub async fn home(lang: Lang) -> AppResult<Html<String>> {
    render(HomeTemplate {
        i18n: Translator::new(lang),
        path: "/",
    })
}

#[derive(Template)]
#[template(path = "menu.html")]
struct MenuTemplate {
    i18n: Translator,
    path: &'static str,
    sections: Vec<MenuSection>,
}

pub async fn menu(State(state): State<ServerState>, lang: Lang) -> AppResult<Html<String>> {
    let items = state.menu.find_for_display()?;
    render(MenuTemplate {
        i18n: Translator::new(lang),
        path: "/menu",
        sections: group_by_category(&items, lang),
    })
}

// ── Reservations ────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "reservation.html")]
struct ReservationTemplate {
    i18n: Translator,
    path: &'static str,
}

#[derive(Template)]
#[template(path = "reservation_success.html")]
struct ReservationSuccessTemplate {
    i18n: Translator,
    path: &'static str,
    reservation: Reservation,
}

pub async fn reservation_form(lang: Lang) -> AppResult<Html<String>> {
    render(ReservationTemplate {
        i18n: Translator::new(lang),
        path: "/reservation",
    })
}

pub async fn submit_reservation(
    State(state): State<ServerState>,
    lang: Lang,
    form: Result<Form<ReservationCreate>, FormRejection>,
) -> AppResult<Html<String>> {
    let data = form_or_default(form)?;
    let reservation = state
        .reservations
        .append(Reservation::new(record_id(), data))?;

    render(ReservationSuccessTemplate {
        i18n: Translator::new(lang),
        path: "/reservation",
        reservation,
    })
}

// ── Orders ──────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "order.html")]
struct OrderTemplate {
    i18n: Translator,
    path: &'static str,
}

#[derive(Template)]
#[template(path = "order_success.html")]
struct OrderSuccessTemplate {
    i18n: Translator,
    path: &'static str,
    order: Order,
}

pub async fn order_form(lang: Lang) -> AppResult<Html<String>> {
    render(OrderTemplate {
        i18n: Translator::new(lang),
        path: "/order",
    })
}

pub async fn submit_order(
    State(state): State<ServerState>,
    lang: Lang,
    form: Result<Form<OrderCreate>, FormRejection>,
) -> AppResult<Html<String>> {
    let data = form_or_default(form)?;
    let order = state.orders.append(Order::new(record_id(), data))?;

    render(OrderSuccessTemplate {
        i18n: Translator::new(lang),
        path: "/order",
        order,
    })
}
